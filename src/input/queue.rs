//! Event queue shared between input callbacks and the transport
//!
//! Producers append without blocking; the queue is unbounded so the
//! only limit is how fast the transport drains it. A whole batch is
//! appended under one lock, so events of concurrent callbacks never
//! interleave.

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::core::contracts::ProtocolEvent;

/// Queue counters for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMetrics {
    pub enqueued: u64,
    pub dequeued: u64,
    pub dropped: u64,
    pub max_depth: usize,
    pub current_depth: usize,
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<ProtocolEvent>,
    closed: bool,
    enqueued: u64,
    dequeued: u64,
    dropped: u64,
    max_depth: usize,
}

impl QueueState {
    fn pop(&mut self) -> Option<ProtocolEvent> {
        let event = self.events.pop_front()?;
        self.dequeued = self.dequeued.saturating_add(1);
        Some(event)
    }
}

#[derive(Debug, Default)]
pub struct EventQueue {
    inner: Mutex<QueueState>,
    wake: Condvar,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event. Returns `false` only when the queue is closed.
    pub fn enqueue(&self, event: ProtocolEvent) -> bool {
        self.enqueue_all(std::iter::once(event)) == 1
    }

    /// Append a sequence contiguously, returning how many were accepted.
    pub fn enqueue_all<I>(&self, events: I) -> usize
    where
        I: IntoIterator<Item = ProtocolEvent>,
    {
        let mut guard = self.inner.lock();
        if guard.closed {
            let dropped = events.into_iter().count();
            guard.dropped = guard.dropped.saturating_add(dropped as u64);
            return 0;
        }

        let before = guard.events.len();
        guard.events.extend(events);
        let added = guard.events.len() - before;
        guard.enqueued = guard.enqueued.saturating_add(added as u64);
        guard.max_depth = guard.max_depth.max(guard.events.len());
        drop(guard);

        if added > 0 {
            self.wake.notify_all();
        }
        added
    }

    pub fn try_pop(&self) -> Option<ProtocolEvent> {
        self.inner.lock().pop()
    }

    /// Wait up to `timeout` for an event. Returns `None` on timeout or once
    /// the queue is closed and empty. A timeout too large to represent as a
    /// deadline waits until an event arrives or the queue closes.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<ProtocolEvent> {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = self.inner.lock();
        loop {
            if let Some(event) = guard.pop() {
                return Some(event);
            }
            if guard.closed {
                return None;
            }
            match deadline {
                Some(deadline) => {
                    if self.wake.wait_until(&mut guard, deadline).timed_out() {
                        return guard.pop();
                    }
                }
                None => self.wake.wait(&mut guard),
            }
        }
    }

    pub fn drain(&self) -> Vec<ProtocolEvent> {
        let mut out = Vec::new();
        self.drain_into(&mut out);
        out
    }

    /// Move every queued event into `out` in FIFO order.
    pub fn drain_into(&self, out: &mut Vec<ProtocolEvent>) -> usize {
        let mut guard = self.inner.lock();
        let count = guard.events.len();
        out.extend(guard.events.drain(..));
        guard.dequeued = guard.dequeued.saturating_add(count as u64);
        count
    }

    pub fn close(&self) {
        self.inner.lock().closed = true;
        self.wake.notify_all();
    }

    pub fn reopen(&self) {
        self.inner.lock().closed = false;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn clear(&self) {
        self.inner.lock().events.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> QueueMetrics {
        let guard = self.inner.lock();
        QueueMetrics {
            enqueued: guard.enqueued,
            dequeued: guard.dequeued,
            dropped: guard.dropped,
            max_depth: guard.max_depth,
            current_depth: guard.events.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn motion(x: i16) -> ProtocolEvent {
        ProtocolEvent::motion(x, 0, 0)
    }

    #[test]
    fn drains_in_fifo_order() {
        let queue = EventQueue::new();
        for x in 0..5 {
            assert!(queue.enqueue(motion(x)));
        }

        let drained = queue.drain();
        let xs: Vec<i16> = drained.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn try_pop_on_empty_queue_returns_none() {
        let queue = EventQueue::new();
        assert!(queue.try_pop().is_none());
        queue.enqueue(motion(9));
        assert_eq!(queue.try_pop(), Some(motion(9)));
    }

    #[test]
    fn closed_queue_drops_and_counts() {
        let queue = EventQueue::new();
        queue.close();

        assert!(!queue.enqueue(motion(1)));
        assert_eq!(queue.enqueue_all([motion(2), motion(3)]), 0);

        let metrics = queue.metrics();
        assert_eq!(metrics.dropped, 3);
        assert_eq!(metrics.enqueued, 0);

        assert!(queue.is_closed());
        queue.reopen();
        assert!(!queue.is_closed());
        assert!(queue.enqueue(motion(4)));
    }

    #[test]
    fn unrepresentable_timeout_still_returns_queued_event() {
        let queue = EventQueue::new();
        queue.enqueue(motion(7));
        assert_eq!(queue.pop_timeout(Duration::MAX), Some(motion(7)));
    }

    #[test]
    fn unrepresentable_timeout_waits_for_enqueue() {
        let queue = Arc::new(EventQueue::new());
        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.pop_timeout(Duration::MAX))
        };

        thread::sleep(Duration::from_millis(10));
        queue.enqueue(motion(3));
        let result = consumer.join().expect("consumer thread panicked");
        assert_eq!(result, Some(motion(3)));
    }

    #[test]
    fn pop_timeout_expires_on_empty_queue() {
        let queue = EventQueue::new();
        assert!(queue.pop_timeout(Duration::from_millis(5)).is_none());
    }

    #[test]
    fn pop_timeout_wakes_on_enqueue() {
        let queue = Arc::new(EventQueue::new());
        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                queue.enqueue(motion(42));
            })
        };

        let event = queue.pop_timeout(Duration::from_secs(5));
        producer.join().expect("producer thread panicked");
        assert_eq!(event, Some(motion(42)));
    }

    #[test]
    fn close_wakes_blocked_consumer() {
        let queue = Arc::new(EventQueue::new());
        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.pop_timeout(Duration::from_secs(5)))
        };

        thread::sleep(Duration::from_millis(10));
        queue.close();
        let result = consumer.join().expect("consumer thread panicked");
        assert!(result.is_none());
    }

    #[test]
    fn concurrent_batches_stay_contiguous_without_drops() {
        let queue = Arc::new(EventQueue::new());

        const PRODUCERS: i16 = 4;
        const BATCHES: usize = 200;
        const BATCH_LEN: i16 = 3;

        let mut handles = Vec::new();
        for producer in 0..PRODUCERS {
            let queue = queue.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..BATCHES {
                    let batch = (0..BATCH_LEN).map(|i| ProtocolEvent::motion(producer, i, 0));
                    assert_eq!(queue.enqueue_all(batch), BATCH_LEN as usize);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("producer thread panicked");
        }

        let drained = queue.drain();
        let total = PRODUCERS as usize * BATCHES * BATCH_LEN as usize;
        assert_eq!(drained.len(), total);
        for chunk in drained.chunks(BATCH_LEN as usize) {
            let producer = chunk[0].x;
            let ys: Vec<i16> = chunk.iter().map(|e| e.y).collect();
            assert!(chunk.iter().all(|e| e.x == producer));
            assert_eq!(ys, vec![0, 1, 2]);
        }

        let metrics = queue.metrics();
        assert_eq!(metrics.enqueued, total as u64);
        assert_eq!(metrics.dequeued, total as u64);
        assert_eq!(metrics.dropped, 0);
        assert_eq!(metrics.current_depth, 0);
    }
}
