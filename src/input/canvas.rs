//! Canvas input - the capture core bound to one input surface
//!
//! Receives hardware pointer batches, filters them by tool type,
//! normalizes every surviving sample against the current surface size and
//! appends the resulting protocol events to the transport's queue.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::{CanvasConfig, CanvasTheme, Preference};
use super::feedback::{FeedbackPath, StrokeFeedback};
use super::normalize::{normalize_axis, normalize_pressure};
use super::proximity::{ProximityInput, ProximityMachine, ProximityState};
use super::queue::EventQueue;
use super::surface::{SurfaceBounds, SurfaceTracker};
use super::{PointerAction, PointerSample};
use crate::core::contracts::ProtocolEvent;
use crate::core::errors::CoreError;

/// Capture core for one surface.
///
/// Disabled until a transport queue is attached. Batches from concurrent
/// callbacks are serialized on the proximity lock, which is held until the
/// batch's events are queued, so queue order matches state transitions.
pub struct CanvasInput<F: StrokeFeedback = FeedbackPath> {
    enabled: AtomicBool,
    queue: RwLock<Option<Arc<EventQueue>>>,
    config: RwLock<CanvasConfig>,
    surface: SurfaceTracker,
    proximity: Mutex<ProximityMachine>,
    drawing: AtomicBool,
    feedback: Mutex<F>,
}

impl CanvasInput<FeedbackPath> {
    pub fn new() -> Self {
        Self::with_feedback(FeedbackPath::new())
    }
}

impl Default for CanvasInput<FeedbackPath> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StrokeFeedback> CanvasInput<F> {
    pub fn with_feedback(feedback: F) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            queue: RwLock::new(None),
            config: RwLock::new(CanvasConfig::default()),
            surface: SurfaceTracker::new(),
            proximity: Mutex::new(ProximityMachine::new()),
            drawing: AtomicBool::new(false),
            feedback: Mutex::new(feedback),
        }
    }

    // transport

    /// Bind the transport's queue and start accepting input.
    pub fn attach_queue(&self, queue: Arc<EventQueue>) {
        *self.queue.write() = Some(queue);
        self.enabled.store(true, Ordering::SeqCst);
        tracing::info!("[Canvas] Transport attached, input enabled");
    }

    pub fn detach_queue(&self) -> Option<Arc<EventQueue>> {
        self.enabled.store(false, Ordering::SeqCst);
        let previous = self.queue.write().take();
        tracing::info!("[Canvas] Transport detached, input disabled");
        previous
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        tracing::debug!("[Canvas] Input enabled: {}", enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.active_queue().is_some()
    }

    fn active_queue(&self) -> Option<Arc<EventQueue>> {
        if !self.enabled.load(Ordering::SeqCst) {
            return None;
        }
        self.queue.read().clone()
    }

    // settings

    pub fn config(&self) -> CanvasConfig {
        *self.config.read()
    }

    pub fn apply_config(&self, config: CanvasConfig) {
        *self.config.write() = config;
        tracing::debug!("[Canvas] Config applied: {:?}", config);
    }

    pub fn set_stylus_only(&self, stylus_only: bool) {
        self.config.write().stylus_only = stylus_only;
        tracing::debug!("[Canvas] Stylus only: {}", stylus_only);
    }

    /// Handle a preference change notification carrying a raw key.
    pub fn on_preference_changed(&self, key: &str, value: bool) -> Result<(), CoreError> {
        let preference: Preference = key.parse()?;
        self.config.write().set(preference, value);
        tracing::debug!("[Canvas] Preference {} = {}", preference.key(), value);
        Ok(())
    }

    pub fn theme(&self) -> CanvasTheme {
        self.config.read().theme()
    }

    // surface

    pub fn on_resize(&self, width: u32, height: u32) {
        let previous = self.surface.resize(width, height);
        tracing::info!(
            "[Canvas] Size changed: {}x{} (before: {}x{})",
            width,
            height,
            previous.width,
            previous.height
        );
    }

    pub fn surface(&self) -> SurfaceBounds {
        self.surface.snapshot()
    }

    pub fn proximity(&self) -> ProximityState {
        self.proximity.lock().state()
    }

    // drawing feedback

    /// Flip drawing mode and return the new value.
    pub fn toggle_drawing(&self) -> bool {
        !self.drawing.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.load(Ordering::SeqCst)
    }

    pub fn clear_drawing(&self) {
        self.feedback.lock().clear();
    }

    /// Read the feedback path. The lock is held for the duration of `f`,
    /// so `f` must not deliver pointer batches to this canvas.
    pub fn inspect_feedback<R>(&self, f: impl FnOnce(&F) -> R) -> R {
        f(&self.feedback.lock())
    }

    // input

    /// Translate one hardware batch. Returns `false` when the core is
    /// disabled, in which case nothing is queued.
    ///
    /// Proximity transitions run on a copy of the machine and are committed
    /// only if the queue accepted the batch, so a closed queue never leaves
    /// a synthetic enter or leave unsent.
    pub fn on_pointer_batch(&self, samples: &[PointerSample], action: PointerAction) -> bool {
        let Some(queue) = self.active_queue() else {
            return false;
        };

        let bounds = self.surface.snapshot();
        if !bounds.has_area() {
            tracing::warn!(
                "[Canvas] Dropping {:?} batch of {} pointer(s): surface is {}x{}",
                action,
                samples.len(),
                bounds.width,
                bounds.height
            );
            return true;
        }

        let stylus_only = self.config.read().stylus_only;
        let drawing = self.is_drawing();

        let mut committed = self.proximity.lock();
        let mut machine = *committed;
        let mut events = Vec::with_capacity(samples.len() * 2);

        for sample in samples {
            if stylus_only && !sample.tool.is_stylus() {
                continue;
            }

            let nx = normalize_axis(sample.x, bounds.width);
            let ny = normalize_axis(sample.y, bounds.height);
            let npressure = normalize_pressure(sample.pressure);
            tracing::trace!(
                "[Canvas] {:?} pointer {} @ {}|{} (pressure {})",
                action,
                sample.pointer_id,
                sample.x,
                sample.y,
                sample.pressure
            );

            match action {
                PointerAction::HoverMove => {
                    events.push(ProtocolEvent::motion(nx, ny, npressure));
                }
                PointerAction::Move => {
                    events.push(ProtocolEvent::motion(nx, ny, npressure));
                    if drawing {
                        self.feedback.lock().line_to(sample.x, sample.y);
                    }
                }
                PointerAction::HoverEnter => {
                    machine.handle(ProximityInput::HoverEnter, nx, ny, npressure, &mut events);
                }
                PointerAction::HoverExit => {
                    machine.handle(ProximityInput::HoverExit, nx, ny, npressure, &mut events);
                }
                PointerAction::Down => {
                    machine.handle(ProximityInput::Down, nx, ny, npressure, &mut events);
                    if drawing {
                        self.feedback.lock().move_to(sample.x, sample.y);
                    }
                }
                PointerAction::Up | PointerAction::Cancel => {
                    machine.handle(ProximityInput::Release, nx, ny, npressure, &mut events);
                }
                PointerAction::Outside
                | PointerAction::PointerDown
                | PointerAction::PointerUp
                | PointerAction::Scroll => {}
            }
        }

        let produced = events.len();
        if queue.enqueue_all(events) == produced {
            *committed = machine;
        } else {
            tracing::warn!(
                "[Canvas] Queue closed, dropped {} event(s) of {:?} batch",
                produced,
                action
            );
        }
        drop(committed);
        true
    }
}
