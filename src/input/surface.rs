use std::sync::atomic::{AtomicU64, Ordering};

/// Width and height of the input surface in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceBounds {
    pub width: u32,
    pub height: u32,
}

impl SurfaceBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Normalization divides by both bounds.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn pack(self) -> u64 {
        (u64::from(self.width) << 32) | u64::from(self.height)
    }

    fn unpack(bits: u64) -> Self {
        Self {
            width: (bits >> 32) as u32,
            height: bits as u32,
        }
    }
}

/// Current surface size, written on resize and read by every batch.
///
/// Both bounds live in one atomic word so a reader never observes a width
/// from one resize paired with a height from another.
#[derive(Debug, Default)]
pub struct SurfaceTracker {
    bounds: AtomicU64,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new size and return the previous one.
    pub fn resize(&self, width: u32, height: u32) -> SurfaceBounds {
        let next = SurfaceBounds::new(width, height);
        SurfaceBounds::unpack(self.bounds.swap(next.pack(), Ordering::AcqRel))
    }

    pub fn snapshot(&self) -> SurfaceBounds {
        SurfaceBounds::unpack(self.bounds.load(Ordering::Acquire))
    }
}
