//! On-screen stroke feedback
//!
//! The renderer owns the visible path; the capture core only forwards
//! raw surface positions to it while drawing mode is on.

/// Receiver of raw stroke positions for on-screen feedback
pub trait StrokeFeedback: Send {
    /// Start a new sub-path at a contact
    fn move_to(&mut self, x: f32, y: f32);

    /// Extend the current sub-path
    fn line_to(&mut self, x: f32, y: f32);

    /// Drop everything drawn so far
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
}

/// Recorded feedback path, replayed by the renderer
#[derive(Debug, Clone, Default)]
pub struct FeedbackPath {
    segments: Vec<PathSegment>,
}

impl FeedbackPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl StrokeFeedback for FeedbackPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::LineTo { x, y });
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}
