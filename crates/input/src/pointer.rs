use orbfield_common::PointerNdc;

/// Virtual pixels per wheel line when the platform reports line deltas.
pub const LINE_HEIGHT_PX: f32 = 50.0;

/// Tracks the latest pointer position and the viewport it lives in.
///
/// Stores the raw pixel position alongside its NDC projection; the NDC value
/// is recomputed on pointer motion and on viewport resize.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    width: u32,
    height: u32,
    pixel: (f64, f64),
    ndc: PointerNdc,
}

impl PointerTracker {
    /// Start at the viewport center, which maps to NDC `(0, 0)`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel: (width as f64 / 2.0, height as f64 / 2.0),
            ndc: PointerNdc::default(),
        }
    }

    /// Record a pointer move in pixels, origin top-left.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pixel = (x, y);
        self.ndc = PointerNdc::from_pixels(x, y, self.width, self.height);
    }

    /// Record a viewport resize and re-project the stored pixel position.
    pub fn viewport_resized(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ndc = PointerNdc::from_pixels(self.pixel.0, self.pixel.1, width, height);
    }

    /// Latest pointer position in NDC.
    pub fn ndc(&self) -> PointerNdc {
        self.ndc
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Accumulates wheel deltas into a virtual scroll offset in pixels.
///
/// Plays the role of a document scroll position: scrolling down increases
/// the offset, scrolling up decreases it, and it never goes negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollTracker {
    offset: f32,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a wheel delta in virtual pixels. Returns the new offset.
    pub fn scroll(&mut self, delta: f32) -> f32 {
        self.offset = (self.offset + delta).max(0.0);
        self.offset
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_center() {
        let tracker = PointerTracker::new(800, 600);
        assert_eq!(tracker.ndc(), PointerNdc::new(0.0, 0.0));
    }

    #[test]
    fn motion_updates_ndc() {
        let mut tracker = PointerTracker::new(800, 600);
        tracker.pointer_moved(0.0, 0.0);
        assert_eq!(tracker.ndc(), PointerNdc::new(-1.0, 1.0));
        tracker.pointer_moved(800.0, 600.0);
        assert_eq!(tracker.ndc(), PointerNdc::new(1.0, -1.0));
    }

    #[test]
    fn resize_reprojects_last_position() {
        let mut tracker = PointerTracker::new(800, 600);
        tracker.pointer_moved(400.0, 300.0);
        assert_eq!(tracker.ndc(), PointerNdc::new(0.0, 0.0));

        // Same pixel is no longer the center after shrinking the viewport.
        tracker.viewport_resized(400, 300);
        assert_eq!(tracker.ndc(), PointerNdc::new(1.0, -1.0));
        assert_eq!(tracker.viewport(), (400, 300));
    }

    #[test]
    fn scroll_accumulates_and_clamps() {
        let mut scroll = ScrollTracker::new();
        assert_eq!(scroll.scroll(100.0), 100.0);
        assert_eq!(scroll.scroll(50.0), 150.0);
        assert_eq!(scroll.scroll(-500.0), 0.0);
        assert_eq!(scroll.offset(), 0.0);
    }
}
