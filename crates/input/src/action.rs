/// A high-level interaction that any frontend can produce.
///
/// The application state consumes actions, never raw input events. This
/// keeps the desktop shell and headless drivers on the same logic path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Pointer moved to a viewport position in pixels, origin top-left.
    PointerMoved { x: f64, y: f64 },
    /// Primary button pressed at the current pointer position.
    Click,
    /// Scroll by a delta in virtual pixels; positive scrolls down.
    Scroll(f32),
    /// Viewport was resized.
    Resize { width: u32, height: u32 },
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_moved_is_constructible() {
        let a = Action::PointerMoved { x: 120.0, y: 80.0 };
        assert!(matches!(a, Action::PointerMoved { .. }));
    }

    #[test]
    fn scroll_carries_delta() {
        let a = Action::Scroll(50.0);
        assert_eq!(a, Action::Scroll(50.0));
    }

    #[test]
    fn resize_carries_dimensions() {
        let a = Action::Resize { width: 800, height: 600 };
        assert!(matches!(a, Action::Resize { width: 800, height: 600 }));
    }
}
