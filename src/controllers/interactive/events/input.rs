/// User input consumed by the generator and the render loop.
///
/// Values are produced by the windowing layer and moved into the event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The framebuffer now measures `width` x `height` pixels.
    Resize { width: u32, height: u32 },
    /// Scroll-wheel movement; positive zooms in.
    ZoomDelta(f64),
    /// Relative pointer motion in screen pixels.
    PanDelta { dx: f64, dy: f64 },
    /// Cycles the resolution divisor.
    ResolutionToggle,
    /// Saves the displayed image to disk.
    ExportRequested,
    /// Toggles pointer capture on the display.
    DisplayToggle,
}

impl InputEvent {
    /// Whether the event is routed to the generator rather than handled on
    /// the render thread.
    #[must_use]
    pub fn affects_view(&self) -> bool {
        match self {
            Self::Resize { .. }
            | Self::ZoomDelta(_)
            | Self::PanDelta { .. }
            | Self::ResolutionToggle => true,
            Self::ExportRequested | Self::DisplayToggle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_events_are_routed_to_the_generator() {
        assert!(InputEvent::Resize { width: 1, height: 1 }.affects_view());
        assert!(InputEvent::ZoomDelta(1.0).affects_view());
        assert!(InputEvent::PanDelta { dx: 1.0, dy: 0.0 }.affects_view());
        assert!(InputEvent::ResolutionToggle.affects_view());
    }

    #[test]
    fn test_commands_stay_on_the_render_thread() {
        assert!(!InputEvent::ExportRequested.affects_view());
        assert!(!InputEvent::DisplayToggle.affects_view());
    }
}
