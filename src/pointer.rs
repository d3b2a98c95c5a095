//! Pointer state tracking.
//!
//! Feeds the orbit camera rig; the chase rig ignores it. Mutated only by the
//! raw mouse event handlers, read once per frame via [`PointerState::drag_delta`].

pub struct PointerState {
    pub down: bool,
    pub position: (f32, f32),
    pub last_position: (f32, f32),
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            down: false,
            position: (0.0, 0.0),
            last_position: (0.0, 0.0),
        }
    }

    /// Consume the drag delta accumulated since the previous frame.
    ///
    /// Returns `None` unless the button is held. Always resynchronizes
    /// `last_position` so a delta is never applied twice.
    pub fn drag_delta(&mut self) -> Option<(f32, f32)> {
        let dx = self.position.0 - self.last_position.0;
        let dy = self.position.1 - self.last_position.1;
        self.last_position = self.position;
        if self.down && (dx.abs() > 0.1 || dy.abs() > 0.1) {
            Some((dx, dy))
        } else {
            None
        }
    }

    /// Clear pointer capture state on teardown.
    pub fn reset(&mut self) {
        self.down = false;
        self.last_position = self.position;
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_delta_while_button_up() {
        let mut pointer = PointerState::new();
        pointer.position = (40.0, 20.0);
        assert_eq!(pointer.drag_delta(), None);
    }

    #[test]
    fn delta_consumed_once() {
        let mut pointer = PointerState::new();
        pointer.down = true;
        pointer.position = (10.0, -5.0);
        assert_eq!(pointer.drag_delta(), Some((10.0, -5.0)));
        assert_eq!(pointer.drag_delta(), None);
    }

    #[test]
    fn reset_clears_capture() {
        let mut pointer = PointerState::new();
        pointer.down = true;
        pointer.position = (3.0, 3.0);
        pointer.reset();
        assert!(!pointer.down);
        assert_eq!(pointer.drag_delta(), None);
    }
}
