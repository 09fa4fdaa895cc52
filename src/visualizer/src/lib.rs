#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

use std::time::Instant;

use session::PlaybackConfig;

pub mod momentum;
pub mod net;
pub mod presets;
pub mod view;

pub use momentum::{DragController, Orientation, Physics, Velocity, step};
pub use presets::Presets;
pub use view::{FlatFit, Size, ViewMode, ViewSwitcher, fit_scale};

/// What the cube panel shows: the 3D cube's orientation, the preset buttons
/// and which view is up.
#[derive(Debug, Clone)]
pub struct Viewport {
    drag: DragController,
    presets: Presets,
    switcher: ViewSwitcher,
}

impl Viewport {
    /// `net` is the natural size of the unfolded net.
    pub fn new(config: &PlaybackConfig, net: Size) -> Viewport {
        let presets = Presets::default();

        Viewport {
            drag: DragController::new(Physics::from(config), presets.orientation()),
            presets,
            switcher: ViewSwitcher::new(config, net),
        }
    }

    pub fn drag(&mut self) -> &mut DragController {
        &mut self.drag
    }

    pub fn switcher(&mut self) -> &mut ViewSwitcher {
        &mut self.switcher
    }

    pub fn mode(&self) -> ViewMode {
        self.switcher.mode()
    }

    pub fn rotate_left(&mut self) {
        let orientation = self.presets.rotate_left();
        self.drag.snap_to(orientation);
    }

    pub fn rotate_right(&mut self) {
        let orientation = self.presets.rotate_right();
        self.drag.snap_to(orientation);
    }

    pub fn flip(&mut self) {
        let orientation = self.presets.flip();
        self.drag.snap_to(orientation);
    }

    /// Switch views; see [`ViewSwitcher::switch_to`].
    pub fn show(&mut self, mode: ViewMode, container: Size, now: Instant) -> bool {
        self.switcher.switch_to(mode, container, now)
    }

    pub fn transform(&self) -> String {
        self.drag.transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_snap_then_drag_continues_from_there() {
        let mut viewport = Viewport::new(&PlaybackConfig::default(), Size::new(400.0, 300.0));
        assert_eq!(viewport.transform(), "rotateX(-32deg) rotateY(-48deg)");

        viewport.rotate_left();
        assert_eq!(viewport.transform(), "rotateX(-32deg) rotateY(225deg)");
        assert!(viewport.drag().is_button_rotating());

        let now = Instant::now();
        viewport.drag().press(0.0, 0.0, now);
        viewport.drag().drag_to(10.0, 0.0, now + std::time::Duration::from_millis(50));
        assert_eq!(viewport.transform(), "rotateX(-32deg) rotateY(230deg)");
    }

    #[test]
    fn test_flip_and_show() {
        let mut viewport = Viewport::new(&PlaybackConfig::default(), Size::new(400.0, 300.0));
        viewport.flip();
        assert_eq!(viewport.transform(), "rotateX(148deg) rotateY(230deg)");

        assert!(viewport.show(ViewMode::Flat, Size::new(200.0, 200.0), Instant::now()));
        assert_eq!(viewport.mode(), ViewMode::Flat);
    }
}
