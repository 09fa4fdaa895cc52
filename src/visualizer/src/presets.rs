use log::debug;

use crate::momentum::Orientation;

const UPRIGHT_PITCH: f64 = -32.0;
const UPRIGHT_YAW: [f64; 4] = [-48.0, 225.0, 130.0, 45.0];
const UPSIDE_DOWN_PITCH: f64 = 148.0;
const UPSIDE_DOWN_YAW: [f64; 4] = [230.0, 680.0, 410.0, 140.0];

/// The fixed viewing angles the rotate buttons step through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presets {
    index: usize,
    upside_down: bool,
}

impl Presets {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn is_upside_down(self) -> bool {
        self.upside_down
    }

    pub fn orientation(self) -> Orientation {
        if self.upside_down {
            Orientation::new(UPSIDE_DOWN_PITCH, UPSIDE_DOWN_YAW[self.index])
        } else {
            Orientation::new(UPRIGHT_PITCH, UPRIGHT_YAW[self.index])
        }
    }

    pub fn rotate_left(&mut self) -> Orientation {
        self.index = (self.index + 1) % UPRIGHT_YAW.len();
        self.changed()
    }

    pub fn rotate_right(&mut self) -> Orientation {
        self.index = (self.index + UPRIGHT_YAW.len() - 1) % UPRIGHT_YAW.len();
        self.changed()
    }

    pub fn flip(&mut self) -> Orientation {
        self.upside_down = !self.upside_down;
        self.changed()
    }

    fn changed(self) -> Orientation {
        let orientation = self.orientation();
        debug!(target: "view", "Preset {} (upside down: {}): {orientation:?}", self.index, self.upside_down);
        orientation
    }
}
