//! Pointer-drag rotation of the 3D cube, with coasting after release.

use std::time::Instant;

use log::{debug, trace};
use session::PlaybackConfig;

/// Milliseconds in one frame at 60 fps. Velocities are in degrees per frame.
const FRAME_MS: f64 = 16.0;

/// Pitch (`x`) and yaw (`y`) of the cube, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
}

impl Orientation {
    pub fn new(x: f64, y: f64) -> Orientation {
        Orientation { x, y }
    }

    /// The CSS transform for this orientation.
    pub fn transform(self) -> String {
        format!("rotateX({}deg) rotateY({}deg)", self.x, self.y)
    }
}

/// Angular velocity in degrees per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    fn exceeds(self, threshold: f64) -> bool {
        self.x.abs() > threshold || self.y.abs() > threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Degrees of rotation per pixel dragged.
    pub sensitivity: f64,
    /// Velocity multiplier per coasting frame.
    pub friction: f64,
    pub release_threshold: f64,
    pub stop_threshold: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Physics::from(&PlaybackConfig::default())
    }
}

impl From<&PlaybackConfig> for Physics {
    fn from(config: &PlaybackConfig) -> Self {
        Physics {
            sensitivity: config.drag_sensitivity,
            friction: config.friction,
            release_threshold: config.release_threshold,
            stop_threshold: config.stop_threshold,
        }
    }
}

/// Advance a coasting cube by one frame: move by the velocity, then decay
/// it. Returns `None` for the velocity once it's too small to keep going.
pub fn step(
    orientation: Orientation,
    velocity: Velocity,
    physics: &Physics,
) -> (Orientation, Option<Velocity>) {
    let orientation = Orientation {
        x: orientation.x + velocity.x,
        y: orientation.y + velocity.y,
    };

    let velocity = Velocity {
        x: velocity.x * physics.friction,
        y: velocity.y * physics.friction,
    };

    (
        orientation,
        velocity.exceeds(physics.stop_threshold).then_some(velocity),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Dragging { x: f64, y: f64, at: Instant },
    Coasting(Velocity),
}

/// Tracks a drag gesture and the coasting that follows it. The host feeds
/// pointer events in and calls [`DragController::frame`] once per animation
/// frame.
#[derive(Debug, Clone)]
pub struct DragController {
    physics: Physics,
    orientation: Orientation,
    velocity: Velocity,
    motion: Motion,
    button_rotating: bool,
}

impl DragController {
    pub fn new(physics: Physics, orientation: Orientation) -> DragController {
        DragController {
            physics,
            orientation,
            velocity: Velocity::default(),
            motion: Motion::Idle,
            button_rotating: false,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging { .. })
    }

    pub fn is_coasting(&self) -> bool {
        matches!(self.motion, Motion::Coasting(_))
    }

    /// Whether the last orientation change came from a preset button and
    /// should be animated.
    pub fn is_button_rotating(&self) -> bool {
        self.button_rotating
    }

    /// Pointer down. Any coasting stops dead.
    pub fn press(&mut self, x: f64, y: f64, at: Instant) {
        if self.is_coasting() {
            debug!(target: "momentum", "Coasting cancelled by a new drag");
        }

        self.velocity = Velocity::default();
        self.button_rotating = false;
        self.motion = Motion::Dragging { x, y, at };
    }

    /// Pointer moved. Ignored unless a drag is in progress.
    pub fn drag_to(&mut self, x: f64, y: f64, at: Instant) {
        let Motion::Dragging {
            x: last_x,
            y: last_y,
            at: last_at,
        } = self.motion
        else {
            return;
        };

        // Screen y grows downwards, pitch grows upwards
        let dx = (x - last_x) * self.physics.sensitivity;
        let dy = -(y - last_y) * self.physics.sensitivity;

        let elapsed = at.saturating_duration_since(last_at).as_secs_f64() * 1000.0;
        if elapsed > 0.0 {
            self.velocity = Velocity {
                x: dy / elapsed * FRAME_MS,
                y: dx / elapsed * FRAME_MS,
            };
        }

        self.orientation.x += dy;
        self.orientation.y += dx;
        self.motion = Motion::Dragging { x, y, at };

        trace!(target: "momentum", "Dragged to {:?}", self.orientation);
    }

    /// Pointer up. Returns whether the cube keeps coasting.
    pub fn release(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }

        if self.velocity.exceeds(self.physics.release_threshold) {
            debug!(target: "momentum", "Released at {:?}, coasting", self.velocity);
            self.motion = Motion::Coasting(self.velocity);
            true
        } else {
            self.motion = Motion::Idle;
            false
        }
    }

    /// Advance one animation frame. Returns whether another frame is needed.
    pub fn frame(&mut self) -> bool {
        let Motion::Coasting(velocity) = self.motion else {
            return false;
        };

        let (orientation, velocity) = step(self.orientation, velocity, &self.physics);
        self.orientation = orientation;

        if let Some(velocity) = velocity {
            self.velocity = velocity;
            self.motion = Motion::Coasting(velocity);
            true
        } else {
            debug!(target: "momentum", "Coasting stopped at {:?}", self.orientation);
            self.velocity = Velocity::default();
            self.motion = Motion::Idle;
            false
        }
    }

    /// Stop any drag or coasting where the cube is now, e.g. when the view
    /// goes away. [`DragController::frame`] returns `false` afterwards.
    pub fn stop(&mut self) {
        if self.is_coasting() {
            debug!(target: "momentum", "Coasting stopped at {:?}", self.orientation);
        }

        self.velocity = Velocity::default();
        self.motion = Motion::Idle;
    }

    /// Jump to a preset orientation, animated by the host.
    pub fn snap_to(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.velocity = Velocity::default();
        self.motion = Motion::Idle;
        self.button_rotating = true;
    }

    pub fn transform(&self) -> String {
        self.orientation.transform()
    }
}

impl Default for DragController {
    fn default() -> Self {
        DragController::new(Physics::default(), Orientation::default())
    }
}
