use std::time::{Duration, Instant};

use log::{debug, info};
use session::PlaybackConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Cube,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }
}

/// The largest scale, never above 1, at which `content` fits inside
/// `container` with `margin` to spare. `None` if the content has no size
/// yet.
pub fn fit_scale(container: Size, content: Size, margin: f64) -> Option<f64> {
    if content.width <= 0.0 || content.height <= 0.0 {
        return None;
    }

    let scale_x = container.width * margin / content.width;
    let scale_y = container.height * margin / content.height;
    Some(scale_x.min(scale_y).min(1.0))
}

/// Keeps the unfolded net scaled to its container while attached.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFit {
    margin: f64,
    net: Size,
    attached: bool,
    scale: f64,
}

impl FlatFit {
    pub fn new(margin: f64, net: Size) -> FlatFit {
        FlatFit {
            margin,
            net,
            attached: false,
            scale: 1.0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Start observing the container, fitting right away.
    pub fn attach(&mut self, container: Size) {
        self.attached = true;
        self.fit(container);
    }

    /// A container resize. Ignored unless attached.
    pub fn resized(&mut self, container: Size) -> Option<f64> {
        if !self.attached {
            return None;
        }

        self.fit(container);
        Some(self.scale)
    }

    /// Stop observing and clear the scale.
    pub fn detach(&mut self) {
        self.attached = false;
        self.scale = 1.0;
    }

    fn fit(&mut self, container: Size) {
        if let Some(scale) = fit_scale(container, self.net, self.margin) {
            self.scale = scale;
        }
    }
}

/// Switches between the 3D cube and the flat net. A switch animates for a
/// while and further switches are refused until it's done.
#[derive(Debug, Clone)]
pub struct ViewSwitcher {
    mode: ViewMode,
    transition: Duration,
    busy_until: Option<Instant>,
    fit: FlatFit,
}

impl ViewSwitcher {
    pub fn new(config: &PlaybackConfig, net: Size) -> ViewSwitcher {
        ViewSwitcher {
            mode: ViewMode::Cube,
            transition: config.transition(),
            busy_until: None,
            fit: FlatFit::new(config.fit_margin, net),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn fit(&self) -> &FlatFit {
        &self.fit
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    /// Switch views. Returns `false` if a transition is still running or
    /// the view is already showing.
    pub fn switch_to(&mut self, mode: ViewMode, container: Size, now: Instant) -> bool {
        if self.is_transitioning(now) {
            debug!(target: "view", "Ignoring switch to {mode:?} mid-transition");
            return false;
        }

        if mode == self.mode {
            return false;
        }

        match mode {
            ViewMode::Flat => self.fit.attach(container),
            ViewMode::Cube => self.fit.detach(),
        }

        info!(target: "view", "Switching to {mode:?}");
        self.mode = mode;
        self.busy_until = Some(now + self.transition);
        true
    }

    /// Forward a container resize to the flat fit.
    pub fn resized(&mut self, container: Size) -> Option<f64> {
        self.fit.resized(container)
    }
}
