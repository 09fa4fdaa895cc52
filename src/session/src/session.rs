use std::path::PathBuf;

use cube_core::{
    Color, Cube, CubeState, Move, MoveSequence, NotationError, PaintError, Painted, Palette,
    Scrambler, Variant,
};
use crossbeam_channel::Receiver;
use log::{info, warn};
use thiserror::Error;

use crate::{
    config::PlaybackConfig,
    device_log::DeviceLog,
    pacing::Pacer,
    playback,
    remote::{DetectionRequest, FaceDetector, RemoteSolver, SolveRequest},
    store::{KeyValueStore, StoreError},
};

pub const ACCOUNT_KEY: &str = "account";
pub const VARIANT_KEY: &str = "variant";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Not logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("Remote solver failed: {0}")]
    Solver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Everything one user interacts with: the cube, the palette, their account
/// and the device console. Nothing here is global, so several sessions can
/// live side by side.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    username: Option<String>,
    cube: Cube,
    palette: Palette,
    config: PlaybackConfig,
    device_log: DeviceLog,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore the account and last puzzle from `store`. A missing or unknown
    /// puzzle falls back to the 3x3.
    ///
    /// # Errors
    ///
    /// If the store can't be read.
    pub fn open(store: S, config: PlaybackConfig) -> Result<Session<S>, SessionError> {
        let username = store.get(ACCOUNT_KEY)?;
        let variant = match store.get(VARIANT_KEY)? {
            Some(name) => name.parse().unwrap_or_else(|e| {
                warn!(target: "session", "{e}, falling back to 3x3");
                Variant::Cube3x3
            }),
            None => Variant::Cube3x3,
        };

        let cube = Cube::new(variant);
        info!(
            target: "session",
            "Opened session for {} on {variant}",
            username.as_deref().unwrap_or("<anonymous>")
        );

        Ok(Session {
            palette: Palette::for_state(cube.state()),
            device_log: DeviceLog::new(username.as_deref()),
            store,
            username,
            cube,
            config,
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// # Errors
    ///
    /// If the account can't be persisted.
    pub fn log_in(&mut self, username: &str) -> Result<(), SessionError> {
        self.store.set(ACCOUNT_KEY, username)?;
        self.username = Some(username.to_owned());
        self.device_log = DeviceLog::new(Some(username));
        info!(target: "session", "Logged in as {username}");
        Ok(())
    }

    /// # Errors
    ///
    /// If the account can't be removed from the store.
    pub fn log_out(&mut self) -> Result<(), SessionError> {
        self.store.remove(ACCOUNT_KEY)?;
        self.username = None;
        self.device_log = DeviceLog::default();
        Ok(())
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn state(&self) -> &CubeState {
        self.cube.state()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn device_log(&self) -> &DeviceLog {
        &self.device_log
    }

    /// Switch puzzles and remember the choice.
    ///
    /// # Errors
    ///
    /// If the choice can't be persisted.
    pub fn set_variant(&mut self, variant: Variant) -> Result<(), SessionError> {
        self.store.set(VARIANT_KEY, &variant.to_string())?;
        self.cube.set_variant(variant);
        self.palette.refresh_all(self.cube.state());
        Ok(())
    }

    /// # Errors
    ///
    /// If the color has used up its budget.
    pub fn select(&mut self, color: Color) -> Result<(), PaintError> {
        self.palette.select(color)
    }

    /// Paint with the selected color.
    ///
    /// # Errors
    ///
    /// See [`Palette::paint`].
    pub fn paint(&mut self, index: usize) -> Result<Painted, PaintError> {
        self.cube.paint_with(&mut self.palette, index)
    }

    pub fn reset(&mut self) {
        self.cube.reset();
        self.palette.refresh_all(self.cube.state());
    }

    pub fn clear(&mut self) {
        self.cube.clear();
        self.palette.refresh_all(self.cube.state());
    }

    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        self.cube.randomize(rng);
        self.palette.refresh_all(self.cube.state());
    }

    /// Apply a move immediately.
    pub fn apply(&mut self, move_: Move) {
        self.cube.apply(move_);
    }

    /// Generate a scramble and animate it on the current cube.
    pub fn scramble(
        &mut self,
        scrambler: &mut Scrambler,
        pacer: &mut impl Pacer,
        on_step: impl FnMut(Move, &CubeState),
    ) -> MoveSequence {
        let scramble = scrambler.generate(self.config.scramble_length);
        playback::play_scramble(
            &mut self.cube,
            &scramble,
            self.config.scramble_delay(),
            pacer,
            on_step,
        );
        scramble
    }

    /// # Errors
    ///
    /// If nobody is logged in.
    pub fn solve_request(&self) -> Result<SolveRequest, SessionError> {
        let username = self.username.as_deref().ok_or(SessionError::NotLoggedIn)?;
        Ok(SolveRequest::new(self.cube.state(), username))
    }

    /// Ask the solver for a solution and play it back. Returns the number of
    /// quarter turns played.
    ///
    /// # Errors
    ///
    /// If nobody is logged in or the solver fails. Bad tokens in the answer
    /// are skipped, not errors.
    pub fn solve<R: RemoteSolver>(
        &mut self,
        solver: &R,
        pacer: &mut impl Pacer,
        on_step: impl FnMut(Move, &CubeState),
    ) -> Result<usize, SessionError> {
        let request = self.solve_request()?;
        let solution = solver
            .solve(&request)
            .map_err(|e| SessionError::Solver(Box::new(e)))?;

        Ok(playback::play_solution(
            &mut self.cube,
            &solution,
            self.config.solve_delay(),
            pacer,
            on_step,
        ))
    }

    /// Hand face photos to the detector along with the painted cube.
    ///
    /// # Errors
    ///
    /// If the cube has blank stickers.
    pub fn detect<D: FaceDetector>(
        &self,
        detector: &D,
        images: [PathBuf; 6],
    ) -> Result<(), SessionError> {
        let request = DetectionRequest::new(self.cube.state(), images)?;
        info!(target: "session", "Submitting {} face images for detection", request.faces.len());
        detector.submit(request);
        Ok(())
    }

    /// Pull pending device notifications into the console.
    pub fn poll_devices(&mut self, notifications: &Receiver<String>) -> usize {
        self.device_log.drain(notifications)
    }
}
