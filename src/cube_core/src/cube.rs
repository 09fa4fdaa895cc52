use log::info;

use crate::{
    budget::{PaintError, Painted, Palette},
    color::Color,
    moves::{Move, MoveSequence, Turn},
    rotation::RotationEngine,
    state::{CubeState, Variant},
};

/// A cube state bound to the rotation tables of its variant, so the two can
/// never disagree.
#[derive(Debug, Clone)]
pub struct Cube {
    state: CubeState,
    engine: &'static RotationEngine,
}

impl Cube {
    pub fn new(variant: Variant) -> Cube {
        Cube {
            state: CubeState::solved(variant),
            engine: RotationEngine::for_variant(variant),
        }
    }

    /// Wrap an existing state.
    pub fn from_state(state: CubeState) -> Cube {
        Cube {
            engine: RotationEngine::for_variant(state.variant()),
            state,
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn variant(&self) -> Variant {
        self.state.variant()
    }

    /// Switch puzzles. The new puzzle starts solved.
    pub fn set_variant(&mut self, variant: Variant) {
        if variant != self.variant() {
            info!(target: "state", "Switching from {} to {variant}", self.variant());
            *self = Cube::new(variant);
        }
    }

    pub fn turn(&mut self, turn: Turn) {
        self.engine.apply_turn(&mut self.state, turn);
    }

    pub fn apply(&mut self, move_: Move) {
        self.engine.apply_move(&mut self.state, move_);
    }

    pub fn apply_sequence(&mut self, sequence: &MoveSequence) {
        self.engine.apply_sequence(&mut self.state, sequence);
    }

    /// See [`RotationEngine::apply_token`].
    pub fn apply_token(&mut self, token: &str) -> bool {
        self.engine.apply_token(&mut self.state, token)
    }

    /// See [`CubeState::paint`].
    ///
    /// # Errors
    ///
    /// If the index is out of range or the color's budget is used up.
    pub fn paint(&mut self, index: usize, color: Color) -> Result<Painted, PaintError> {
        self.state.paint(index, color)
    }

    /// Paint with the palette's selected color.
    ///
    /// # Errors
    ///
    /// See [`Palette::paint`].
    pub fn paint_with(&mut self, palette: &mut Palette, index: usize) -> Result<Painted, PaintError> {
        palette.paint(&mut self.state, index)
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        self.state.randomize(rng);
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
}
