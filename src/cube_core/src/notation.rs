//! Encodings the detection and solver endpoints expect. Both list the faces
//! in U, R, F, D, L, B order rather than the storage order.

use thiserror::Error;

use crate::{color::Color, face::Face, state::CubeState, state::Variant};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Sticker {index} is blank and has no face letter")]
    BlankSticker { index: usize },
}

impl CubeState {
    /// Sticker indices in endpoint face order.
    fn urfdlb_indices(&self) -> impl Iterator<Item = usize> + '_ {
        Face::URFDLB
            .into_iter()
            .flat_map(|face| self.face_range(face))
    }

    /// The state as one letter per sticker, e.g. `UUUUUUUUURRR...` for a
    /// solved 3x3.
    ///
    /// # Errors
    ///
    /// If any sticker is blank.
    pub fn face_notation(&self) -> Result<String, NotationError> {
        self.urfdlb_indices()
            .map(|index| {
                self.stickers()[index]
                    .notation()
                    .ok_or(NotationError::BlankSticker { index })
            })
            .collect()
    }

    /// The sticker array as the remote solver wants it: reordered into
    /// endpoint face order for the 3x3, untouched for the 2x2.
    pub fn solver_stickers(&self) -> Vec<Color> {
        match self.variant() {
            Variant::Cube3x3 => self
                .urfdlb_indices()
                .map(|index| self.stickers()[index])
                .collect(),
            Variant::Cube2x2 => self.stickers().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_notation() {
        let state = CubeState::solved(Variant::Cube3x3);
        let expected = ["U", "R", "F", "D", "L", "B"].map(|l| l.repeat(9)).concat();
        assert_eq!(state.face_notation().unwrap(), expected);

        let state = CubeState::solved(Variant::Cube2x2);
        assert_eq!(state.face_notation().unwrap().len(), 24);
    }

    #[test]
    fn test_blank_sticker_fails() {
        let mut state = CubeState::solved(Variant::Cube3x3);
        state.paint(30, Color::Blank).unwrap();

        // Right is the second face in endpoint order
        assert_eq!(
            state.face_notation(),
            Err(NotationError::BlankSticker { index: 30 })
        );
    }

    #[test]
    fn test_solver_order() {
        let state = CubeState::solved(Variant::Cube3x3);
        let stickers = state.solver_stickers();
        assert_eq!(stickers[0], Color::White);
        assert_eq!(stickers[9], Color::Red);
        assert_eq!(stickers[18], Color::Green);
        assert_eq!(stickers[27], Color::Yellow);
        assert_eq!(stickers[36], Color::Orange);
        assert_eq!(stickers[45], Color::Blue);

        let state = CubeState::solved(Variant::Cube2x2);
        assert_eq!(state.solver_stickers(), state.stickers());
    }
}
