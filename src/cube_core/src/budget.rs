use log::{debug, info};
use thiserror::Error;

use crate::{color::Color, state::CubeState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    #[error(
        "Each color can only appear {limit} times (one complete face). You already have {count} stickers with {color}."
    )]
    LimitExceeded {
        color: Color,
        limit: usize,
        count: usize,
    },
    #[error("Sticker {index} is out of range for a cube with {len} stickers")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{0} has used up its budget and can't be selected")]
    ColorDisabled(Color),
    #[error("No color selected")]
    NoColorSelected,
}

/// What a successful paint did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Painted {
    /// The sticker already had the color.
    Unchanged,
    Changed { previous: Color },
}

/// How many stickers of each palette color a state holds, measured against
/// the per-color limit of one full face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBudget {
    limit: usize,
    counts: [usize; 6],
}

impl ColorBudget {
    pub fn of(state: &CubeState) -> ColorBudget {
        let mut counts = [0; 6];

        for index in state.stickers().iter().filter_map(|color| color.palette_index()) {
            counts[index] += 1;
        }

        ColorBudget {
            limit: state.variant().stickers_per_face(),
            counts,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Occurrences of `color`. Blank stickers aren't budgeted and count as
    /// zero.
    pub fn count(&self, color: Color) -> usize {
        color.palette_index().map_or(0, |index| self.counts[index])
    }

    pub fn is_exhausted(&self, color: Color) -> bool {
        color
            .palette_index()
            .is_some_and(|index| self.counts[index] >= self.limit)
    }

    /// Check whether a sticker currently showing `current` may be repainted
    /// with `target`.
    ///
    /// # Errors
    ///
    /// `PaintError::LimitExceeded` if `target` already covers a full face and
    /// the sticker doesn't already show it.
    pub fn admit(&self, current: Color, target: Color) -> Result<(), PaintError> {
        if current != target && self.is_exhausted(target) {
            return Err(PaintError::LimitExceeded {
                color: target,
                limit: self.limit,
                count: self.count(target),
            });
        }

        Ok(())
    }
}

impl CubeState {
    /// Paint one sticker, subject to the color budget. Rejected paints leave
    /// the state untouched.
    ///
    /// # Errors
    ///
    /// If the index is out of range or the color's budget is used up.
    pub fn paint(&mut self, index: usize, color: Color) -> Result<Painted, PaintError> {
        let current = self.sticker(index).ok_or(PaintError::IndexOutOfRange {
            index,
            len: self.stickers().len(),
        })?;

        if current == color {
            return Ok(Painted::Unchanged);
        }

        if let Err(e) = ColorBudget::of(self).admit(current, color) {
            info!(target: "paint", "Rejected painting sticker {index} {color}: {e}");
            return Err(e);
        }

        self.stickers_mut()[index] = color;
        debug!(target: "paint", "Painted sticker {index} {color} over {current}");

        Ok(Painted::Changed { previous: current })
    }
}

/// The color picker: a selected brush plus which colors have run out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    selected: Option<Color>,
    disabled: [bool; 6],
}

impl Palette {
    pub fn for_state(state: &CubeState) -> Palette {
        let mut palette = Palette::default();
        palette.refresh_all(state);
        palette
    }

    pub fn selected(&self) -> Option<Color> {
        self.selected
    }

    pub fn is_disabled(&self, color: Color) -> bool {
        color
            .palette_index()
            .is_some_and(|index| self.disabled[index])
    }

    pub fn disabled_colors(&self) -> impl Iterator<Item = Color> + '_ {
        Color::PALETTE
            .into_iter()
            .filter(|&color| self.is_disabled(color))
    }

    /// Choose the brush color.
    ///
    /// # Errors
    ///
    /// A disabled color can't be picked.
    pub fn select(&mut self, color: Color) -> Result<(), PaintError> {
        if self.is_disabled(color) {
            return Err(PaintError::ColorDisabled(color));
        }

        self.selected = Some(color);
        Ok(())
    }

    /// Recompute the disabled flag of one color.
    pub fn refresh(&mut self, state: &CubeState, color: Color) {
        if let Some(index) = color.palette_index() {
            self.disabled[index] = ColorBudget::of(state).is_exhausted(color);
        }
    }

    pub fn refresh_all(&mut self, state: &CubeState) {
        let budget = ColorBudget::of(state);

        for (disabled, color) in self.disabled.iter_mut().zip(Color::PALETTE) {
            *disabled = budget.is_exhausted(color);
        }
    }

    /// Paint a sticker with the selected color and update the flags of the
    /// colors involved.
    ///
    /// # Errors
    ///
    /// If nothing is selected, or see [`CubeState::paint`].
    pub fn paint(&mut self, state: &mut CubeState, index: usize) -> Result<Painted, PaintError> {
        let color = self.selected.ok_or(PaintError::NoColorSelected)?;
        let painted = state.paint(index, color)?;

        if let Painted::Changed { previous } = painted {
            self.refresh(state, color);
            self.refresh(state, previous);
        }

        Ok(painted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Variant;

    fn with_nine_whites() -> CubeState {
        // Solved already has nine whites on the up face
        CubeState::solved(Variant::Cube3x3)
    }

    #[test]
    fn test_rejects_color_over_budget() {
        let mut state = with_nine_whites();
        let before = state.clone();

        let result = state.paint(20, Color::White);
        assert_eq!(
            result,
            Err(PaintError::LimitExceeded {
                color: Color::White,
                limit: 9,
                count: 9
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_limit_message_names_color_and_budget() {
        let error = PaintError::LimitExceeded {
            color: Color::White,
            limit: 9,
            count: 9,
        };
        assert_eq!(
            error.to_string(),
            "Each color can only appear 9 times (one complete face). You already have 9 stickers with White."
        );
    }

    #[test]
    fn test_same_color_is_a_no_op() {
        let mut state = with_nine_whites();
        assert_eq!(state.paint(0, Color::White), Ok(Painted::Unchanged));
        assert_eq!(state, with_nine_whites());
    }

    #[test]
    fn test_other_color_under_budget_succeeds() {
        let mut state = with_nine_whites();
        state.clear();
        for index in 0..9 {
            state.paint(index, Color::White).unwrap();
        }

        assert!(state.paint(20, Color::White).is_err());
        assert_eq!(
            state.paint(20, Color::Green),
            Ok(Painted::Changed {
                previous: Color::Blank
            })
        );
        assert_eq!(state.sticker(20), Some(Color::Green));
    }

    #[test]
    fn test_out_of_range() {
        let mut state = CubeState::solved(Variant::Cube2x2);
        assert_eq!(
            state.paint(24, Color::Red),
            Err(PaintError::IndexOutOfRange { index: 24, len: 24 })
        );
    }

    #[test]
    fn test_blank_is_never_budgeted() {
        let mut state = CubeState::solved(Variant::Cube2x2);
        state.clear();
        let budget = ColorBudget::of(&state);
        assert_eq!(budget.count(Color::Blank), 0);
        assert!(!budget.is_exhausted(Color::Blank));
        assert_eq!(budget.limit(), 4);
    }

    #[test]
    fn test_palette_disables_and_reenables() {
        let mut state = CubeState::solved(Variant::Cube2x2);
        state.clear();
        let mut palette = Palette::for_state(&state);
        assert_eq!(palette.disabled_colors().count(), 0);
        assert_eq!(palette.paint(&mut state, 0), Err(PaintError::NoColorSelected));

        palette.select(Color::Red).unwrap();
        for index in 0..4 {
            palette.paint(&mut state, index).unwrap();
        }
        assert!(palette.is_disabled(Color::Red));
        assert_eq!(
            palette.select(Color::Red),
            Err(PaintError::ColorDisabled(Color::Red))
        );
        // Still the brush, but the budget refuses it
        assert_eq!(palette.selected(), Some(Color::Red));
        assert!(palette.paint(&mut state, 4).is_err());

        palette.select(Color::Blue).unwrap();
        palette.paint(&mut state, 0).unwrap();
        assert!(!palette.is_disabled(Color::Red));
        assert_eq!(state.count(Color::Red), 3);
    }

    #[test]
    fn test_cannot_select_disabled_color() {
        let state = CubeState::solved(Variant::Cube3x3);
        let mut palette = Palette::for_state(&state);
        assert_eq!(palette.disabled_colors().count(), 6);
        assert_eq!(
            palette.select(Color::Green),
            Err(PaintError::ColorDisabled(Color::Green))
        );
        assert_eq!(palette.selected(), None);
    }
}
