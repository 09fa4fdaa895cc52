use std::{fmt::Display, ops::Range, str::FromStr};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{color::Color, face::Face};

/// The supported puzzles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "3x3")]
    Cube3x3,
    #[serde(rename = "2x2")]
    Cube2x2,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown puzzle `{0}`, expected `3x3` or `2x2`")]
pub struct ParseVariantError(pub String);

impl Variant {
    /// Stickers along one edge of a face.
    pub fn side(self) -> usize {
        match self {
            Variant::Cube3x3 => 3,
            Variant::Cube2x2 => 2,
        }
    }

    /// Also the per-color budget: no color may cover more than one face.
    pub fn stickers_per_face(self) -> usize {
        self.side() * self.side()
    }

    pub fn sticker_count(self) -> usize {
        6 * self.stickers_per_face()
    }

    /// Sticker indices that are fixed centers. The 2x2 has none.
    pub fn centers(self) -> impl Iterator<Item = usize> {
        let per_face = self.stickers_per_face();
        let has_center = self.side() % 2 == 1;

        Face::ALL
            .into_iter()
            .filter(move |_| has_center)
            .map(move |face| face.slot() * per_face + per_face / 2)
    }

    /// The product name the storefront lists this puzzle under.
    pub fn product_name(self) -> &'static str {
        match self {
            Variant::Cube3x3 => "Rubik's 3x3",
            Variant::Cube2x2 => "Rubik's Apprentice 2x2",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Cube3x3 => f.write_str("3x3"),
            Variant::Cube2x2 => f.write_str("2x2"),
        }
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Product names are published with both straight and curly apostrophes
        match s.trim().replace('\u{2019}', "'").as_str() {
            "3x3" | "Rubik's 3x3" => Ok(Variant::Cube3x3),
            "2x2" | "Rubik's Apprentice 2x2" => Ok(Variant::Cube2x2),
            _ => Err(ParseVariantError(s.to_owned())),
        }
    }
}

/// The sticker colors of one puzzle, laid out face by face in the order
/// Up, Left, Front, Right, Back, Down. Each face is stored row-major as seen
/// from outside the cube.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCubeState")]
pub struct CubeState {
    variant: Variant,
    stickers: Vec<Color>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("A {variant} cube has {expected} stickers, got {actual}")]
pub struct StickerCountError {
    pub variant: Variant,
    pub expected: usize,
    pub actual: usize,
}

#[derive(Deserialize)]
struct RawCubeState {
    variant: Variant,
    stickers: Vec<Color>,
}

impl TryFrom<RawCubeState> for CubeState {
    type Error = StickerCountError;

    fn try_from(raw: RawCubeState) -> Result<Self, Self::Error> {
        let actual = raw.stickers.len();
        CubeState::from_stickers(raw.variant, raw.stickers).ok_or(StickerCountError {
            variant: raw.variant,
            expected: raw.variant.sticker_count(),
            actual,
        })
    }
}

impl CubeState {
    /// A solved cube: every face solid in its home color.
    pub fn solved(variant: Variant) -> CubeState {
        let stickers = Face::ALL
            .into_iter()
            .flat_map(|face| vec![face.home_color(); variant.stickers_per_face()])
            .collect_vec();

        CubeState { variant, stickers }
    }

    /// Adopt an existing sticker array.
    ///
    /// Returns `None` if the length doesn't match the variant.
    pub fn from_stickers(variant: Variant, stickers: Vec<Color>) -> Option<CubeState> {
        (stickers.len() == variant.sticker_count()).then_some(CubeState { variant, stickers })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn stickers(&self) -> &[Color] {
        &self.stickers
    }

    pub(crate) fn stickers_mut(&mut self) -> &mut [Color] {
        &mut self.stickers
    }

    pub fn sticker(&self, index: usize) -> Option<Color> {
        self.stickers.get(index).copied()
    }

    pub fn face_range(&self, face: Face) -> Range<usize> {
        let per_face = self.variant.stickers_per_face();
        face.slot() * per_face..(face.slot() + 1) * per_face
    }

    pub fn face(&self, face: Face) -> &[Color] {
        &self.stickers[self.face_range(face)]
    }

    pub fn count(&self, color: Color) -> usize {
        self.stickers.iter().filter(|&&sticker| sticker == color).count()
    }

    /// Whether every face shows a single painted color.
    pub fn is_solved(&self) -> bool {
        !self.stickers.contains(&Color::Blank)
            && Face::ALL
                .into_iter()
                .all(|face| self.face(face).iter().all_equal())
    }

    /// Restore the canonical solved coloring, regardless of prior state.
    pub fn reset(&mut self) {
        *self = CubeState::solved(self.variant);
        debug!(target: "state", "Reset {} cube", self.variant);
    }

    /// Blank out every sticker for manual entry.
    pub fn clear(&mut self) {
        self.stickers.fill(Color::Blank);
        debug!(target: "state", "Cleared {} cube", self.variant);
    }

    /// Overwrite the whole cube with random colors that respect the color
    /// budget. On the 3x3 the centers are seeded with their home colors first
    /// and the remaining stickers are drawn from a shrinking pool.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        let per_face = self.variant.stickers_per_face();
        let centers = self.variant.centers().collect_vec();

        for &center in &centers {
            self.stickers[center] = Face::ALL[center / per_face].home_color();
        }

        let mut pool = Color::PALETTE
            .into_iter()
            .map(|color| (color, per_face - usize::from(!centers.is_empty())))
            .collect_vec();

        for (index, sticker) in self.stickers.iter_mut().enumerate() {
            if centers.contains(&index) {
                continue;
            }

            let pick = rng.usize(..pool.len());
            let (color, remaining) = &mut pool[pick];
            *sticker = *color;
            *remaining -= 1;

            if *remaining == 0 {
                pool.swap_remove(pick);
            }
        }

        debug!(target: "state", "Randomized {} cube", self.variant);
    }
}
