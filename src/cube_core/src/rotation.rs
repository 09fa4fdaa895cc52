use std::{collections::HashMap, sync::LazyLock};

use itertools::Itertools;
use log::{trace, warn};

use crate::{
    color::Color,
    face::Face,
    moves::{Direction, Move, MoveSequence, Turn},
    state::{CubeState, Variant},
};

static CUBE3X3: LazyLock<RotationEngine> = LazyLock::new(|| RotationEngine::new(Variant::Cube3x3));
static CUBE2X2: LazyLock<RotationEngine> = LazyLock::new(|| RotationEngine::new(Variant::Cube2x2));

/// A rearrangement of sticker positions, stored as the `(source, destination)`
/// pairs of every sticker it moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickerPermutation {
    pairs: Box<[(usize, usize)]>,
}

impl StickerPermutation {
    /// Build from a comes-from table: the sticker landing on `i` was at
    /// `comes_from[i]`.
    fn from_comes_from(comes_from: &[usize]) -> StickerPermutation {
        assert!(
            comes_from.iter().all_unique() && comes_from.iter().all(|&i| i < comes_from.len()),
            "rotation table is not a permutation"
        );

        let pairs = comes_from
            .iter()
            .copied()
            .enumerate()
            .filter(|&(destination, source)| source != destination)
            .map(|(destination, source)| (source, destination))
            .collect();

        StickerPermutation { pairs }
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    #[must_use]
    pub fn inverse(&self) -> StickerPermutation {
        StickerPermutation {
            pairs: self.pairs.iter().map(|&(from, to)| (to, from)).collect(),
        }
    }

    /// Gather the moved stickers, then scatter them to their new positions.
    pub fn apply(&self, stickers: &mut [Color]) {
        let gathered = self
            .pairs
            .iter()
            .map(|&(source, _)| stickers[source])
            .collect_vec();

        for (&(_, destination), color) in self.pairs.iter().zip(gathered) {
            stickers[destination] = color;
        }
    }

    /// The disjoint cycles of this permutation, each starting at its smallest
    /// position.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let goes_to = self.pairs.iter().copied().collect::<HashMap<_, _>>();
        let mut covered = vec![];
        let mut cycles = vec![];

        for start in goes_to.keys().copied().sorted() {
            if covered.contains(&start) {
                continue;
            }

            let mut cycle = vec![start];
            covered.push(start);

            let mut next = goes_to[&start];
            while next != start {
                covered.push(next);
                cycle.push(next);
                next = goes_to[&next];
            }

            cycles.push(cycle);
        }

        cycles
    }
}

#[derive(Clone, Copy)]
enum Edge {
    First,
    Last,
}

#[derive(Clone, Copy)]
enum Line {
    Row(Edge),
    Col(Edge),
}

/// A row or column of one face that borders the turning face.
#[derive(Clone, Copy)]
struct Strip {
    face: Face,
    line: Line,
    reversed: bool,
}

const fn strip(face: Face, line: Line, reversed: bool) -> Strip {
    Strip {
        face,
        line,
        reversed,
    }
}

/// The four strips around `face`, in the order stickers travel during a
/// clockwise turn. Each strip is read in the direction its stickers move, so
/// the k-th sticker of one strip lands on the k-th sticker of the next.
fn ring(face: Face) -> [Strip; 4] {
    use Edge::{First, Last};
    use Face::{B, D, F, L, R, U};
    use Line::{Col, Row};

    match face {
        U => [
            strip(F, Row(First), false),
            strip(L, Row(First), false),
            strip(B, Row(First), false),
            strip(R, Row(First), false),
        ],
        D => [
            strip(F, Row(Last), false),
            strip(R, Row(Last), false),
            strip(B, Row(Last), false),
            strip(L, Row(Last), false),
        ],
        F => [
            strip(U, Row(Last), false),
            strip(R, Col(First), false),
            strip(D, Row(First), true),
            strip(L, Col(Last), true),
        ],
        B => [
            strip(U, Row(First), true),
            strip(L, Col(First), false),
            strip(D, Row(Last), false),
            strip(R, Col(Last), true),
        ],
        L => [
            strip(U, Col(First), false),
            strip(F, Col(First), false),
            strip(D, Col(First), false),
            strip(B, Col(Last), true),
        ],
        R => [
            strip(D, Col(Last), false),
            strip(F, Col(Last), false),
            strip(U, Col(Last), false),
            strip(B, Col(First), true),
        ],
    }
}

fn strip_indices(strip: Strip, side: usize) -> Vec<usize> {
    let base = strip.face.slot() * side * side;
    let offset = |edge| match edge {
        Edge::First => 0,
        Edge::Last => side - 1,
    };

    let mut indices = (0..side)
        .map(|k| match strip.line {
            Line::Row(edge) => base + offset(edge) * side + k,
            Line::Col(edge) => base + k * side + offset(edge),
        })
        .collect_vec();

    if strip.reversed {
        indices.reverse();
    }

    indices
}

fn clockwise_permutation(face: Face, variant: Variant) -> StickerPermutation {
    let side = variant.side();
    let base = face.slot() * side * side;
    let mut comes_from = (0..variant.sticker_count()).collect_vec();

    // The turning face itself rotates a quarter
    for row in 0..side {
        for col in 0..side {
            comes_from[base + row * side + col] = base + (side - 1 - col) * side + row;
        }
    }

    let strips = ring(face).map(|strip| strip_indices(strip, side));
    for (from, to) in strips.iter().circular_tuple_windows() {
        for (&source, &destination) in from.iter().zip(to) {
            comes_from[destination] = source;
        }
    }

    StickerPermutation::from_comes_from(&comes_from)
}

/// The twelve quarter turns of one puzzle variant, precomputed as sticker
/// permutations.
#[derive(Debug)]
pub struct RotationEngine {
    variant: Variant,
    turns: Box<[StickerPermutation]>,
}

impl RotationEngine {
    pub fn new(variant: Variant) -> RotationEngine {
        let turns = Turn::ALL
            .iter()
            .map(|turn| {
                let clockwise = clockwise_permutation(turn.face, variant);
                match turn.direction {
                    Direction::Clockwise => clockwise,
                    Direction::CounterClockwise => clockwise.inverse(),
                }
            })
            .collect();

        RotationEngine { variant, turns }
    }

    /// The shared engine for a variant.
    pub fn for_variant(variant: Variant) -> &'static RotationEngine {
        match variant {
            Variant::Cube3x3 => &CUBE3X3,
            Variant::Cube2x2 => &CUBE2X2,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn permutation(&self, turn: Turn) -> &StickerPermutation {
        &self.turns[turn.index()]
    }

    /// Apply one quarter turn. The state must belong to this engine's variant.
    pub fn apply_turn(&self, state: &mut CubeState, turn: Turn) {
        debug_assert_eq!(
            state.variant(),
            self.variant,
            "{} state turned by a {} engine",
            state.variant(),
            self.variant
        );

        self.turns[turn.index()].apply(state.stickers_mut());
        trace!(target: "rotation", "Applied {turn}");
    }

    pub fn apply_move(&self, state: &mut CubeState, move_: Move) {
        for turn in move_.turns() {
            self.apply_turn(state, turn);
        }
    }

    pub fn apply_sequence(&self, state: &mut CubeState, sequence: &MoveSequence) {
        for turn in sequence.turns() {
            self.apply_turn(state, turn);
        }
    }

    /// Apply a move written in notation. An unrecognized token leaves the
    /// state untouched and returns `false`.
    pub fn apply_token(&self, state: &mut CubeState, token: &str) -> bool {
        match token.parse::<Move>() {
            Ok(move_) => {
                self.apply_move(state, move_);
                true
            }
            Err(e) => {
                warn!(target: "rotation", "Skipping move: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: [Variant; 2] = [Variant::Cube3x3, Variant::Cube2x2];

    fn scrambled(variant: Variant, seed: u64) -> CubeState {
        let mut state = CubeState::solved(variant);
        state.randomize(&mut fastrand::Rng::with_seed(seed));
        state
    }

    fn sorted_colors(state: &CubeState) -> Vec<Color> {
        state.stickers().iter().copied().sorted().collect()
    }

    fn apply(state: &CubeState, moves: &str, repeat: usize) -> CubeState {
        let engine = RotationEngine::for_variant(state.variant());
        let sequence: MoveSequence = moves.parse().unwrap();
        let mut result = state.clone();
        for _ in 0..repeat {
            engine.apply_sequence(&mut result, &sequence);
        }
        result
    }

    #[test]
    fn test_inverse_round_trip() {
        for variant in VARIANTS {
            let engine = RotationEngine::for_variant(variant);
            let state = scrambled(variant, 3);
            for turn in Turn::ALL {
                let mut result = state.clone();
                engine.apply_turn(&mut result, turn);
                assert_ne!(result, state, "{turn} did nothing");
                engine.apply_turn(&mut result, turn.inverse());
                assert_eq!(result, state, "{turn} then {} on {variant}", turn.inverse());
            }
        }
    }

    #[test]
    fn test_order_four() {
        for variant in VARIANTS {
            let engine = RotationEngine::for_variant(variant);
            let state = scrambled(variant, 5);
            for turn in Turn::ALL {
                let mut result = state.clone();
                for _ in 0..4 {
                    engine.apply_turn(&mut result, turn);
                }
                assert_eq!(result, state, "{turn} four times on {variant}");
            }
        }
    }

    #[test]
    fn test_conserves_colors() {
        for variant in VARIANTS {
            let engine = RotationEngine::for_variant(variant);
            let state = scrambled(variant, 9);
            let expected = sorted_colors(&state);
            for turn in Turn::ALL {
                let mut result = state.clone();
                engine.apply_turn(&mut result, turn);
                assert_eq!(sorted_colors(&result), expected);
            }
        }
    }

    #[test]
    fn test_quarter_turn_cycle_structure() {
        // 3x3: corners and edges of the face plus three strip cycles.
        // 2x2: the face itself plus two strip cycles.
        for (variant, cycle_count) in [(Variant::Cube3x3, 5), (Variant::Cube2x2, 3)] {
            let engine = RotationEngine::for_variant(variant);
            for turn in Turn::ALL {
                let cycles = engine.permutation(turn).cycles();
                assert_eq!(cycles.len(), cycle_count, "{turn} on {variant}");
                assert!(cycles.iter().all(|cycle| cycle.len() == 4));
            }
        }
    }

    #[test]
    fn test_centers_never_move() {
        let engine = RotationEngine::for_variant(Variant::Cube3x3);
        let centers = Variant::Cube3x3.centers().collect_vec();
        for turn in Turn::ALL {
            assert!(
                engine
                    .permutation(turn)
                    .pairs()
                    .iter()
                    .all(|(from, to)| !centers.contains(from) && !centers.contains(to))
            );
        }
    }

    #[test]
    fn test_front_turn_from_solved() {
        let solved = CubeState::solved(Variant::Cube3x3);
        let result = apply(&solved, "F", 1);

        for index in [6, 7, 8] {
            assert_eq!(result.sticker(index), Some(Color::Orange));
        }
        for index in [27, 30, 33] {
            assert_eq!(result.sticker(index), Some(Color::White));
        }
        for index in [45, 46, 47] {
            assert_eq!(result.sticker(index), Some(Color::Red));
        }
        for index in [11, 14, 17] {
            assert_eq!(result.sticker(index), Some(Color::Yellow));
        }
        assert_eq!(result.face(Face::F), &[Color::Green; 9]);
        assert_eq!(result.face(Face::B), &[Color::Blue; 9]);
    }

    #[test]
    fn test_front_face_rotates_clockwise() {
        let engine = RotationEngine::for_variant(Variant::Cube3x3);
        let mut state = CubeState::solved(Variant::Cube3x3);
        // Mark the top left sticker of the front face
        state.stickers_mut()[18] = Color::Blank;
        engine.apply_turn(&mut state, Turn::clockwise(Face::F));
        assert_eq!(state.sticker(20), Some(Color::Blank));
        engine.apply_turn(&mut state, Turn::clockwise(Face::F));
        assert_eq!(state.sticker(26), Some(Color::Blank));
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        for variant in VARIANTS {
            let solved = CubeState::solved(variant);
            for repeat in 1..6 {
                assert_ne!(apply(&solved, "R U R' U'", repeat), solved);
            }
            assert_eq!(apply(&solved, "R U R' U'", 6), solved);
        }
    }

    #[test]
    fn test_many_compositions() {
        for variant in VARIANTS {
            let solved = CubeState::solved(variant);
            assert_eq!(apply(&solved, "R F", 105), solved);
        }
    }

    #[test]
    fn test_opposite_faces_commute() {
        for variant in VARIANTS {
            let state = scrambled(variant, 13);
            for face in [Face::U, Face::L, Face::F] {
                let opposite = face.opposite();
                assert_eq!(
                    apply(&state, &format!("{face} {opposite}"), 1),
                    apply(&state, &format!("{opposite} {face}"), 1)
                );
            }
        }
    }

    #[test]
    fn test_double_is_two_quarters() {
        let state = scrambled(Variant::Cube3x3, 17);
        for face in Face::ALL {
            assert_eq!(
                apply(&state, &format!("{face}2"), 1),
                apply(&state, &format!("{face} {face}"), 1)
            );
        }
    }

    #[test]
    fn test_unrecognized_token_is_a_no_op() {
        let engine = RotationEngine::for_variant(Variant::Cube3x3);
        let mut state = scrambled(Variant::Cube3x3, 19);
        let before = state.clone();
        assert!(!engine.apply_token(&mut state, "Q"));
        assert!(!engine.apply_token(&mut state, "x'"));
        assert_eq!(state, before);
        assert!(engine.apply_token(&mut state, "R2"));
        assert_ne!(state, before);
    }

    #[test]
    fn test_scramble_then_inverse_solves() {
        for variant in VARIANTS {
            let solved = CubeState::solved(variant);
            let sequence: MoveSequence = "R U2 F' L D B2 U' R2 F".parse().unwrap();
            let inverse = sequence.inverse().to_string();
            let mixed = apply(&solved, &sequence.to_string(), 1);
            assert!(!mixed.is_solved());
            assert_eq!(apply(&mixed, &inverse, 1), solved);
        }
    }
}
