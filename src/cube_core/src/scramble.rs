use log::debug;

use crate::{
    face::Face,
    moves::{Amount, Move, MoveSequence},
};

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 30;

/// Produces random move sequences in which no move shares a face or an axis
/// with the move right before it.
#[derive(Debug, Clone)]
pub struct Scrambler {
    rng: fastrand::Rng,
}

impl Scrambler {
    pub fn new(rng: fastrand::Rng) -> Scrambler {
        Scrambler { rng }
    }

    pub fn with_seed(seed: u64) -> Scrambler {
        Scrambler::new(fastrand::Rng::with_seed(seed))
    }

    pub fn generate(&mut self, length: usize) -> MoveSequence {
        let mut moves: Vec<Move> = Vec::with_capacity(length);

        while moves.len() < length {
            let face = Face::ALL[self.rng.usize(..Face::ALL.len())];

            // Same axis also covers the same face
            if moves.last().is_some_and(|prev| prev.face.axis() == face.axis()) {
                continue;
            }

            let amount = Amount::ALL[self.rng.usize(..Amount::ALL.len())];
            moves.push(Move::new(face, amount));
        }

        let sequence = MoveSequence(moves);
        debug!(target: "scramble", "Generated scramble {sequence}");
        sequence
    }
}

impl Default for Scrambler {
    fn default() -> Self {
        Scrambler::new(fastrand::Rng::new())
    }
}
