use std::{fmt::Display, iter, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::face::{Face, ParseFaceError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// One of the twelve quarter turns the rotation engine knows how to apply.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Turn {
    pub face: Face,
    pub direction: Direction,
}

impl Turn {
    pub const ALL: [Turn; 12] = {
        let mut v = [Turn::clockwise(Face::U); 12];

        let mut i = 0;
        while i < Face::ALL.len() {
            v[2 * i] = Turn::clockwise(Face::ALL[i]);
            v[2 * i + 1] = Turn::counter_clockwise(Face::ALL[i]);
            i += 1;
        }

        v
    };

    pub const fn clockwise(face: Face) -> Turn {
        Turn {
            face,
            direction: Direction::Clockwise,
        }
    }

    pub const fn counter_clockwise(face: Face) -> Turn {
        Turn {
            face,
            direction: Direction::CounterClockwise,
        }
    }

    /// Position of this turn in [`Turn::ALL`].
    pub fn index(self) -> usize {
        2 * self.face.slot()
            + match self.direction {
                Direction::Clockwise => 0,
                Direction::CounterClockwise => 1,
            }
    }

    #[must_use]
    pub fn inverse(self) -> Turn {
        Turn {
            face: self.face,
            direction: self.direction.reversed(),
        }
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Direction::Clockwise => write!(f, "{}", self.face),
            Direction::CounterClockwise => write!(f, "{}'", self.face),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Empty move token")]
    Empty,
    #[error("Invalid move `{token}`: {source}")]
    UnknownFace {
        token: String,
        source: ParseFaceError,
    },
}

impl FromStr for Turn {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face, direction) = match s.strip_suffix('\'') {
            Some(rest) => (rest, Direction::CounterClockwise),
            None => (s, Direction::Clockwise),
        };

        Ok(Turn {
            face: parse_face(s, face)?,
            direction,
        })
    }
}

/// How far a move turns its face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Amount {
    Single,
    Double,
    Inverse,
}

impl Amount {
    pub const ALL: [Amount; 3] = [Amount::Single, Amount::Double, Amount::Inverse];
}

/// A move in standard notation: a face letter optionally suffixed with `'`
/// or `2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub amount: Amount,
}

impl Move {
    pub fn new(face: Face, amount: Amount) -> Move {
        Move { face, amount }
    }

    /// The quarter turns this move expands to. A double move is two clockwise
    /// quarter turns.
    pub fn turns(self) -> impl Iterator<Item = Turn> {
        let (turn, count) = match self.amount {
            Amount::Single => (Turn::clockwise(self.face), 1),
            Amount::Double => (Turn::clockwise(self.face), 2),
            Amount::Inverse => (Turn::counter_clockwise(self.face), 1),
        };

        iter::repeat_n(turn, count)
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        let amount = match self.amount {
            Amount::Single => Amount::Inverse,
            Amount::Double => Amount::Double,
            Amount::Inverse => Amount::Single,
        };

        Move {
            face: self.face,
            amount,
        }
    }
}

impl From<Turn> for Move {
    fn from(turn: Turn) -> Self {
        let amount = match turn.direction {
            Direction::Clockwise => Amount::Single,
            Direction::CounterClockwise => Amount::Inverse,
        };

        Move {
            face: turn.face,
            amount,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.amount {
            Amount::Single => write!(f, "{}", self.face),
            Amount::Double => write!(f, "{}2", self.face),
            Amount::Inverse => write!(f, "{}'", self.face),
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        // `2'` is a half turn either way
        let (face, amount) = if let Some(rest) = token.strip_suffix("2'") {
            (rest, Amount::Double)
        } else if let Some(rest) = token.strip_suffix('2') {
            (rest, Amount::Double)
        } else if let Some(rest) = token.strip_suffix('\'') {
            (rest, Amount::Inverse)
        } else {
            (token, Amount::Single)
        };

        Ok(Move {
            face: parse_face(token, face)?,
            amount,
        })
    }
}

fn parse_face(token: &str, face: &str) -> Result<Face, ParseMoveError> {
    if token.is_empty() {
        return Err(ParseMoveError::Empty);
    }

    face.parse().map_err(|source| ParseMoveError::UnknownFace {
        token: token.to_owned(),
        source,
    })
}

/// A whitespace separated sequence of moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSequence(pub Vec<Move>);

impl MoveSequence {
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = Turn> + '_ {
        self.0.iter().flat_map(|move_| move_.turns())
    }

    /// The sequence that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> MoveSequence {
        MoveSequence(self.0.iter().rev().map(|move_| move_.inverse()).collect())
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for MoveSequence {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(MoveSequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_indices_match_table_order() {
        for (i, turn) in Turn::ALL.iter().enumerate() {
            assert_eq!(turn.index(), i);
            assert_eq!(turn.inverse().inverse(), *turn);
        }
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!("R".parse::<Move>().unwrap(), Move::new(Face::R, Amount::Single));
        assert_eq!("U'".parse::<Move>().unwrap(), Move::new(Face::U, Amount::Inverse));
        assert_eq!("F2".parse::<Move>().unwrap(), Move::new(Face::F, Amount::Double));
        assert_eq!("B2'".parse::<Move>().unwrap(), Move::new(Face::B, Amount::Double));
        assert_eq!("".parse::<Move>(), Err(ParseMoveError::Empty));
        assert!(matches!(
            "X2".parse::<Move>(),
            Err(ParseMoveError::UnknownFace { .. })
        ));
        assert!("R3".parse::<Move>().is_err());
    }

    #[test]
    fn test_double_expands_to_two_clockwise_turns() {
        let turns = "R2".parse::<Move>().unwrap().turns().collect_vec();
        assert_eq!(turns, vec![Turn::clockwise(Face::R); 2]);
    }

    #[test]
    fn test_sequence_display_round_trip() {
        let sequence: MoveSequence = "R U2 F' D".parse().unwrap();
        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence.to_string(), "R U2 F' D");
        assert_eq!(sequence.inverse().to_string(), "D' F U2 R'");
        assert_eq!(sequence.turns().count(), 5);
    }
}
