use std::{collections::BTreeMap, fmt};

use serde::Deserialize;

use crate::canonical::CanonicalFen;

/// Win/draw/loss code of a tablebase position, from the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i8")]
pub enum Wdl {
    Loss = -2,
    /// Loss that is saved by the fifty-move rule.
    BlessedLoss = -1,
    Draw = 0,
    /// Win that is spoiled by the fifty-move rule.
    CursedWin = 1,
    Win = 2,
}

impl Wdl {
    pub fn code(self) -> i8 {
        self as i8
    }
}

impl TryFrom<i8> for Wdl {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Ok(match code {
            -2 => Wdl::Loss,
            -1 => Wdl::BlessedLoss,
            0 => Wdl::Draw,
            1 => Wdl::CursedWin,
            2 => Wdl::Win,
            other => return Err(format!("wdl out of range: {other}")),
        })
    }
}

/// Raw lookup answer as returned by the tablebase service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeAnswer {
    /// `None` outside table range.
    pub wdl: Option<Wdl>,
    pub dtz: Option<i32>,
    /// UCI move to the dtz after that move, seen from the side that moved.
    #[serde(default)]
    pub moves: BTreeMap<String, Option<i32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Category {
    Winning,
    Drawing,
    Losing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassifiedMove {
    /// UCI notation, e.g. `e7e8q`.
    pub notation: String,
    /// SAN including check or mate suffix.
    pub algebraic_notation: String,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub is_insufficient_material: bool,
    /// Negative: the mover wins. Positive: the mover loses. `None`: unknown.
    pub dtz: Option<i32>,
    /// Capture or pawn move.
    pub is_zeroing: bool,
    pub category: Category,
    pub resulting_position: CanonicalFen,
}

impl ClassifiedMove {
    pub fn badge(&self) -> Badge {
        if self.is_checkmate {
            Badge::Checkmate
        } else if self.is_stalemate {
            Badge::Stalemate
        } else if self.is_insufficient_material {
            Badge::InsufficientMaterial
        } else {
            match self.dtz {
                Some(0) => Badge::Draw,
                Some(dtz) if dtz < 0 && self.is_zeroing => Badge::Zeroing,
                Some(dtz) if dtz < 0 => Badge::Win(dtz.unsigned_abs()),
                Some(dtz) => Badge::Loss(dtz.unsigned_abs()),
                None => Badge::Unknown,
            }
        }
    }
}

/// Short label shown next to a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    Draw,
    Zeroing,
    Win(u32),
    Loss(u32),
    Unknown,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Checkmate => f.write_str("Checkmate"),
            Badge::Stalemate => f.write_str("Stalemate"),
            Badge::InsufficientMaterial => f.write_str("Insufficient material"),
            Badge::Draw => f.write_str("Draw"),
            Badge::Zeroing => f.write_str("Zeroing"),
            Badge::Win(dtz) => write!(f, "Win with DTZ {dtz}"),
            Badge::Loss(dtz) => write!(f, "Loss with DTZ {dtz}"),
            Badge::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Moves in ranking order, viewable per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassifiedMoves {
    moves: Vec<ClassifiedMove>,
}

impl ClassifiedMoves {
    pub(crate) fn from_sorted(moves: Vec<ClassifiedMove>) -> Self {
        Self { moves }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedMove> {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn bucket(&self, category: Category) -> impl Iterator<Item = &ClassifiedMove> {
        self.moves.iter().filter(move |m| m.category == category)
    }

    pub fn winning(&self) -> impl Iterator<Item = &ClassifiedMove> {
        self.bucket(Category::Winning)
    }

    pub fn drawing(&self) -> impl Iterator<Item = &ClassifiedMove> {
        self.bucket(Category::Drawing)
    }

    pub fn losing(&self) -> impl Iterator<Item = &ClassifiedMove> {
        self.bucket(Category::Losing)
    }

    pub fn find(&self, notation: &str) -> Option<&ClassifiedMove> {
        self.moves.iter().find(|m| m.notation == notation)
    }
}

impl<'a> IntoIterator for &'a ClassifiedMoves {
    type Item = &'a ClassifiedMove;
    type IntoIter = std::slice::Iter<'a, ClassifiedMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
