//! What the presentation layer shows for the current position.

use std::fmt;

use shakmaty::Color;

use crate::{
    canonical::CanonicalFen,
    error::ErrorKind,
    types::{ClassifiedMoves, ProbeAnswer, Wdl},
};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    Probing,
    Checkmate {
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_side"))]
        winner: Color,
    },
    Stalemate,
    InsufficientMaterial,
    NotFound,
    TablebaseDraw,
    Winning {
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_side"))]
        side: Color,
        dtz: u32,
    },
    Losing {
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_side"))]
        side: Color,
        dtz: u32,
    },
    Failed { kind: ErrorKind, message: String },
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

#[cfg(feature = "serde")]
fn serialize_side<S: serde::Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(side_name(*color))
}

impl Status {
    /// Status line for an answer about a position with `turn` to move.
    pub fn for_answer(answer: &ProbeAnswer, turn: Color) -> Status {
        match (answer.wdl, answer.dtz) {
            (None, _) | (_, None) => Status::NotFound,
            (_, Some(0)) => Status::TablebaseDraw,
            (_, Some(dtz)) if dtz > 0 => Status::Winning {
                side: turn,
                dtz: dtz.unsigned_abs(),
            },
            (_, Some(dtz)) => Status::Losing {
                side: turn,
                dtz: dtz.unsigned_abs(),
            },
        }
    }

    /// Side the status line favors, if any.
    pub fn winning_side(&self) -> Option<Color> {
        match *self {
            Status::Checkmate { winner } => Some(winner),
            Status::Winning { side, .. } => Some(side),
            Status::Losing { side, .. } => Some(side.other()),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Probing => f.write_str("Probing tablebases"),
            Status::Checkmate { winner } => write!(f, "{} won by checkmate", side_name(*winner)),
            Status::Stalemate => f.write_str("Draw by stalemate"),
            Status::InsufficientMaterial => f.write_str("Draw by insufficient material"),
            Status::NotFound => f.write_str("Position not found in tablebases"),
            Status::TablebaseDraw => f.write_str("Tablebase draw"),
            Status::Winning { side, dtz } => {
                write!(f, "{} is winning with DTZ {dtz}", side_name(*side))
            }
            Status::Losing { side, dtz } => {
                write!(f, "{} is losing with DTZ {dtz}", side_name(*side))
            }
            Status::Failed { kind, .. } => f.write_str(match kind {
                ErrorKind::Cancelled => "Request cancelled",
                ErrorKind::InvalidPosition => "Invalid position",
                ErrorKind::NetworkOrServerError => "Network error",
            }),
        }
    }
}

/// Extra explanation below the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Note {
    Introduction,
    NotSolved,
    OutOfTableRange,
    DeadPosition,
    BlessedLoss,
    CursedWin,
}

impl Note {
    pub fn for_answer(answer: &ProbeAnswer) -> Option<Note> {
        match answer.wdl {
            None => Some(Note::OutOfTableRange),
            Some(Wdl::BlessedLoss) => Some(Note::BlessedLoss),
            Some(Wdl::CursedWin) => Some(Note::CursedWin),
            Some(_) => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Note::Introduction => {
                "Syzygy tablebases provide win-draw-loss and distance-to-zero information for all \
                 endgame positions with up to 6 pieces. Minmaxing the DTZ values guarantees winning \
                 all winning positions and defending all drawn positions. Setup a position on the \
                 board to probe the tablebases."
            }
            Note::NotSolved => "Chess is not yet solved.",
            Note::OutOfTableRange => {
                "Syzygy tables only provide information for positions with up to 6 pieces and no \
                 castling rights."
            }
            Note::DeadPosition => {
                "The game is drawn because with the remaining material no sequence of legal moves \
                 can lead to a checkmate."
            }
            Note::BlessedLoss => {
                "This is a blessed loss. Mate can be forced, but a draw can be achieved under the \
                 fifty-move rule."
            }
            Note::CursedWin => {
                "This is a cursed win. Mate can be forced, but a draw can be achieved under the \
                 fifty-move rule."
            }
        })
    }
}

/// Everything rendered for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct View {
    pub position: CanonicalFen,
    pub status: Status,
    pub note: Option<Note>,
    pub moves: ClassifiedMoves,
    /// Position to re-probe from a "Try again" control.
    pub retry: Option<CanonicalFen>,
}

impl View {
    pub(crate) fn new(position: CanonicalFen, status: Status) -> Self {
        Self {
            position,
            status,
            note: None,
            moves: ClassifiedMoves::default(),
            retry: None,
        }
    }

    pub(crate) fn with_note(mut self, note: Option<Note>) -> Self {
        self.note = note;
        self
    }
}
