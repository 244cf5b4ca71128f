use std::fmt;

use shakmaty::Color;

use crate::error::TablebaseError;

/// Bare kings, white to move. Shown when nothing has been set up yet.
pub const DEFAULT_FEN: &str = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";

/// Standard starting position with canonical move counters.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A six-field position string whose halfmove clock is `0` and fullmove
/// number is `1`.
///
/// Tablebases ignore the move counters, so two positions that only differ in
/// game history share one `CanonicalFen`. It doubles as the cache key and the
/// `fen` parameter of the outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CanonicalFen(String);

impl CanonicalFen {
    pub fn default_position() -> Self {
        Self(DEFAULT_FEN.to_owned())
    }

    pub fn starting_position() -> Self {
        Self(STARTING_FEN.to_owned())
    }

    /// Placement and side to move, without castling rights or en passant.
    pub(crate) fn from_parts(board: &str, turn: Color) -> Self {
        let turn = match turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        Self(format!("{board} {turn} - - 0 1"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Piece placement field.
    pub fn board(&self) -> &str {
        self.field(0)
    }

    pub fn turn(&self) -> Color {
        if self.field(1) == "b" {
            Color::Black
        } else {
            Color::White
        }
    }

    fn field(&self, index: usize) -> &str {
        self.0.split(' ').nth(index).unwrap_or_default()
    }
}

impl fmt::Display for CanonicalFen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalFen {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn fields(raw: &str) -> Option<[&str; 6]> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    parts.try_into().ok()
}

/// Rewrite the halfmove clock to `0` and the fullmove number to `1`.
///
/// The other four fields are copied verbatim. Fails only when `raw` does not
/// consist of exactly six whitespace separated fields.
pub fn canonicalize(raw: &str) -> Result<CanonicalFen, TablebaseError> {
    let [board, turn, castling, ep, _, _] =
        fields(raw).ok_or_else(|| TablebaseError::MalformedFen(raw.to_owned()))?;
    Ok(CanonicalFen(format!("{board} {turn} {castling} {ep} 0 1")))
}

/// Raw halfmove clock of a six-field position string.
pub fn halfmove_clock(raw: &str) -> Option<u32> {
    fields(raw).and_then(|f| f[4].parse().ok())
}

/// Pad a partially typed FEN to six fields.
///
/// Missing fields are filled with `default_turn`, no castling rights, no en
/// passant square and counters `0 1`. Input with six or more fields is only
/// normalized for whitespace.
pub fn complete_fen(input: &str, default_turn: Color) -> String {
    let mut parts: Vec<&str> = input.split_whitespace().collect();
    let turn = match default_turn {
        Color::White => "w",
        Color::Black => "b",
    };
    let padding = [turn, "-", "-", "0", "1"];
    if let Some(missing) = parts.len().checked_sub(1).and_then(|n| padding.get(n..)) {
        parts.extend_from_slice(missing);
    }
    parts.join(" ")
}
