//! Board edits offered next to the position editor.
//!
//! Every edit keeps the side to move and drops castling rights and the en
//! passant square, since neither survives flipping or recoloring the board.

use shakmaty::Color;

use crate::canonical::CanonicalFen;

const BARE_KINGS: &str = "4k3/8/8/8/8/8/8/4K3";

/// Mirror files: a-file and h-file trade places.
pub fn mirror_horizontal(position: &CanonicalFen) -> CanonicalFen {
    let board: Vec<String> = position
        .board()
        .split('/')
        .map(|rank| rank.chars().rev().collect())
        .collect();
    CanonicalFen::from_parts(&board.join("/"), position.turn())
}

/// Mirror ranks: rank 1 and rank 8 trade places.
pub fn mirror_vertical(position: &CanonicalFen) -> CanonicalFen {
    let board: Vec<&str> = position.board().split('/').rev().collect();
    CanonicalFen::from_parts(&board.join("/"), position.turn())
}

/// White pieces become black and vice versa. Squares stay put.
pub fn swap_colors(position: &CanonicalFen) -> CanonicalFen {
    let board: String = position
        .board()
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect();
    CanonicalFen::from_parts(&board, position.turn())
}

/// Only the two kings on their home squares.
pub fn clear_board(turn: Color) -> CanonicalFen {
    CanonicalFen::from_parts(BARE_KINGS, turn)
}

pub fn with_turn(position: &CanonicalFen, turn: Color) -> CanonicalFen {
    CanonicalFen::from_parts(position.board(), turn)
}

/// Material signature such as `KRPvKR`.
pub fn material_key(position: &CanonicalFen) -> String {
    let board = position.board();
    let side = |pieces: &str| -> String {
        pieces
            .chars()
            .flat_map(|piece| {
                let count = board.chars().filter(|&c| c == piece).count();
                std::iter::repeat_n(piece.to_ascii_uppercase(), count)
            })
            .collect()
    };
    format!("{}v{}", side("KQRBNP"), side("kqrbnp"))
}

pub fn piece_count(position: &CanonicalFen) -> usize {
    position.board().chars().filter(char::is_ascii_alphabetic).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{STARTING_FEN, canonicalize};

    fn fen(s: &str) -> CanonicalFen {
        canonicalize(s).unwrap()
    }

    #[test]
    fn mirrors() {
        let position = fen("6N1/5KR1/2n5/8/8/8/2n5/1k6 w - - 0 1");
        assert_eq!(
            mirror_horizontal(&position).as_str(),
            "1N6/1RK5/5n2/8/8/8/5n2/6k1 w - - 0 1"
        );
        assert_eq!(
            mirror_vertical(&position).as_str(),
            "1k6/2n5/8/8/8/2n5/5KR1/6N1 w - - 0 1"
        );
    }

    #[test]
    fn swapping_drops_castling_rights() {
        let swapped = swap_colors(&fen(STARTING_FEN));
        assert_eq!(
            swapped.as_str(),
            "RNBQKBNR/PPPPPPPP/8/8/8/8/pppppppp/rnbqkbnr w - - 0 1"
        );
    }

    #[test]
    fn clearing_keeps_turn() {
        assert_eq!(clear_board(Color::Black).as_str(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        let flipped = with_turn(&fen("4r3/1K6/8/8/5p2/3k4/8/7Q b - - 0 1"), Color::White);
        assert_eq!(flipped.as_str(), "4r3/1K6/8/8/5p2/3k4/8/7Q w - - 0 1");
    }

    #[test]
    fn material() {
        let position = fen("4r3/1K6/8/8/5p2/3k4/8/7Q b - - 0 1");
        assert_eq!(material_key(&position), "KQvKRP");
        assert_eq!(piece_count(&position), 5);
        assert_eq!(material_key(&fen(STARTING_FEN)), "KQRRBBNNPPPPPPPPvKQRRBBNNPPPPPPPP");
    }
}
