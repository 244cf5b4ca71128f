//! Chess rules collaborator.
//!
//! The classifier and the orchestrator only need a handful of rules
//! queries, captured by [`RulesEngine`]. [`ShakmatyRules`] answers them
//! with `shakmaty`.

use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Position, fen::Fen, san::SanPlus, uci::UciMove,
};

pub trait RulesEngine {
    /// Replace the current position. Returns `false` and leaves the engine
    /// untouched if `fen` is not a legal position.
    fn load(&mut self, fen: &str) -> bool;

    fn legal_moves(&self) -> Vec<UciMove>;

    /// Play `uci` and return its SAN, or `None` if it is not legal here.
    fn apply(&mut self, uci: &UciMove) -> Option<String>;

    /// Take back the last applied move. No-op at the loaded position.
    fn undo(&mut self);

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;

    /// Six-field FEN of the current position, move counters included.
    fn fen(&self) -> String;

    fn turn(&self) -> Color;
}

/// [`RulesEngine`] over `shakmaty::Chess`. Applied moves are kept on a stack
/// of previous positions so `undo` restores the exact baseline.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyRules {
    position: Chess,
    previous: Vec<Chess>,
}

impl RulesEngine for ShakmatyRules {
    fn load(&mut self, fen: &str) -> bool {
        let Ok(fen) = Fen::from_ascii(fen.trim().as_bytes()) else {
            return false;
        };
        match fen.into_position::<Chess>(CastlingMode::Standard) {
            Ok(position) => {
                self.position = position;
                self.previous.clear();
                true
            }
            Err(_) => false,
        }
    }

    fn legal_moves(&self) -> Vec<UciMove> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard))
            .collect()
    }

    fn apply(&mut self, uci: &UciMove) -> Option<String> {
        let m = uci.to_move(&self.position).ok()?;
        let san = SanPlus::from_move(self.position.clone(), m);
        let mut next = self.position.clone();
        next.play_unchecked(m);
        self.previous.push(std::mem::replace(&mut self.position, next));
        Some(san.to_string())
    }

    fn undo(&mut self) {
        if let Some(previous) = self.previous.pop() {
            self.position = previous;
        }
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    fn turn(&self) -> Color {
        self.position.turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uci(s: &str) -> UciMove {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_illegal_positions() {
        let mut rules = ShakmatyRules::default();
        assert!(!rules.load("not a fen"));
        // side not to move is in check
        assert!(!rules.load("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1"));
        assert_eq!(rules.legal_moves().len(), 20);
    }

    #[test]
    fn apply_and_undo_restore_baseline() {
        let mut rules = ShakmatyRules::default();
        assert!(rules.load("4k3/8/8/8/8/8/4P3/4K3 w - - 3 10"));
        let baseline = rules.fen();

        assert_eq!(rules.apply(&uci("e2e4")).as_deref(), Some("e4"));
        assert_eq!(rules.turn(), Color::Black);
        assert!(rules.fen().ends_with(" 0 10"));

        rules.undo();
        assert_eq!(rules.fen(), baseline);
        rules.undo();
        assert_eq!(rules.fen(), baseline);
    }

    #[test]
    fn illegal_move_leaves_position() {
        let mut rules = ShakmatyRules::default();
        assert!(rules.load("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert_eq!(rules.apply(&uci("e2e5")), None);
        assert_eq!(rules.fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    }

    #[test]
    fn detects_terminal_positions() {
        let mut rules = ShakmatyRules::default();
        assert!(rules.load("R6k/8/6K1/8/8/8/8/8 b - - 0 1"));
        assert!(rules.is_checkmate());

        assert!(rules.load("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1"));
        assert!(rules.is_stalemate());

        assert!(rules.load("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(rules.is_insufficient_material());
        assert!(!rules.is_checkmate());
    }

    #[test]
    fn san_has_check_suffix() {
        let mut rules = ShakmatyRules::default();
        assert!(rules.load("7k/8/6K1/8/8/8/8/R7 w - - 0 1"));
        assert_eq!(rules.apply(&uci("a1a8")).as_deref(), Some("Ra8#"));
    }
}
