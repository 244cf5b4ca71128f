//! Turns a raw tablebase answer into a ranked, labeled move list.

use std::cmp::Ordering;

use shakmaty::uci::UciMove;
use tracing::warn;

use crate::{
    canonical::{CanonicalFen, canonicalize, halfmove_clock},
    error::TablebaseError,
    rules::RulesEngine,
    types::{Category, ClassifiedMove, ClassifiedMoves, ProbeAnswer},
};

/// Classify and rank every move listed in `answer`.
///
/// Each move is played from `position` on `rules` and taken back again, so
/// the result does not depend on iteration order. The engine is left at
/// `position`.
pub fn classify<R: RulesEngine + ?Sized>(
    position: &CanonicalFen,
    answer: &ProbeAnswer,
    rules: &mut R,
) -> Result<ClassifiedMoves, TablebaseError> {
    if !rules.load(position.as_str()) {
        return Err(TablebaseError::IllegalPosition(position.to_string()));
    }

    let opponent_lost = answer.wdl.is_some_and(|wdl| wdl.code() < 0);
    let mut moves = Vec::with_capacity(answer.moves.len());

    for (notation, &dtz) in &answer.moves {
        let Ok(uci) = notation.parse::<UciMove>() else {
            warn!(fen = %position, notation = %notation, "skipping unparsable move");
            continue;
        };
        let Some(san) = rules.apply(&uci) else {
            warn!(fen = %position, notation = %notation, "skipping illegal move");
            continue;
        };

        let is_checkmate = rules.is_checkmate();
        let is_stalemate = rules.is_stalemate();
        let is_insufficient_material = rules.is_insufficient_material();
        let raw = rules.fen();
        rules.undo();

        let resulting_position = canonicalize(&raw)?;
        let category = categorize(
            is_checkmate,
            is_stalemate || is_insufficient_material,
            dtz,
            opponent_lost,
        );

        moves.push(ClassifiedMove {
            notation: notation.clone(),
            algebraic_notation: san,
            is_checkmate,
            is_stalemate,
            is_insufficient_material,
            dtz,
            is_zeroing: halfmove_clock(&raw) == Some(0),
            category,
            resulting_position,
        });
    }

    moves.sort_by(compare);
    Ok(ClassifiedMoves::from_sorted(moves))
}

// Terminal outcomes decide before dtz does. An unknown dtz against an
// opponent recorded as lost counts as drawing.
fn categorize(checkmate: bool, dead_draw: bool, dtz: Option<i32>, opponent_lost: bool) -> Category {
    if checkmate {
        Category::Winning
    } else if dead_draw {
        Category::Drawing
    } else {
        match dtz {
            Some(dtz) if dtz < 0 => Category::Winning,
            Some(0) => Category::Drawing,
            None if opponent_lost => Category::Drawing,
            _ => Category::Losing,
        }
    }
}

/// Ranking order, best move first.
pub fn compare(a: &ClassifiedMove, b: &ClassifiedMove) -> Ordering {
    b.is_checkmate
        .cmp(&a.is_checkmate)
        .then(b.is_stalemate.cmp(&a.is_stalemate))
        .then(b.is_insufficient_material.cmp(&a.is_insufficient_material))
        .then_with(|| match (a.dtz, b.dtz) {
            (Some(x), Some(y)) if x < 0 && y < 0 => b.is_zeroing.cmp(&a.is_zeroing),
            _ => Ordering::Equal,
        })
        .then_with(|| match (a.dtz, b.dtz) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.notation.cmp(&b.notation))
}
