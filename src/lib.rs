//! High‑level Rust interface for exploring endgame tablebases.
//!
//! Set up any position and get every legal move labeled as winning,
//! drawing or losing, ranked by how forcing it is, according to a remote
//! Syzygy lookup service.
//!
//! The principal type is [`ProbeOrchestrator`], which keeps at most one
//! lookup in flight, caches answers per [`CanonicalFen`], mirrors position
//! changes into a navigation history, and exposes the resulting [`View`].
//! The ranking itself is the pure function [`classify`].
//!
//! The library re‑exports `shakmaty`, which backs the default
//! [`RulesEngine`].

mod cache;
mod canonical;
mod classify;
mod config;
mod error;
mod history;
mod orchestrator;
mod rules;
mod source;
mod status;
mod transform;
mod types;

/// Lookup lifecycle.
pub use orchestrator::{Completion, PendingLookup, ProbeOrchestrator, ProbeState};

/// Move classification and ranking.
pub use classify::{classify, compare};

/// Position strings and their canonical form.
pub use canonical::{
    CanonicalFen, DEFAULT_FEN, STARTING_FEN, canonicalize, complete_fen, halfmove_clock,
};

pub use cache::ResultCache;
pub use config::ExplorerConfig;
pub use history::{HistoryEntry, HistorySync, fen_from_url, position_url};
pub use rules::{RulesEngine, ShakmatyRules};
pub use source::{HttpTablebase, TablebaseSource};
pub use status::{Note, Status, View};
pub use transform::{
    clear_board, material_key, mirror_horizontal, mirror_vertical, piece_count, swap_colors,
    with_turn,
};

/// Error type produced by library operations.
pub use error::{ErrorKind, TablebaseError};

/// Tablebase answers and classified moves.
pub use types::{Badge, Category, ClassifiedMove, ClassifiedMoves, ProbeAnswer, Wdl};

/// Re-export of `shakmaty` for convenience when building positions.
pub use shakmaty;
