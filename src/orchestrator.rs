//! Probe lifecycle: at most one lookup in flight, cached answers, and the
//! view that belongs to the most recently requested position.
//!
//! A lookup that misses the cache is handed to the caller as a
//! [`PendingLookup`]. Awaiting it yields a [`Completion`], which goes back into
//! [`ProbeOrchestrator::complete`]. The orchestrator is not borrowed while the
//! lookup runs, so a newer probe can supersede it at any time; completions of
//! superseded lookups are ignored.

use futures::future::{AbortHandle, Abortable, BoxFuture};
use shakmaty::Color;
use tracing::{debug, info, warn};

use crate::{
    cache::ResultCache,
    canonical::{CanonicalFen, DEFAULT_FEN, STARTING_FEN, canonicalize, complete_fen},
    classify::classify,
    error::{ErrorKind, TablebaseError},
    history::{HistoryEntry, HistorySync},
    rules::{RulesEngine, ShakmatyRules},
    source::TablebaseSource,
    status::{Note, Status, View},
    types::ProbeAnswer,
};

/// Lifecycle of the most recent lookup.
///
/// `Resolved`, `Cancelled` and `Failed` describe the last lookup until the
/// next probe starts, which returns to `Idle` first. Positions answered
/// without a lookup (local results and cache hits) leave the state `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    Probing,
    Resolved,
    Cancelled,
    Failed,
}

/// The single outstanding lookup.
#[derive(Debug)]
struct RequestHandle {
    id: u64,
    abort: AbortHandle,
}

/// A lookup the caller has to drive to completion.
#[must_use = "a pending lookup does nothing unless resolved and completed"]
pub struct PendingLookup {
    id: u64,
    position: CanonicalFen,
    lookup: Abortable<BoxFuture<'static, Result<ProbeAnswer, TablebaseError>>>,
}

impl PendingLookup {
    pub fn position(&self) -> &CanonicalFen {
        &self.position
    }

    /// Wait for the lookup. An aborted lookup resolves to
    /// [`TablebaseError::Cancelled`].
    pub async fn resolve(self) -> Completion {
        let result = match self.lookup.await {
            Ok(result) => result,
            Err(_aborted) => Err(TablebaseError::Cancelled),
        };
        Completion {
            id: self.id,
            position: self.position,
            result,
        }
    }
}

/// Outcome of a [`PendingLookup`].
#[derive(Debug)]
pub struct Completion {
    id: u64,
    position: CanonicalFen,
    result: Result<ProbeAnswer, TablebaseError>,
}

impl Completion {
    pub fn position(&self) -> &CanonicalFen {
        &self.position
    }

    pub fn result(&self) -> &Result<ProbeAnswer, TablebaseError> {
        &self.result
    }
}

pub struct ProbeOrchestrator<S, R = ShakmatyRules> {
    source: S,
    rules: R,
    cache: ResultCache,
    history: HistorySync,
    in_flight: Option<RequestHandle>,
    next_id: u64,
    state: ProbeState,
    view: View,
}

impl<S: TablebaseSource> ProbeOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self::with_rules(source, ShakmatyRules::default())
    }
}

impl<S: TablebaseSource, R: RulesEngine> ProbeOrchestrator<S, R> {
    pub fn with_rules(source: S, rules: R) -> Self {
        Self {
            source,
            rules,
            cache: ResultCache::new(),
            history: HistorySync::default(),
            in_flight: None,
            next_id: 0,
            state: ProbeState::Idle,
            view: View::new(CanonicalFen::default_position(), Status::InsufficientMaterial)
                .with_note(Some(Note::Introduction)),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn history(&self) -> &HistorySync {
        &self.history
    }

    pub fn is_probing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Show `position`, recording a history entry if `push` is set.
    ///
    /// Returns a lookup to drive when the answer is neither known locally
    /// nor cached. Any lookup still in flight is cancelled first.
    pub fn probe(&mut self, position: CanonicalFen, push: bool) -> Option<PendingLookup> {
        self.history.on_position_change(&position, push);
        self.abort_in_flight();
        self.state = ProbeState::Idle;

        if position.as_str() == DEFAULT_FEN {
            self.settle(
                View::new(position, Status::InsufficientMaterial).with_note(Some(Note::Introduction)),
            );
            return None;
        }
        if position.as_str() == STARTING_FEN {
            self.settle(View::new(position, Status::NotFound).with_note(Some(Note::NotSolved)));
            return None;
        }

        if !self.rules.load(position.as_str()) {
            let err = TablebaseError::IllegalPosition(position.to_string());
            self.fail(position, err);
            return None;
        }
        if self.rules.is_checkmate() {
            let winner = self.rules.turn().other();
            self.settle(View::new(position, Status::Checkmate { winner }));
            return None;
        }
        if self.rules.is_stalemate() {
            self.settle(View::new(position, Status::Stalemate));
            return None;
        }
        if self.rules.is_insufficient_material() {
            self.settle(
                View::new(position, Status::InsufficientMaterial).with_note(Some(Note::DeadPosition)),
            );
            return None;
        }

        if let Some(answer) = self.cache.get(&position).cloned() {
            debug!(fen = %position, "cache hit");
            self.resolve(position, &answer);
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        let (abort, registration) = AbortHandle::new_pair();
        let lookup = Abortable::new(self.source.lookup(&position), registration);

        info!(fen = %position, request = id, "probing tablebase");
        self.in_flight = Some(RequestHandle { id, abort });
        self.state = ProbeState::Probing;
        self.view = View::new(position.clone(), Status::Probing);

        Some(PendingLookup {
            id,
            position,
            lookup,
        })
    }

    /// Canonicalize user input and probe it. Input that does not describe a
    /// legal position falls back to the default position.
    pub fn probe_fen(&mut self, input: &str, push: bool) -> Option<PendingLookup> {
        let turn = self.view.position.turn();
        let position = canonicalize(&complete_fen(input, turn))
            .ok()
            .filter(|position| self.rules.load(position.as_str()))
            .unwrap_or_else(CanonicalFen::default_position);
        self.probe(position, push)
    }

    /// Apply the result of a lookup. Returns `false` if it belongs to a
    /// superseded request, in which case nothing changes.
    pub fn complete(&mut self, completion: Completion) -> bool {
        match &self.in_flight {
            Some(handle) if handle.id == completion.id => {}
            _ => {
                debug!(fen = %completion.position, request = completion.id, "discarding stale completion");
                return false;
            }
        }
        self.in_flight = None;

        self.state = match completion.result {
            Ok(answer) => {
                self.cache.insert(completion.position.clone(), answer.clone());
                self.resolve(completion.position, &answer)
            }
            Err(err) => self.fail(completion.position, err),
        };
        true
    }

    /// Probe and drive the lookup, if any, to completion.
    pub async fn probe_and_wait(&mut self, position: CanonicalFen, push: bool) -> &View {
        if let Some(pending) = self.probe(position, push) {
            let completion = pending.resolve().await;
            self.complete(completion);
        }
        &self.view
    }

    /// Abort the outstanding lookup and show the neutral cancelled state.
    pub fn cancel(&mut self) {
        if self.abort_in_flight() {
            let position = self.view.position.clone();
            self.state = self.fail(position, TablebaseError::Cancelled);
        }
    }

    /// Probe the current position again without touching history.
    pub fn retry(&mut self) -> Option<PendingLookup> {
        let position = self.view.retry.clone()?;
        self.probe(position, false)
    }

    /// Follow a move from the current list.
    pub fn select_move(&mut self, notation: &str) -> Result<Option<PendingLookup>, TablebaseError> {
        let target = self
            .view
            .moves
            .find(notation)
            .map(|m| m.resulting_position.clone())
            .ok_or_else(|| TablebaseError::UnknownMove(notation.to_owned()))?;
        Ok(self.probe(target, true))
    }

    /// Restore the position of a navigation entry without pushing a new one.
    pub fn navigate(&mut self, entry: &HistoryEntry) -> Option<PendingLookup> {
        let position = entry
            .fen()
            .and_then(|fen| canonicalize(&complete_fen(&fen, Color::White)).ok())
            .unwrap_or_else(CanonicalFen::default_position);
        self.probe(position, false)
    }

    pub fn back(&mut self) -> Option<PendingLookup> {
        let entry = self.history.back()?;
        self.navigate(&entry)
    }

    pub fn forward(&mut self) -> Option<PendingLookup> {
        let entry = self.history.forward()?;
        self.navigate(&entry)
    }

    fn abort_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                debug!(request = handle.id, "cancelling superseded request");
                handle.abort.abort();
                self.state = ProbeState::Cancelled;
                true
            }
            None => false,
        }
    }

    /// Show the classified answer. Returns the state a lookup ending here
    /// settles in.
    fn resolve(&mut self, position: CanonicalFen, answer: &ProbeAnswer) -> ProbeState {
        match classify(&position, answer, &mut self.rules) {
            Ok(moves) => {
                let mut view = View::new(position.clone(), Status::for_answer(answer, position.turn()))
                    .with_note(Note::for_answer(answer));
                view.moves = moves;
                self.settle(view);
                ProbeState::Resolved
            }
            Err(err) => self.fail(position, err),
        }
    }

    fn settle(&mut self, view: View) {
        self.view = view;
    }

    fn fail(&mut self, position: CanonicalFen, err: TablebaseError) -> ProbeState {
        let kind = err.kind();
        let (state, retry) = match kind {
            ErrorKind::Cancelled => {
                debug!(fen = %position, "request cancelled");
                (ProbeState::Cancelled, None)
            }
            ErrorKind::InvalidPosition => {
                warn!(fen = %position, error = %err, "invalid position");
                (ProbeState::Failed, None)
            }
            ErrorKind::NetworkOrServerError => {
                warn!(fen = %position, error = %err, "probe failed");
                (ProbeState::Failed, Some(position.clone()))
            }
        };
        let mut view = View::new(
            position,
            Status::Failed {
                kind,
                message: err.to_string(),
            },
        );
        view.retry = retry;
        self.view = view;
        state
    }
}
