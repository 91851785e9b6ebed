//! Append-only log of the transitions taken during a run.
//!
//! Two streams are kept: symbol moves (one per consumed input symbol, plus
//! the step-0 initial snapshot) and epsilon expansions (one per state added
//! while computing a closure). [`TraceRecorder::merged`] interleaves them
//! into a single chronological sequence for presentation.

use crate::automaton::StateSet;
use serde::{Deserialize, Serialize};

/// A move that consumed one input symbol, or the initial snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMove {
    /// Step index. 0 is the pre-input snapshot.
    pub step: usize,

    /// The consumed symbol, or `None` for the initial snapshot.
    pub symbol: Option<String>,

    /// Active states before the move.
    pub from_states: StateSet,

    /// States reached by the raw move, before epsilon closure. For the
    /// initial snapshot this is the closure of the start states.
    pub to_states: StateSet,

    /// Whether the automaton accepts once the move and its closure are done.
    pub accepted: bool,
}

/// A single epsilon expansion: exactly one state added to a closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpsilonMove {
    /// Step index of the move (or reset) whose closure this belongs to.
    pub step: usize,

    /// Closure before the state was added.
    pub from_states: StateSet,

    /// Closure after the state was added.
    pub to_states: StateSet,

    /// Acceptance evaluated on `to_states`.
    pub accepted: bool,
}

/// One entry of the merged trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Symbol(SymbolMove),
    Epsilon(EpsilonMove),
}

impl TraceEvent {
    pub fn step(&self) -> usize {
        match self {
            TraceEvent::Symbol(m) => m.step,
            TraceEvent::Epsilon(m) => m.step,
        }
    }

    pub fn from_states(&self) -> &StateSet {
        match self {
            TraceEvent::Symbol(m) => &m.from_states,
            TraceEvent::Epsilon(m) => &m.from_states,
        }
    }

    pub fn to_states(&self) -> &StateSet {
        match self {
            TraceEvent::Symbol(m) => &m.to_states,
            TraceEvent::Epsilon(m) => &m.to_states,
        }
    }

    pub fn accepted(&self) -> bool {
        match self {
            TraceEvent::Symbol(m) => m.accepted,
            TraceEvent::Epsilon(m) => m.accepted,
        }
    }

    /// The consumed symbol. Always `None` for epsilon expansions.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            TraceEvent::Symbol(m) => m.symbol.as_deref(),
            TraceEvent::Epsilon(_) => None,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, TraceEvent::Epsilon(_))
    }
}

/// Records symbol moves and epsilon expansions as they happen.
///
/// Sets are copied on record, so later changes to the caller's sets never
/// reach the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceRecorder {
    symbol_moves: Vec<SymbolMove>,
    epsilon_moves: Vec<EpsilonMove>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a symbol move. `symbol` is `None` for the initial snapshot.
    pub fn record_symbol_move(
        &mut self,
        symbol: Option<&str>,
        from_states: &StateSet,
        to_states: &StateSet,
        accepted: bool,
        step: usize,
    ) {
        self.symbol_moves.push(SymbolMove {
            step,
            symbol: symbol.map(str::to_owned),
            from_states: from_states.clone(),
            to_states: to_states.clone(),
            accepted,
        });
    }

    /// Append an epsilon expansion tagged with the step it occurred during.
    pub fn record_epsilon_move(
        &mut self,
        from_states: &StateSet,
        to_states: &StateSet,
        accepted: bool,
        step: usize,
    ) {
        self.epsilon_moves.push(EpsilonMove {
            step,
            from_states: from_states.clone(),
            to_states: to_states.clone(),
            accepted,
        });
    }

    pub fn symbol_moves(&self) -> &[SymbolMove] {
        &self.symbol_moves
    }

    pub fn epsilon_moves(&self) -> &[EpsilonMove] {
        &self.epsilon_moves
    }

    pub fn len(&self) -> usize {
        self.symbol_moves.len() + self.epsilon_moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_moves.is_empty() && self.epsilon_moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbol_moves.clear();
        self.epsilon_moves.clear();
    }

    /// Interleave both streams chronologically.
    ///
    /// Before each symbol move, every pending epsilon expansion whose step
    /// is at most that move's step is emitted, in recording order. Epsilon
    /// expansions past the last symbol move are appended at the end.
    /// Neither stream is reordered.
    pub fn merged(&self) -> Vec<TraceEvent> {
        let mut out = Vec::with_capacity(self.len());
        let mut pending = self.epsilon_moves.iter().peekable();

        for symbol_move in &self.symbol_moves {
            while let Some(eps) = pending.next_if(|e| e.step <= symbol_move.step) {
                out.push(TraceEvent::Epsilon(eps.clone()));
            }
            out.push(TraceEvent::Symbol(symbol_move.clone()));
        }

        out.extend(pending.cloned().map(TraceEvent::Epsilon));
        out
    }
}
