//! Nondeterministic finite automaton with epsilon transitions.
//!
//! The automaton keeps a live set of active states and advances it one
//! symbol at a time. Every driven step, including each state added by an
//! epsilon closure, is logged into the automaton's [`TraceRecorder`].
//!
//! # Example
//!
//! ```
//! use nfa_trace::{Nfa, TransitionTable, EPSILON};
//!
//! let transitions: TransitionTable = [
//!     ((0, "a"), vec![0, 1]),
//!     ((1, "b"), vec![2]),
//!     ((0, EPSILON), vec![2]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut nfa = Nfa::new(vec!["a".into(), "b".into(), EPSILON.into()], 3, [0], [2], transitions);
//! assert_eq!(nfa.current_states().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
//!
//! nfa.advance("a", 1);
//! assert_eq!(nfa.current_states().iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//! assert!(nfa.is_accepted());
//! ```

use crate::trace::TraceRecorder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, trace};

/// Reserved symbol marking an epsilon transition.
pub const EPSILON: &str = "#";

/// State identifier. Not bounds-checked against the declared state count.
pub type StateId = usize;

/// A set of states. Ordered, so traces and closures are reproducible.
pub type StateSet = BTreeSet<StateId>;

/// Returns true if `symbol` is the epsilon marker.
pub fn is_epsilon(symbol: &str) -> bool {
    symbol == EPSILON
}

/// One `(from, symbol) -> to` row of a transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub from: StateId,
    pub symbol: String,
    pub to: Vec<StateId>,
}

/// Mapping from `(state, symbol)` to destination states.
///
/// Inserting an existing key appends to its destinations rather than
/// replacing them. A missing key means "no transition".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TransitionEntry>", into = "Vec<TransitionEntry>")]
pub struct TransitionTable {
    rows: BTreeMap<StateId, BTreeMap<String, Vec<StateId>>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append destinations for `(from, symbol)`.
    pub fn insert(
        &mut self,
        from: StateId,
        symbol: impl Into<String>,
        to: impl IntoIterator<Item = StateId>,
    ) {
        self.rows
            .entry(from)
            .or_default()
            .entry(symbol.into())
            .or_default()
            .extend(to);
    }

    /// Destinations for `(state, symbol)`; empty when there is no entry.
    pub fn get(&self, state: StateId, symbol: &str) -> &[StateId] {
        self.rows
            .get(&state)
            .and_then(|row| row.get(symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Epsilon destinations of `state`.
    pub fn epsilon(&self, state: StateId) -> &[StateId] {
        self.get(state, EPSILON)
    }

    /// All rows ordered by state, then symbol.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &str, &[StateId])> + '_ {
        self.rows.iter().flat_map(|(&from, row)| {
            row.iter()
                .map(move |(symbol, to)| (from, symbol.as_str(), to.as_slice()))
        })
    }

    /// Number of `(state, symbol)` keys.
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols appearing in any key, epsilon included.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.iter().map(|(_, symbol, _)| symbol).collect()
    }

    /// Raw move: union of destinations of every state in `states` on `symbol`.
    pub fn step(&self, states: &StateSet, symbol: &str) -> StateSet {
        states
            .iter()
            .flat_map(|&state| self.get(state, symbol).iter().copied())
            .collect()
    }

    /// Epsilon closure of `states`, calling `on_add(closure, added)` after
    /// each newly reached state is inserted.
    ///
    /// Depth-first with an explicit stack seeded in ascending order; the
    /// top of the stack is expanded first and destinations are pushed in
    /// table order.
    pub fn closure_with<F>(&self, states: &StateSet, mut on_add: F) -> StateSet
    where
        F: FnMut(&StateSet, StateId),
    {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for &next in self.epsilon(state) {
                if closure.insert(next) {
                    stack.push(next);
                    on_add(&closure, next);
                }
            }
        }

        closure
    }
}

impl From<Vec<TransitionEntry>> for TransitionTable {
    fn from(entries: Vec<TransitionEntry>) -> Self {
        let mut table = TransitionTable::new();
        for entry in entries {
            table.insert(entry.from, entry.symbol, entry.to);
        }
        table
    }
}

impl From<TransitionTable> for Vec<TransitionEntry> {
    fn from(table: TransitionTable) -> Self {
        table
            .iter()
            .map(|(from, symbol, to)| TransitionEntry {
                from,
                symbol: symbol.to_owned(),
                to: to.to_vec(),
            })
            .collect()
    }
}

impl<S, I> FromIterator<((StateId, S), I)> for TransitionTable
where
    S: Into<String>,
    I: IntoIterator<Item = StateId>,
{
    fn from_iter<T: IntoIterator<Item = ((StateId, S), I)>>(iter: T) -> Self {
        let mut table = TransitionTable::new();
        for ((from, symbol), to) in iter {
            table.insert(from, symbol, to);
        }
        table
    }
}

/// An epsilon-NFA being simulated.
///
/// The definition is immutable after construction; only the current-state
/// set and the trace change. The current-state set is replaced wholesale
/// after every closure, so it is never observed half-expanded.
#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet: Vec<String>,
    num_states: usize,
    start_states: StateSet,
    final_states: StateSet,
    transitions: TransitionTable,
    current: StateSet,
    trace: TraceRecorder,
}

impl Nfa {
    /// Build an automaton and reset it to the closure of its start states.
    ///
    /// No range or consistency checks are made; see
    /// [`NfaDefinition::validate`](crate::NfaDefinition::validate) for the
    /// strict variant.
    pub fn new(
        alphabet: Vec<String>,
        num_states: usize,
        start_states: impl IntoIterator<Item = StateId>,
        final_states: impl IntoIterator<Item = StateId>,
        transitions: TransitionTable,
    ) -> Self {
        let mut nfa = Self {
            alphabet,
            num_states,
            start_states: start_states.into_iter().collect(),
            final_states: final_states.into_iter().collect(),
            transitions,
            current: StateSet::new(),
            trace: TraceRecorder::new(),
        };
        nfa.reset();
        nfa
    }

    /// Epsilon closure of `states`. Pure; records nothing.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        self.transitions.closure_with(states, |_, _| {})
    }

    /// Restart the run: clear the trace and set the current states to the
    /// closure of the start states. Expansions are recorded at step 0.
    pub fn reset(&mut self) {
        self.trace.clear();
        let start = self.start_states.clone();
        self.current = self.record_closure(&start, 0);
        debug!(
            states = ?self.current,
            accepted = self.is_accepted(),
            "Reset to start closure"
        );
    }

    /// Consume one symbol.
    ///
    /// Records a symbol move from the current states to the raw destination
    /// set, then replaces the current states with the closure of that raw
    /// set. The recorded acceptance flag is evaluated after the closure.
    /// States without a transition on `symbol` are dropped.
    pub fn advance(&mut self, symbol: &str, step: usize) -> &StateSet {
        let raw = self.transitions.step(&self.current, symbol);
        let next = self.record_closure(&raw, step);
        let accepted = self.accepts(&next);

        self.trace
            .record_symbol_move(Some(symbol), &self.current, &raw, accepted, step);

        debug!(
            step,
            symbol,
            from = ?self.current,
            raw = ?raw,
            current = ?next,
            accepted,
            "Advanced"
        );

        self.current = next;
        &self.current
    }

    /// Run a whole input string from a fresh reset.
    ///
    /// Records the step-0 initial event, then advances once per character
    /// with steps `1..=N`.
    pub fn process_string(&mut self, input: &str) -> &TraceRecorder {
        info!(input, "Processing input");

        self.reset();
        let accepted = self.is_accepted();
        self.trace
            .record_symbol_move(None, &StateSet::new(), &self.current, accepted, 0);

        let mut buf = [0u8; 4];
        for (i, c) in input.chars().enumerate() {
            self.advance(c.encode_utf8(&mut buf), i + 1);
        }

        info!(
            steps = self.trace.symbol_moves().len(),
            accepted = self.is_accepted(),
            "Input processed"
        );
        &self.trace
    }

    /// True iff a current state is final.
    pub fn is_accepted(&self) -> bool {
        self.accepts(&self.current)
    }

    /// True iff `states` contains a final state.
    pub fn accepts(&self, states: &StateSet) -> bool {
        !states.is_disjoint(&self.final_states)
    }

    pub fn current_states(&self) -> &StateSet {
        &self.current
    }

    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn start_states(&self) -> &StateSet {
        &self.start_states
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn trace(&self) -> &TraceRecorder {
        &self.trace
    }

    /// Move the trace out, leaving an empty one behind.
    pub fn take_trace(&mut self) -> TraceRecorder {
        std::mem::take(&mut self.trace)
    }

    /// Closure of `states`, recording one epsilon move per added state.
    fn record_closure(&mut self, states: &StateSet, step: usize) -> StateSet {
        let final_states = &self.final_states;
        let recorder = &mut self.trace;

        self.transitions.closure_with(states, |closure, added| {
            let mut before = closure.clone();
            before.remove(&added);
            let accepted = !closure.is_disjoint(final_states);
            trace!(step, added, accepted, "Epsilon expansion");
            recorder.record_epsilon_move(&before, closure, accepted, step);
        })
    }
}
