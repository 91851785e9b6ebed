//! Symbol-at-a-time driving for interactive front ends.
//!
//! [`Nfa::advance`] leaves step numbering to the caller. A [`Simulation`]
//! owns the counter and records the initial snapshot, so a stepper UI can
//! feed symbols as the user enters them and end up with the same trace
//! [`Nfa::process_string`] would produce.

use crate::automaton::{Nfa, StateSet};
use crate::trace::{SymbolMove, TraceRecorder};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Simulation {
    nfa: Nfa,
    step: usize,
}

impl Simulation {
    /// Take ownership of `nfa` and start a fresh run.
    pub fn new(nfa: Nfa) -> Self {
        let mut sim = Self { nfa, step: 0 };
        sim.restart();
        sim
    }

    /// Reset the automaton and record the step-0 initial event.
    pub fn restart(&mut self) {
        self.step = 0;
        self.nfa.process_string("");
        debug!(states = ?self.nfa.current_states(), "Simulation restarted");
    }

    /// Consume one symbol and return the symbol move it recorded.
    pub fn step(&mut self, symbol: &str) -> &SymbolMove {
        self.step += 1;
        self.nfa.advance(symbol, self.step);
        self.last_move()
    }

    /// Consume every character of `input` in order.
    pub fn feed(&mut self, input: &str) -> &StateSet {
        let mut buf = [0u8; 4];
        for c in input.chars() {
            self.step(c.encode_utf8(&mut buf));
        }
        self.nfa.current_states()
    }

    /// Number of symbols consumed since the last restart.
    pub fn step_count(&self) -> usize {
        self.step
    }

    /// Most recent symbol move, or the initial snapshot before any step.
    pub fn last_move(&self) -> &SymbolMove {
        self.nfa
            .trace()
            .symbol_moves()
            .last()
            .unwrap_or_else(|| unreachable!("restart always records the initial event"))
    }

    pub fn current_states(&self) -> &StateSet {
        self.nfa.current_states()
    }

    pub fn is_accepted(&self) -> bool {
        self.nfa.is_accepted()
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn trace(&self) -> &TraceRecorder {
        self.nfa.trace()
    }

    pub fn into_trace(mut self) -> TraceRecorder {
        self.nfa.take_trace()
    }
}
