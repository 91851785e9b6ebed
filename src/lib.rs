//! nfa-trace: step-by-step epsilon-NFA simulation with a replayable trace.
//!
//! An [`Nfa`] holds a static transition table and a live set of active
//! states. Driving it one symbol at a time records every transition into a
//! [`TraceRecorder`]: one [`SymbolMove`] per consumed symbol and one
//! [`EpsilonMove`] per state added by an epsilon closure. The recorder's
//! [`merged`](TraceRecorder::merged) output is a single chronological
//! sequence a front end can render as a step list or derivation tree
//! without re-running any automaton logic.
//!
//! Epsilon transitions use the reserved symbol [`EPSILON`] (`#`).
//!
//! # Quick Start
//!
//! ```
//! use nfa_trace::*;
//!
//! let def = NfaDefinition::from_lines(
//!     parse_alphabet("a,b,#"),
//!     3,
//!     vec![0],
//!     vec![2],
//!     ["0,a,0,1", "1,b,2", "0,#,2"],
//! )?;
//!
//! let mut nfa = def.build();
//! let events = nfa.process_string("ab").merged();
//!
//! for event in &events {
//!     println!(
//!         "step {}: {:?} --{}--> {:?} (accepted: {})",
//!         event.step(),
//!         event.from_states(),
//!         event.symbol().unwrap_or(EPSILON),
//!         event.to_states(),
//!         event.accepted(),
//!     );
//! }
//! assert!(nfa.is_accepted());
//! # Ok::<(), Error>(())
//! ```

pub mod automaton;
mod builder;
pub mod definition;
#[cfg(feature = "emitter")]
pub mod emitter;
pub mod error;
#[cfg(feature = "replay")]
pub mod replay;
pub mod simulation;
pub mod trace;

// Re-export core types for convenience
pub use automaton::{is_epsilon, Nfa, StateId, StateSet, TransitionEntry, TransitionTable, EPSILON};
pub use definition::{
    parse_alphabet, parse_state_list, parse_transition_line, parse_transitions, NfaDefinition,
    NfaDefinitionBuilder,
};
#[cfg(feature = "emitter")]
pub use emitter::{load_trace, read_trace, TraceEmitter};
pub use error::{BuilderError, DefinitionError, Error, NfaResult, ReplayError};
#[cfg(feature = "replay")]
pub use replay::{replay_trace, replay_trace_file, replay_trace_str};
pub use simulation::Simulation;
pub use trace::{EpsilonMove, SymbolMove, TraceEvent, TraceRecorder};
