//! Typed errors for nfa-trace.
//!
//! The simulation core is total and never fails. Every error here comes
//! from the boundary: parsing definitions, building configuration, reading
//! recorded traces and replaying them.

use crate::automaton::StateId;
use thiserror::Error;

/// Top-level error type for nfa-trace operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error while parsing or validating an automaton definition.
    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// Error while building a configuration value.
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),

    /// Error while replaying a recorded trace.
    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error in the textual automaton definition.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DefinitionError {
    /// Transition line with fewer than three comma-separated fields.
    #[error("Line {line}: expected 'from_state,symbol,to1,to2,...', got '{content}'")]
    MalformedLine { line: usize, content: String },

    /// State token that is not a non-negative integer.
    #[error("Line {line}: invalid state '{token}': {reason}")]
    InvalidState {
        line: usize,
        token: String,
        reason: String,
    },

    /// Token in a comma-separated state list is not a non-negative integer.
    #[error("Invalid state '{token}' in state list: {reason}")]
    InvalidStateList { token: String, reason: String },

    /// Symbol field is empty.
    #[error("Line {line}: transition symbol is empty")]
    EmptySymbol { line: usize },

    /// State identifier outside `[0, num_states)`. Only reported by
    /// strict validation.
    #[error("State {state} is out of range for an automaton with {num_states} states")]
    StateOutOfRange { state: StateId, num_states: usize },
}

/// Error while building a configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuilderError {
    /// A required builder field was never set.
    #[error("{builder}: missing required field '{field}'")]
    MissingRequiredField {
        builder: &'static str,
        field: &'static str,
    },
}

/// Error while replaying a recorded trace.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplayError {
    /// Line of a recorded NDJSON trace is not a valid event.
    #[error("Invalid trace event on line {line}: {reason}")]
    InvalidJson { line: usize, reason: String },

    /// Recorded symbol move without a symbol after the initial event.
    #[error("Event {index}: symbol move at step {step} has no symbol")]
    InvalidSymbol { index: usize, step: usize },

    /// Recorded and replayed events differ.
    #[error("Event mismatch at index {index}:\n{diff}")]
    EventMismatch { index: usize, diff: String },

    /// Recorded and replayed traces have different lengths.
    #[error("Trace length mismatch: recorded {expected} events, replay produced {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Result type alias using nfa-trace's Error.
pub type NfaResult<T> = std::result::Result<T, Error>;
