//! Replay recorded traces against a fresh simulation.
//!
//! The symbols consumed in a recorded trace are fed to a new automaton built
//! from the same definition, and the resulting merged trace must match the
//! recording event for event.

use crate::definition::NfaDefinition;
use crate::emitter::{load_trace, read_trace};
use crate::error::{Error, ReplayError};
use crate::simulation::Simulation;
use crate::trace::TraceEvent;
use similar::{ChangeTag, TextDiff};
use std::path::Path;
use tracing::{debug, info};

/// Replay `recorded` against a new automaton built from `definition`.
///
/// 1. Collect the symbols of every symbol move after the initial snapshot
/// 2. Drive a [`Simulation`] with them
/// 3. Compare the fresh merged trace to `recorded`, reporting the first
///    divergent event as a unified diff
pub fn replay_trace(definition: &NfaDefinition, recorded: &[TraceEvent]) -> Result<(), Error> {
    info!(events = recorded.len(), "Replaying trace");

    let symbols = consumed_symbols(recorded)?;
    debug!(symbols = symbols.len(), "Extracted consumed symbols");

    let mut sim = Simulation::new(definition.build());
    for symbol in &symbols {
        sim.step(symbol);
    }
    let replayed = sim.trace().merged();

    for (index, (expected, found)) in recorded.iter().zip(&replayed).enumerate() {
        if expected != found {
            let diff = unified_diff(&format!("{expected:#?}"), &format!("{found:#?}"));
            return Err(ReplayError::EventMismatch {
                index,
                diff: format!("--- recorded\n+++ replayed\n{diff}"),
            }
            .into());
        }
    }

    if recorded.len() != replayed.len() {
        return Err(ReplayError::LengthMismatch {
            expected: recorded.len(),
            found: replayed.len(),
        }
        .into());
    }

    info!(events = replayed.len(), "Trace replayed successfully");
    Ok(())
}

/// Replay an NDJSON trace held in a string.
///
/// Convenience function for testing with inline trace data.
pub fn replay_trace_str(definition: &NfaDefinition, ndjson: &str) -> Result<(), Error> {
    let recorded = read_trace(ndjson.as_bytes())?;
    replay_trace(definition, &recorded)
}

/// Replay an NDJSON trace file.
pub fn replay_trace_file(definition: &NfaDefinition, path: &Path) -> Result<(), Error> {
    let recorded = load_trace(path)?;
    replay_trace(definition, &recorded)
}

fn consumed_symbols(recorded: &[TraceEvent]) -> Result<Vec<&str>, ReplayError> {
    let mut symbols = Vec::new();
    for (index, event) in recorded.iter().enumerate() {
        let TraceEvent::Symbol(m) = event else {
            continue;
        };
        if m.step == 0 {
            continue;
        }
        let symbol = m
            .symbol
            .as_deref()
            .ok_or(ReplayError::InvalidSymbol { index, step: m.step })?;
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Produce a unified diff between two debug-formatted strings.
fn unified_diff(left: &str, right: &str) -> String {
    let diff = TextDiff::from_lines(left, right);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(sign);
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
