//! Example: record a run as NDJSON, then replay it against the definition.
//!
//! Run with: cargo run --example replay_ndjson

use nfa_trace::*;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let trace_path = Path::new("target/example_trace.ndjson");

    let def = NfaDefinition::from_json(
        r##"{
            "alphabet": ["a", "b", "#"],
            "num_states": 3,
            "start_states": [0],
            "final_states": [2],
            "transitions": [
                {"from": 0, "symbol": "a", "to": [0, 1]},
                {"from": 1, "symbol": "b", "to": [2]},
                {"from": 0, "symbol": "#", "to": [2]}
            ]
        }"##,
    )?;
    def.validate()?;

    println!("Recording run to {}...", trace_path.display());
    let mut nfa = def.build();
    let events = nfa.process_string("aab").merged();

    let mut emitter = TraceEmitter::create(trace_path)?;
    emitter.emit_all(&events)?;
    let count = emitter.finish()?;
    println!("Recorded {count} events (accepted: {})", nfa.is_accepted());

    println!("Replaying...");
    match replay_trace_file(&def, trace_path) {
        Ok(()) => println!("✓ Trace replays identically."),
        Err(e) => {
            println!("✗ {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
