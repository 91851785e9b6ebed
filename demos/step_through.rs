//! Example: drive an epsilon-NFA one symbol at a time and print the trace.
//!
//! Run with: cargo run --example step_through -- abab

use nfa_trace::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args().nth(1).unwrap_or_else(|| "abab".to_string());

    let def = NfaDefinition::from_lines(
        parse_alphabet("a,b,#"),
        3,
        parse_state_list("0")?,
        parse_state_list("2")?,
        ["0,a,0,1", "1,b,2", "0,#,2", "2,#,1"],
    )?;

    let mut sim = Simulation::new(def.build());
    println!("start: {:?} (accepted: {})", sim.current_states(), sim.is_accepted());

    let mut buf = [0u8; 4];
    for c in input.chars() {
        let m = sim.step(c.encode_utf8(&mut buf));
        println!(
            "step {}: {:?} --{}--> {:?}",
            m.step,
            m.from_states,
            c,
            m.to_states
        );
        println!("  now: {:?} (accepted: {})", sim.current_states(), sim.is_accepted());
    }

    println!("\nmerged trace:");
    for event in sim.trace().merged() {
        let label = event.symbol().unwrap_or(EPSILON);
        println!(
            "  [{}] {:?} --{}--> {:?}{}",
            event.step(),
            event.from_states(),
            label,
            event.to_states(),
            if event.accepted() { " *" } else { "" }
        );
    }

    Ok(())
}
