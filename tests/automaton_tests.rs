//! Tests for the epsilon-NFA core: closure, moves, acceptance.

use nfa_trace::*;

fn set(states: &[StateId]) -> StateSet {
    states.iter().copied().collect()
}

/// alphabet {a, b, #}, start {0}, final {2},
/// (0,a) -> [0,1], (1,b) -> [2], (0,#) -> [2]
fn example_nfa() -> Nfa {
    let transitions: TransitionTable = [
        ((0, "a"), vec![0, 1]),
        ((1, "b"), vec![2]),
        ((0, EPSILON), vec![2]),
    ]
    .into_iter()
    .collect();
    Nfa::new(
        vec!["a".into(), "b".into(), EPSILON.into()],
        3,
        [0],
        [2],
        transitions,
    )
}

/// The example plus (1,#) -> [0] and (2,#) -> [1].
fn cyclic_nfa() -> Nfa {
    let transitions: TransitionTable = [
        ((0, "a"), vec![0, 1]),
        ((1, "b"), vec![2]),
        ((0, EPSILON), vec![2]),
        ((1, EPSILON), vec![0]),
        ((2, EPSILON), vec![1]),
    ]
    .into_iter()
    .collect();
    Nfa::new(
        vec!["a".into(), "b".into(), EPSILON.into()],
        3,
        [0],
        [2],
        transitions,
    )
}

#[test]
fn test_construction_applies_start_closure() {
    let nfa = example_nfa();
    assert_eq!(nfa.current_states(), &set(&[0, 2]));
    assert!(nfa.is_accepted());
    assert_eq!(nfa.alphabet(), &["a", "b", "#"]);
    assert_eq!(nfa.num_states(), 3);
    assert_eq!(nfa.start_states(), &set(&[0]));
    assert_eq!(nfa.final_states(), &set(&[2]));
}

#[test]
fn test_construction_records_step_zero_expansion() {
    let nfa = example_nfa();
    let eps = nfa.trace().epsilon_moves();
    assert_eq!(eps.len(), 1);
    assert_eq!(eps[0].step, 0);
    assert_eq!(eps[0].from_states, set(&[0]));
    assert_eq!(eps[0].to_states, set(&[0, 2]));
    assert!(eps[0].accepted);
    assert!(nfa.trace().symbol_moves().is_empty());
}

#[test]
fn test_advance_replaces_current_states() {
    let mut nfa = example_nfa();
    let current = nfa.advance("a", 1).clone();
    // 2 has no 'a' transition and is only back because of 0's closure
    assert_eq!(current, set(&[0, 1, 2]));
    assert!(nfa.is_accepted());

    nfa.advance("b", 2);
    assert_eq!(nfa.current_states(), &set(&[2]));
    assert!(nfa.is_accepted());

    nfa.advance("b", 3);
    assert!(nfa.current_states().is_empty());
    assert!(!nfa.is_accepted());
}

#[test]
fn test_advance_records_raw_move_and_post_closure_acceptance() {
    let mut nfa = example_nfa();
    nfa.advance("a", 1);

    let moves = nfa.trace().symbol_moves();
    assert_eq!(moves.len(), 1);
    let m = &moves[0];
    assert_eq!(m.step, 1);
    assert_eq!(m.symbol.as_deref(), Some("a"));
    assert_eq!(m.from_states, set(&[0, 2]));
    assert_eq!(m.to_states, set(&[0, 1]));
    assert!(m.accepted);

    let eps = nfa.trace().epsilon_moves();
    assert_eq!(eps.len(), 2);
    assert_eq!(eps[1].step, 1);
    assert_eq!(eps[1].from_states, set(&[0, 1]));
    assert_eq!(eps[1].to_states, set(&[0, 1, 2]));
}

#[test]
fn test_acceptance_flag_is_evaluated_after_the_move() {
    // Accepting before the move, rejecting after it.
    let transitions: TransitionTable = [((0, "a"), vec![1])].into_iter().collect();
    let mut nfa = Nfa::new(vec!["a".into()], 2, [0], [0], transitions);
    assert!(nfa.is_accepted());

    nfa.advance("a", 1);
    assert!(!nfa.trace().symbol_moves()[0].accepted);
    assert!(!nfa.is_accepted());
}

#[test]
fn test_unknown_symbol_empties_the_state_set() {
    let mut nfa = example_nfa();
    nfa.advance("z", 1);
    assert!(nfa.current_states().is_empty());
    assert!(!nfa.is_accepted());
}

#[test]
fn test_empty_state_set_stays_empty() {
    let transitions: TransitionTable = [((0, "a"), vec![0])].into_iter().collect();
    let mut nfa = Nfa::new(vec![], 1, StateSet::new(), [0], transitions);
    assert!(nfa.current_states().is_empty());
    assert!(!nfa.is_accepted());

    for (step, symbol) in ["a", "b", EPSILON].into_iter().enumerate() {
        nfa.advance(symbol, step + 1);
        assert!(nfa.current_states().is_empty());
        assert!(!nfa.is_accepted());
    }
}

#[test]
fn test_out_of_range_states_are_accepted_silently() {
    let transitions: TransitionTable = [((0, "a"), vec![42])].into_iter().collect();
    let mut nfa = Nfa::new(vec![], 1, [0], [42], transitions);
    nfa.advance("a", 1);
    assert_eq!(nfa.current_states(), &set(&[42]));
    assert!(nfa.is_accepted());
}

#[test]
fn test_closure_properties() {
    let nfa = cyclic_nfa();
    let inputs = [set(&[]), set(&[0]), set(&[1]), set(&[2]), set(&[1, 2]), set(&[7])];

    for s in &inputs {
        let closure = nfa.epsilon_closure(s);
        assert!(s.is_subset(&closure), "closure must contain {s:?}");
        assert_eq!(nfa.epsilon_closure(&closure), closure, "closure of {s:?} not idempotent");
        assert_eq!(nfa.epsilon_closure(s), closure, "closure of {s:?} not deterministic");
    }

    assert_eq!(nfa.epsilon_closure(&set(&[1])), set(&[0, 1, 2]));
    assert_eq!(nfa.epsilon_closure(&set(&[7])), set(&[7]));
}

#[test]
fn test_epsilon_closure_records_nothing() {
    let nfa = cyclic_nfa();
    let before = nfa.trace().clone();
    nfa.epsilon_closure(&set(&[2]));
    assert_eq!(nfa.trace(), &before);
}

#[test]
fn test_one_epsilon_event_per_added_state() {
    let nfa = cyclic_nfa();
    let eps = nfa.trace().epsilon_moves();
    // closure({0}): 0 -> 2, then 2 -> 1; 1 -> 0 adds nothing
    assert_eq!(eps.len(), 2);
    assert_eq!(eps[0].from_states, set(&[0]));
    assert_eq!(eps[0].to_states, set(&[0, 2]));
    assert_eq!(eps[1].from_states, set(&[0, 2]));
    assert_eq!(eps[1].to_states, set(&[0, 1, 2]));
    assert!(eps.iter().all(|e| e.step == 0 && e.accepted));
}

#[test]
fn test_reset_restarts_run_and_trace() {
    let mut nfa = example_nfa();
    nfa.advance("a", 1);
    nfa.advance("b", 2);
    nfa.reset();

    assert_eq!(nfa.current_states(), &set(&[0, 2]));
    assert!(nfa.trace().symbol_moves().is_empty());
    assert_eq!(nfa.trace().epsilon_moves().len(), 1);
}

#[test]
fn test_process_string_step_counting() {
    let mut nfa = cyclic_nfa();
    let input = "abababa";
    let trace = nfa.process_string(input);

    let moves = trace.symbol_moves();
    assert_eq!(moves.len(), input.len() + 1);
    for (i, m) in moves.iter().enumerate() {
        assert_eq!(m.step, i);
    }
    assert_eq!(moves[0].symbol, None);
    assert!(moves[0].from_states.is_empty());
    assert_eq!(moves[0].to_states, set(&[0, 1, 2]));
    assert!(moves[0].accepted);

    let symbols: String = moves[1..]
        .iter()
        .map(|m| m.symbol.as_deref().unwrap())
        .collect();
    assert_eq!(symbols, input);
}

#[test]
fn test_process_string_acceptance_consistency() {
    for input in ["", "a", "ab", "abb", "ba", "aab"] {
        let mut nfa = example_nfa();
        nfa.process_string(input);
        let expected = !nfa.current_states().is_disjoint(nfa.final_states());
        assert_eq!(nfa.is_accepted(), expected, "input {input:?}");
    }

    let mut nfa = example_nfa();
    nfa.process_string("abb");
    assert!(!nfa.is_accepted());
}

#[test]
fn test_process_string_starts_from_scratch() {
    let mut nfa = example_nfa();
    nfa.process_string("abb");
    assert!(nfa.current_states().is_empty());

    let trace = nfa.process_string("ab");
    assert_eq!(trace.symbol_moves().len(), 3);
    assert_eq!(nfa.current_states(), &set(&[2]));
}

#[test]
fn test_take_trace_leaves_empty_recorder() {
    let mut nfa = example_nfa();
    nfa.process_string("a");
    let trace = nfa.take_trace();
    assert_eq!(trace.symbol_moves().len(), 2);
    assert!(nfa.trace().is_empty());
    assert_eq!(nfa.current_states(), &set(&[0, 1, 2]));
}
