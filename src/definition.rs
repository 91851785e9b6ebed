//! Automaton definitions and the text format used to enter them.
//!
//! Transitions are written one per line as `from_state,symbol,to1,to2,...`.
//! Lines sharing a `(from_state, symbol)` key have their destinations
//! concatenated, so nondeterministic fan-out can be spread over several
//! lines. Whitespace around fields is ignored, as are blank lines.
//!
//! ```
//! use nfa_trace::{NfaDefinition, parse_alphabet};
//!
//! let def = NfaDefinition::from_lines(
//!     parse_alphabet("a, b, #"),
//!     3,
//!     vec![0],
//!     vec![2],
//!     ["0,a,0,1", "1,b,2", "0,#,2"],
//! )?;
//! let nfa = def.build();
//! assert!(nfa.is_accepted());
//! # Ok::<(), nfa_trace::DefinitionError>(())
//! ```

use crate::automaton::{Nfa, StateId, TransitionTable};
use crate::builder::impl_builder;
use crate::error::{DefinitionError, Error};
use serde::{Deserialize, Serialize};

/// Everything needed to construct an [`Nfa`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NfaDefinition {
    /// Symbols offered to the user. Informational; never consulted by moves.
    pub alphabet: Vec<String>,

    /// Declared number of states.
    pub num_states: usize,

    /// States occupied before the initial closure.
    pub start_states: Vec<StateId>,

    /// Accepting states.
    pub final_states: Vec<StateId>,

    pub transitions: TransitionTable,
}

impl_builder!(NfaDefinition, NfaDefinitionBuilder {
    required { start_states: Vec<StateId> }
    optional {
        alphabet: Vec<String>,
        num_states: usize,
        final_states: Vec<StateId>,
        transitions: TransitionTable,
    }
});

impl NfaDefinition {
    /// Build a definition from transition lines.
    pub fn from_lines<I>(
        alphabet: Vec<String>,
        num_states: usize,
        start_states: Vec<StateId>,
        final_states: Vec<StateId>,
        lines: I,
    ) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut transitions = TransitionTable::new();
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let (from, symbol, to) = parse_transition_line(i + 1, line)?;
            transitions.insert(from, symbol, to);
        }

        Ok(Self {
            alphabet,
            num_states,
            start_states,
            final_states,
            transitions,
        })
    }

    /// Parse a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every referenced state lies in `[0, num_states)`.
    ///
    /// Construction never calls this; it is for callers that want strict
    /// definitions.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let referenced = self
            .start_states
            .iter()
            .chain(&self.final_states)
            .copied()
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|(from, _, to)| std::iter::once(from).chain(to.iter().copied())),
            );

        for state in referenced {
            if state >= self.num_states {
                return Err(DefinitionError::StateOutOfRange {
                    state,
                    num_states: self.num_states,
                });
            }
        }
        Ok(())
    }

    /// Construct the automaton, reset to its start closure.
    pub fn build(&self) -> Nfa {
        self.clone().into()
    }
}

impl From<NfaDefinition> for Nfa {
    fn from(def: NfaDefinition) -> Self {
        Nfa::new(
            def.alphabet,
            def.num_states,
            def.start_states,
            def.final_states,
            def.transitions,
        )
    }
}

/// Parse one `from_state,symbol,to1,to2,...` line. `line_no` is 1-based and
/// only used in errors.
pub fn parse_transition_line(
    line_no: usize,
    line: &str,
) -> Result<(StateId, String, Vec<StateId>), DefinitionError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(DefinitionError::MalformedLine {
            line: line_no,
            content: line.to_string(),
        });
    }

    let from = parse_state(line_no, fields[0])?;
    let symbol = fields[1];
    if symbol.is_empty() {
        return Err(DefinitionError::EmptySymbol { line: line_no });
    }
    let to = fields[2..]
        .iter()
        .map(|token| parse_state(line_no, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((from, symbol.to_string(), to))
}

/// Parse newline-separated transition lines into a table.
pub fn parse_transitions(text: &str) -> Result<TransitionTable, DefinitionError> {
    let mut table = TransitionTable::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (from, symbol, to) = parse_transition_line(i + 1, line)?;
        table.insert(from, symbol, to);
    }
    Ok(table)
}

/// Parse a comma-separated state list such as `"0, 2"`. Empty input gives
/// an empty list.
pub fn parse_state_list(text: &str) -> Result<Vec<StateId>, DefinitionError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse()
                .map_err(|e: std::num::ParseIntError| DefinitionError::InvalidStateList {
                    token: token.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// Parse a comma-separated alphabet such as `"a, b, #"`.
pub fn parse_alphabet(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_state(line: usize, token: &str) -> Result<StateId, DefinitionError> {
    token.parse().map_err(|e: std::num::ParseIntError| DefinitionError::InvalidState {
        line,
        token: token.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_with_fan_out() {
        let (from, symbol, to) = parse_transition_line(1, " 0 , a , 1 , 2 ").unwrap();
        assert_eq!(from, 0);
        assert_eq!(symbol, "a");
        assert_eq!(to, vec![1, 2]);
    }

    #[test]
    fn parse_line_too_few_fields() {
        let err = parse_transition_line(4, "0,a").unwrap_err();
        assert_eq!(
            err,
            DefinitionError::MalformedLine {
                line: 4,
                content: "0,a".to_string()
            }
        );
    }

    #[test]
    fn parse_line_non_integer_state() {
        let err = parse_transition_line(2, "0,a,x").unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidState { line: 2, ref token, .. } if token == "x"));

        let err = parse_transition_line(2, "-1,a,0").unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidState { .. }));
    }

    #[test]
    fn parse_line_empty_symbol() {
        assert_eq!(
            parse_transition_line(3, "0, ,1").unwrap_err(),
            DefinitionError::EmptySymbol { line: 3 }
        );
    }

    #[test]
    fn parse_transitions_skips_blank_lines_and_merges() {
        let table = parse_transitions("0,a,1\n\n0,a,2\n1,#,0\n").unwrap();
        assert_eq!(table.get(0, "a"), &[1, 2]);
        assert_eq!(table.epsilon(1), &[0]);
    }

    #[test]
    fn parse_transitions_reports_line_number() {
        let err = parse_transitions("0,a,1\n\nbad").unwrap_err();
        assert!(matches!(err, DefinitionError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn parse_lists() {
        assert_eq!(parse_state_list("0, 2").unwrap(), vec![0, 2]);
        assert!(parse_state_list("").unwrap().is_empty());
        assert!(parse_state_list("1,z").is_err());
        assert_eq!(parse_alphabet("a, b,,#"), vec!["a", "b", "#"]);
    }

    #[test]
    fn builder_missing_required_field() {
        let err = NfaDefinition::builder().build().unwrap_err();
        assert!(err.to_string().contains("start_states"));
    }

    #[test]
    fn builder_fills_defaults() {
        let def = NfaDefinition::builder().start_states(vec![0]).build().unwrap();
        assert_eq!(def.start_states, vec![0]);
        assert!(def.alphabet.is_empty());
        assert_eq!(def.num_states, 0);
        assert!(def.transitions.is_empty());
    }
}
