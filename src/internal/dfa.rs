//! The table-driven DFA and its subset construction from an NFA.
//!
//! States are epsilon-closed NFA subsets interned by their canonical bit-set
//! form. The transition table is total: the empty subset is an ordinary dead
//! state, so stepping never needs a fallback path. Accept sets are interned
//! separately; their dense ids double as the input alphabet of a downstream
//! DFA.

use log::trace;

use crate::{GridrexError, GridrexErrorKind, Result};

use super::{minimizer, AcceptID, AcceptSetID, IdMap, IntSet, Nfa, Regex, StateID};

/// A deterministic finite automaton with a dense transition table.
///
/// State 0 is the start state.
#[derive(Debug, Clone)]
pub(crate) struct Dfa {
    pub(crate) alphabet_len: usize,
    pub(crate) accept_count: usize,
    /// `transitions[s * alphabet_len + c]` is the successor of state s on
    /// letter c.
    pub(crate) transitions: Vec<StateID>,
    /// The interned accept set of each state.
    pub(crate) accept_set_ids: Vec<AcceptSetID>,
    /// The distinct accept sets observed across states.
    pub(crate) accept_set_map: IdMap<IntSet>,
    /// The materialised sorted accept labels of each interned accept set.
    pub(crate) accept_lists: Vec<Vec<AcceptID>>,
}

impl Dfa {
    /// Compile a regex to a minimised DFA: Thompson construction, subset
    /// construction, Hopcroft minimisation.
    pub(crate) fn compile(alphabet_len: usize, accept_count: usize, regex: &Regex) -> Self {
        let nfa = Nfa::thompson(alphabet_len, accept_count, regex);
        let dfa = Self::from_nfa(&nfa);
        minimizer::minimize(dfa)
    }

    /// The subset construction. The start state (epsilon closure of the NFA
    /// start node) receives id 0.
    pub(crate) fn from_nfa(nfa: &Nfa) -> Self {
        let alphabet_len = nfa.alphabet_len();
        let mut subset_map: IdMap<IntSet> = IdMap::new();
        subset_map.get_or_insert(nfa.epsilon_closure([nfa.start()]));

        let mut dfa = Dfa {
            alphabet_len,
            accept_count: nfa.accept_count(),
            transitions: Vec::new(),
            accept_set_ids: Vec::new(),
            accept_set_map: IdMap::new(),
            accept_lists: Vec::new(),
        };

        let mut state = 0;
        while state < subset_map.len() {
            let subset = subset_map.value(state).clone();

            let mut accepts = IntSet::new(nfa.accept_count());
            for node in subset.iter() {
                for &label in &nfa.node(node).accepts {
                    accepts.insert(label.as_usize());
                }
            }
            let accept_set_id = AcceptSetID::from(dfa.intern_accept_set(accepts));
            dfa.accept_set_ids.push(accept_set_id);

            for letter in 0..alphabet_len {
                let target = subset_map.get_or_insert(nfa.step_closure(&subset, letter));
                dfa.transitions.push(StateID::from(target));
            }
            state += 1;
        }

        trace!(
            "subset construction: {} states, {} distinct accept sets",
            dfa.state_count(),
            dfa.accept_set_count()
        );
        dfa
    }

    /// Intern an accept set, materialising its sorted label list when new.
    fn intern_accept_set(&mut self, accepts: IntSet) -> usize {
        let id = self.accept_set_map.get_or_insert(accepts);
        if id == self.accept_lists.len() {
            let list = self
                .accept_set_map
                .value(id)
                .iter()
                .map(AcceptID::from)
                .collect();
            self.accept_lists.push(list);
        }
        id
    }

    pub(crate) fn state_count(&self) -> usize {
        self.accept_set_ids.len()
    }

    /// The number of distinct accept sets. For the row DFA this is the size
    /// of the column alphabet.
    pub(crate) fn accept_set_count(&self) -> usize {
        self.accept_set_map.len()
    }

    /// Step the DFA. Fails if the state or the letter is out of range.
    /// The recompute hot path uses [Dfa::step_unchecked] on operands it has
    /// already validated by construction.
    #[allow(dead_code)]
    pub(crate) fn step(&self, state: usize, letter: usize) -> Result<usize> {
        if state >= self.state_count() || letter >= self.alphabet_len {
            return Err(GridrexError::new(GridrexErrorKind::InvalidState(format!(
                "state {} of {}, letter {} of {}",
                state,
                self.state_count(),
                letter,
                self.alphabet_len
            ))));
        }
        Ok(self.step_unchecked(state, letter))
    }

    /// Step the DFA without range checks. Callers guarantee both operands are
    /// in range.
    #[inline]
    pub(crate) fn step_unchecked(&self, state: usize, letter: usize) -> usize {
        debug_assert!(state < self.state_count() && letter < self.alphabet_len);
        self.transitions[state * self.alphabet_len + letter].as_usize()
    }

    /// The interned accept-set id of a state.
    #[inline]
    pub(crate) fn accept_set_id(&self, state: usize) -> usize {
        self.accept_set_ids[state].as_usize()
    }

    /// The sorted accept labels of a state.
    pub(crate) fn accepts(&self, state: usize) -> &[AcceptID] {
        &self.accept_lists[self.accept_set_id(state)]
    }

    /// Check if the given accept label holds at the given state.
    pub(crate) fn accepts_label(&self, state: usize, label: usize) -> bool {
        self.accept_set_map
            .value(self.accept_set_id(state))
            .contains(label)
    }
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA: {} states over {} letters",
            self.state_count(),
            self.alphabet_len
        )?;
        for state in 0..self.state_count() {
            write!(f, "{} [", state)?;
            for (i, label) in self.accepts(state).iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", label)?;
            }
            write!(f, "] ->")?;
            for letter in 0..self.alphabet_len {
                write!(f, " {}:{}", letter, self.step_unchecked(state, letter))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
