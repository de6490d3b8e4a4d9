//! Hopcroft minimisation of a table-driven DFA.
//!
//! The state partition is refined by accept label first, then by letter
//! preimages of worklist blocks until it stabilises. If the partition ever
//! reaches one block per state the input was already minimal and is returned
//! unchanged.

use log::trace;

use super::{IdMap, Partition, StateID};
use crate::internal::Dfa;

/// Minimise the DFA. The result accepts the same labelled language; its
/// start state is 0 and its accept-set map is preserved.
pub(crate) fn minimize(dfa: Dfa) -> Dfa {
    let n = dfa.state_count();
    if n <= 1 {
        return dfa;
    }

    // Inverse transitions: inverse[c][t] lists the states stepping to t on c.
    let mut inverse: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); n]; dfa.alphabet_len];
    for state in 0..n {
        for letter in 0..dfa.alphabet_len {
            inverse[letter][dfa.step_unchecked(state, letter)].push(state);
        }
    }

    let mut partition = Partition::new(n);

    // Initial partition: split by every accept label. Two states with
    // different accept sets differ on at least one label.
    for label in 0..dfa.accept_count {
        let accepting: Vec<usize> = (0..n).filter(|&s| dfa.accepts_label(s, label)).collect();
        if accepting.is_empty() {
            continue;
        }
        partition.refine(&accepting);
        if partition.block_count() == n {
            trace!("minimizer: DFA already minimal ({} states)", n);
            return dfa;
        }
    }

    while let Some(block) = partition.poll_unprocessed() {
        for letter in 0..dfa.alphabet_len {
            // Deterministic transitions make the preimage union duplicate-free
            // for a fixed letter.
            let mut preimage = Vec::new();
            for &target in &block {
                preimage.extend_from_slice(&inverse[letter][target]);
            }
            if preimage.is_empty() {
                continue;
            }
            partition.refine(&preimage);
            if partition.block_count() == n {
                trace!("minimizer: DFA already minimal ({} states)", n);
                return dfa;
            }
        }
    }

    build_quotient(&dfa, &partition)
}

/// Collapse each block to its representative state. The representative of
/// state 0's block is interned first so the quotient's start state is 0.
fn build_quotient(dfa: &Dfa, partition: &Partition) -> Dfa {
    let n = dfa.state_count();
    let mut representatives: IdMap<usize> = IdMap::new();
    representatives.get_or_insert(partition.representative(0));
    for state in 0..n {
        representatives.get_or_insert(partition.representative(state));
    }

    let block_count = representatives.len();
    let mut transitions = Vec::with_capacity(block_count * dfa.alphabet_len);
    let mut accept_set_ids = Vec::with_capacity(block_count);
    for new_state in 0..block_count {
        let representative = *representatives.value(new_state);
        accept_set_ids.push(dfa.accept_set_ids[representative]);
        for letter in 0..dfa.alphabet_len {
            let target = dfa.step_unchecked(representative, letter);
            let target_block = representatives
                .get(&partition.representative(target))
                .expect("every block representative is interned");
            transitions.push(StateID::from(target_block));
        }
    }

    trace!("minimizer: {} states reduced to {}", n, block_count);
    Dfa {
        alphabet_len: dfa.alphabet_len,
        accept_count: dfa.accept_count,
        transitions,
        accept_set_ids,
        accept_set_map: dfa.accept_set_map.clone(),
        accept_lists: dfa.accept_lists.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::{AcceptID, Nfa, Regex};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn run(dfa: &Dfa, letters: &[usize]) -> usize {
        letters
            .iter()
            .fold(0, |state, &letter| dfa.step_unchecked(state, letter))
    }

    /// Enumerate all letter strings up to the given length.
    fn all_strings(alphabet_len: usize, max_len: usize) -> Vec<Vec<usize>> {
        let mut strings = vec![vec![]];
        let mut frontier = vec![vec![]];
        for _ in 0..max_len {
            let mut next = Vec::new();
            for string in &frontier {
                for letter in 0..alphabet_len {
                    let mut extended = string.clone();
                    extended.push(letter);
                    next.push(extended);
                }
            }
            strings.extend(next.iter().cloned());
            frontier = next;
        }
        strings
    }

    /// `.*aba` with one accept label: the classic suffix automaton shape with
    /// mergeable subset states.
    fn suffix_regex() -> Regex {
        Regex::Concat(vec![
            Regex::any_prefix(),
            Regex::letter(2, 0),
            Regex::letter(2, 1),
            Regex::letter(2, 0),
            Regex::Accept(AcceptID::new(0)),
        ])
    }

    #[test]
    fn test_minimized_agrees_with_unminimized() {
        init();
        let nfa = Nfa::thompson(2, 1, &suffix_regex());
        let unminimized = Dfa::from_nfa(&nfa);
        let minimized = minimize(unminimized.clone());
        assert!(minimized.state_count() <= unminimized.state_count());
        for string in all_strings(2, 8) {
            assert_eq!(
                unminimized.accepts(run(&unminimized, &string)),
                minimized.accepts(run(&minimized, &string)),
                "languages diverge on {:?}",
                string
            );
        }
    }

    #[test]
    fn test_minimal_state_count_for_suffix_language() {
        init();
        // .*aba needs exactly 4 states: progress 0..3 through the suffix.
        let dfa = Dfa::compile(2, 1, &suffix_regex());
        assert_eq!(dfa.state_count(), 4);
    }

    #[test]
    fn test_blocks_match_nerode_equivalence() {
        init();
        let nfa = Nfa::thompson(2, 1, &suffix_regex());
        let dfa = Dfa::from_nfa(&nfa);
        let minimized = minimize(dfa.clone());
        // Two states of the original DFA map to the same minimised state iff
        // no word distinguishes them.
        let strings = all_strings(2, 8);
        let mut signatures: Vec<Vec<bool>> = Vec::new();
        for state in 0..dfa.state_count() {
            signatures.push(
                strings
                    .iter()
                    .map(|string| {
                        let landed = string
                            .iter()
                            .fold(state, |s, &c| dfa.step_unchecked(s, c));
                        dfa.accepts_label(landed, 0)
                    })
                    .collect(),
            );
        }
        // Group original states by where the minimised DFA sends them from
        // the start: replay each state's access string.
        // Reachable states only; find one access string per state.
        let mut access: Vec<Option<Vec<usize>>> = vec![None; dfa.state_count()];
        access[0] = Some(vec![]);
        let mut queue = std::collections::VecDeque::from([0usize]);
        while let Some(state) = queue.pop_front() {
            for letter in 0..2 {
                let target = dfa.step_unchecked(state, letter);
                if access[target].is_none() {
                    let mut string = access[state].clone().unwrap();
                    string.push(letter);
                    access[target] = Some(string);
                    queue.push_back(target);
                }
            }
        }
        for s in 0..dfa.state_count() {
            for t in 0..dfa.state_count() {
                let (Some(access_s), Some(access_t)) = (&access[s], &access[t]) else {
                    continue;
                };
                let merged = run(&minimized, access_s) == run(&minimized, access_t);
                let equivalent = signatures[s] == signatures[t];
                assert_eq!(
                    merged, equivalent,
                    "states {} and {} merged={} equivalent={}",
                    s, t, merged, equivalent
                );
            }
        }
    }

    #[test]
    fn test_start_state_is_zero_after_minimisation() {
        init();
        let dfa = Dfa::compile(2, 1, &suffix_regex());
        // The empty string leaves the DFA in its start state; stepping from 0
        // must behave like the unminimised start.
        assert!(!dfa.accepts_label(0, 0));
        assert!(dfa.accepts_label(run(&dfa, &[0, 1, 0]), 0));
    }
}
