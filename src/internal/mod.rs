/// Module that provides the table-driven DFA and the subset construction.
pub(crate) mod dfa;
pub(crate) use dfa::Dfa;

/// Module with conversion to graphviz dot format.
#[cfg(test)]
mod dot;

/// Module that provides the insertion-ordered value-to-id interner.
mod id_map;
pub(crate) use id_map::IdMap;

/// Module for the dense ID types.
mod ids;
pub(crate) use ids::{AcceptID, AcceptSetID, StateID};

/// Module that provides the fixed-domain bit-set.
mod int_set;
pub(crate) use int_set::IntSet;

/// Module that provides the Hopcroft minimizer.
pub(crate) mod minimizer;

/// The nfa module contains the Thompson construction.
mod nfa;
pub(crate) use nfa::Nfa;

/// Module that provides the partition-refinement structure.
mod partition;
pub(crate) use partition::Partition;

/// Module with the regex abstract syntax.
mod regex;
pub(crate) use regex::Regex;

/// Module that provides the O(1) add/remove/sample integer set.
mod sampleable_set;
pub(crate) use sampleable_set::SampleableSet;

/// Module that provides width-minimal flat state arrays.
mod state_vec;
pub(crate) use state_vec::StateVec;
