//! Thompson construction of an NFA from a regex.
//!
//! Nodes are built in a post-order traversal of the regex. Every node carries
//! its epsilon successors plus at most one consuming edge: a letter set and a
//! target. Accept labels live on nodes and consume no input.

use log::trace;

use super::{AcceptID, IntSet, Regex, StateID};

/// An NFA node.
#[derive(Debug, Clone)]
pub(crate) struct NfaNode {
    /// Targets reachable without consuming input.
    pub(crate) epsilons: Vec<StateID>,
    /// The letters firing the consuming edge; empty means no consuming edge.
    pub(crate) letters: IntSet,
    /// The target of the consuming edge.
    pub(crate) next: StateID,
    /// Accept labels attached to this node.
    pub(crate) accepts: Vec<AcceptID>,
}

/// An NFA produced by the Thompson construction.
#[derive(Debug, Clone)]
pub(crate) struct Nfa {
    alphabet_len: usize,
    accept_count: usize,
    nodes: Vec<NfaNode>,
    start: StateID,
}

impl Nfa {
    /// Build the NFA for a regex over `alphabet_len` letters with accept
    /// labels drawn from `[0, accept_count)`.
    pub(crate) fn thompson(alphabet_len: usize, accept_count: usize, regex: &Regex) -> Self {
        let mut nfa = Self {
            alphabet_len,
            accept_count,
            nodes: Vec::new(),
            start: StateID::default(),
        };
        let out = nfa.new_node();
        nfa.start = nfa.build(regex, out);
        trace!(
            "Thompson construction: {} nodes, start {}",
            nfa.nodes.len(),
            nfa.start
        );
        nfa
    }

    pub(crate) fn alphabet_len(&self) -> usize {
        self.alphabet_len
    }

    pub(crate) fn accept_count(&self) -> usize {
        self.accept_count
    }

    #[allow(dead_code)]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn start(&self) -> StateID {
        self.start
    }

    pub(crate) fn node(&self, id: usize) -> &NfaNode {
        &self.nodes[id]
    }

    fn new_node(&mut self) -> StateID {
        let id = StateID::from(self.nodes.len());
        self.nodes.push(NfaNode {
            epsilons: Vec::new(),
            letters: IntSet::new(self.alphabet_len),
            next: StateID::default(),
            accepts: Vec::new(),
        });
        id
    }

    /// Build the fragment recognising `regex` before continuing at `out`.
    /// Returns the fragment's in-node.
    fn build(&mut self, regex: &Regex, out: StateID) -> StateID {
        match regex {
            Regex::Letters(letters) => {
                debug_assert_eq!(letters.domain(), self.alphabet_len);
                let node = self.new_node();
                self.nodes[node].letters = letters.clone();
                self.nodes[node].next = out;
                node
            }
            Regex::Wildcard => {
                let node = self.new_node();
                self.nodes[node].letters = IntSet::full(self.alphabet_len);
                self.nodes[node].next = out;
                node
            }
            Regex::Concat(children) => children
                .iter()
                .rev()
                .fold(out, |tail, child| self.build(child, tail)),
            Regex::Union(children) => {
                let union = self.new_node();
                for child in children {
                    // Each child gets its own intermediate out-node so accept
                    // labels attached inside one alternative stay local to it.
                    let child_out = self.new_node();
                    self.nodes[child_out].epsilons.push(out);
                    let child_in = self.build(child, child_out);
                    self.nodes[union].epsilons.push(child_in);
                }
                union
            }
            Regex::Star(child) => {
                let enter = self.new_node();
                let child_out = self.new_node();
                let child_in = self.build(child, child_out);
                // Skip edge and back edge.
                self.nodes[enter].epsilons.extend([child_in, out]);
                self.nodes[child_out].epsilons.extend([child_in, out]);
                enter
            }
            Regex::Accept(label) => {
                debug_assert!(label.as_usize() < self.accept_count);
                self.nodes[out].accepts.push(*label);
                out
            }
        }
    }

    /// The epsilon closure of the given seed nodes, as a bit-set over nodes.
    pub(crate) fn epsilon_closure(&self, seed: impl IntoIterator<Item = StateID>) -> IntSet {
        let mut closure = IntSet::new(self.nodes.len());
        let mut work: Vec<StateID> = Vec::new();
        for node in seed {
            if closure.insert(node.as_usize()) {
                work.push(node);
            }
        }
        while let Some(node) = work.pop() {
            for &target in &self.nodes[node].epsilons {
                if closure.insert(target.as_usize()) {
                    work.push(target);
                }
            }
        }
        closure
    }

    /// The epsilon-closed set of nodes reachable from `subset` by consuming
    /// `letter`.
    pub(crate) fn step_closure(&self, subset: &IntSet, letter: usize) -> IntSet {
        let targets: Vec<StateID> = subset
            .iter()
            .filter(|&node| self.nodes[node].letters.contains(letter))
            .map(|node| self.nodes[node].next)
            .collect();
        self.epsilon_closure(targets)
    }
}
