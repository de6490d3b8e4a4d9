//! Conversion of the automata to graphviz dot format.
//! The functions in this module are used for testing and debugging purposes.

use std::io::Write;

use dot_writer::{Attributes, DotWriter, RankDirection};

use super::{Dfa, Nfa};

/// Render the NFA to graphviz dot format.
#[allow(dead_code)]
pub(crate) fn nfa_render<W: Write>(nfa: &Nfa, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for id in 0..nfa.node_count() {
        let node = nfa.node(id);
        let source_id = {
            let mut source_node = digraph.node_auto();
            if node.accepts.is_empty() {
                source_node.set_label(&id.to_string());
            } else {
                let labels: Vec<String> =
                    node.accepts.iter().map(|label| label.to_string()).collect();
                source_node.set_label(&format!("{}:[{}]", id, labels.join(" ")));
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Red)
                    .set_pen_width(3.0);
            }
            if id == nfa.start().as_usize() {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Blue)
                    .set_pen_width(3.0);
            }
            source_node.id()
        };
        if !node.letters.is_empty() {
            let letters: Vec<String> = node.letters.iter().map(|l| l.to_string()).collect();
            digraph
                .edge(
                    source_id.clone(),
                    format!("node_{}", node.next.as_usize()),
                )
                .attributes()
                .set_label(&format!("{{{}}}", letters.join(" ")));
        }
        for target in &node.epsilons {
            digraph
                .edge(source_id.clone(), format!("node_{}", target.as_usize()))
                .attributes()
                .set_label("ε");
        }
    }
}

/// Render the DFA to graphviz dot format.
#[allow(dead_code)]
pub(crate) fn dfa_render<W: Write>(dfa: &Dfa, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for state in 0..dfa.state_count() {
        let source_id = {
            let mut source_node = digraph.node_auto();
            let accepts = dfa.accepts(state);
            if accepts.is_empty() {
                source_node.set_label(&state.to_string());
            } else {
                let labels: Vec<String> = accepts.iter().map(|label| label.to_string()).collect();
                source_node.set_label(&format!("{}:[{}]", state, labels.join(" ")));
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Red)
                    .set_pen_width(3.0);
            }
            if state == 0 {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Blue)
                    .set_pen_width(3.0);
            }
            source_node.id()
        };
        for letter in 0..dfa.alphabet_len {
            let target = dfa.step_unchecked(state, letter);
            digraph
                .edge(source_id.clone(), format!("node_{}", target))
                .attributes()
                .set_label(&letter.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::{AcceptID, Regex};

    #[test]
    fn test_render_produces_digraph() {
        let regex = Regex::Concat(vec![
            Regex::any_prefix(),
            Regex::letter(2, 0),
            Regex::Accept(AcceptID::new(0)),
        ]);
        let nfa = Nfa::thompson(2, 1, &regex);
        let mut nfa_dot = Vec::new();
        nfa_render(&nfa, "EndsWithA", &mut nfa_dot);
        assert!(String::from_utf8(nfa_dot).unwrap().contains("digraph"));

        let dfa = Dfa::compile(2, 1, &regex);
        let mut dfa_dot = Vec::new();
        dfa_render(&dfa, "EndsWithA", &mut dfa_dot);
        assert!(String::from_utf8(dfa_dot).unwrap().contains("digraph"));
    }
}
