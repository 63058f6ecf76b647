use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Graph;

use crate::grammar::{Printer, Terminal};

use super::Automaton;

impl Automaton {
    /// The state graph with one node per state (labelled with its id and
    /// items) and one edge per transition (labelled with its symbol).
    /// Suitable for `petgraph::dot::Dot`.
    pub(crate) fn to_graph<T: Terminal>(&self, printer: &Printer<'_, T>) -> Graph<String, String> {
        let mut graph: Graph<String, String> = DiGraph::with_capacity(self.state_count(), self.edge_count());

        let nodes: Vec<NodeIndex> = self
            .states()
            .map(|state| {
                let mut label = format!("state {}", state);
                for item in printer.state(self, state) {
                    label.push('\n');
                    label.push_str(&item);
                }
                graph.add_node(label)
            })
            .collect();

        for edge in self.edges() {
            graph.add_edge(
                nodes[edge.from.index()],
                nodes[edge.to.index()],
                printer.symbol(edge.symbol),
            );
        }

        graph
    }
}
