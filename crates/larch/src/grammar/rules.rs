use crate::ids::{ProductionId, TerminalId, NT};

use super::production::Production;
use super::symbol::Symbol;

/// The structural, frozen half of a grammar: everything automaton
/// construction needs and nothing it doesn't (no handlers, no terminal
/// values). Includes the synthetic goal production `<goal> ::= start EOF`.
#[derive(Debug, Clone)]
pub(crate) struct Rules {
    pub(super) nonterminal_names: Vec<String>,
    pub(super) productions: Vec<Production>,
    pub(super) by_nonterminal: Vec<Vec<ProductionId>>,
    pub(super) n_terminals: usize,
    pub(super) eof: TerminalId,
    pub(super) start: NT,
    pub(super) goal_production: ProductionId,
}

impl Rules {
    pub(crate) fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id]
    }

    pub(crate) fn productions(&self) -> impl Iterator<Item = (ProductionId, &Production)> + '_ {
        self.productions
            .iter()
            .enumerate()
            .map(|(i, p)| (ProductionId::new(i), p))
    }

    pub(crate) fn productions_of(&self, nt: NT) -> &[ProductionId] {
        &self.by_nonterminal[nt]
    }

    pub(crate) fn nonterminals(&self) -> impl Iterator<Item = NT> {
        (0..self.nonterminal_names.len()).map(NT::new)
    }

    pub(crate) fn nonterminal_count(&self) -> usize {
        self.nonterminal_names.len()
    }

    pub(crate) fn nonterminal_name(&self, nt: NT) -> &str {
        &self.nonterminal_names[nt]
    }

    pub(crate) fn terminal_count(&self) -> usize {
        self.n_terminals
    }

    pub(crate) fn eof(&self) -> TerminalId {
        self.eof
    }

    /// The user-designated start symbol (not the synthetic goal).
    pub(crate) fn start(&self) -> NT {
        self.start
    }

    pub(crate) fn goal_production(&self) -> ProductionId {
        self.goal_production
    }

    /// The symbol right after position `dot` of `production`, if any.
    pub(crate) fn symbol_at(&self, production: ProductionId, dot: usize) -> Option<Symbol<TerminalId>> {
        self.productions[production].rhs.get(dot).copied()
    }
}
