use std::fmt::Write;

use crate::automaton::{Automaton, Item, LookaheadItem};
use crate::ids::{ProductionId, StateId, TerminalId, NT};
use crate::lookahead::TerminalSet;
use crate::table::Action;

use super::production::Production;
use super::rules::Rules;
use super::symbol::Symbol;
use super::{Lexicon, Terminal};

/// Renders ids back into names for diagnostics: error messages, table dumps
/// and graph labels. Terminals print with their `Debug` form.
pub(crate) struct Printer<'a, T> {
    names: &'a [String],
    productions: &'a [Production],
    lexicon: &'a Lexicon<T>,
}

impl<'a, T: Terminal> Printer<'a, T> {
    pub(crate) fn new(rules: &'a Rules, lexicon: &'a Lexicon<T>) -> Printer<'a, T> {
        Printer::from_parts(&rules.nonterminal_names, &rules.productions, lexicon)
    }

    pub(crate) fn from_parts(
        names: &'a [String],
        productions: &'a [Production],
        lexicon: &'a Lexicon<T>,
    ) -> Printer<'a, T> {
        Printer {
            names,
            productions,
            lexicon,
        }
    }

    pub(crate) fn terminal(&self, terminal: TerminalId) -> String {
        format!("{:?}", self.lexicon.resolve(terminal))
    }

    pub(crate) fn nonterminal(&self, nt: NT) -> &str {
        &self.names[nt]
    }

    pub(crate) fn symbol(&self, symbol: Symbol<TerminalId>) -> String {
        match symbol {
            Symbol::Terminal(t) => self.terminal(t),
            Symbol::Nonterminal(nt) => self.nonterminal(nt).to_string(),
        }
    }

    pub(crate) fn terminal_set(&self, set: &TerminalSet) -> String {
        let members: Vec<String> = set.iter().map(|t| self.terminal(t)).collect();
        format!("{{{}}}", members.join(", "))
    }

    pub(crate) fn render_production(&self, production: &Production) -> String {
        self.render_dotted(production, None)
    }

    pub(crate) fn production(&self, id: ProductionId) -> String {
        self.render_production(&self.productions[id])
    }

    /// `E ::= E . + T`
    pub(crate) fn item(&self, item: Item) -> String {
        self.render_dotted(&self.productions[item.production], Some(item.dot()))
    }

    /// `E ::= E . + T, {"+", "$"}`
    pub(crate) fn lookahead_item(&self, item: &LookaheadItem) -> String {
        format!("{}, {}", self.item(item.item), self.terminal_set(&item.lookahead))
    }

    pub(crate) fn action(&self, action: Action) -> String {
        match action {
            Action::Shift(state) => format!("shift {}", state),
            Action::Goto(state) => format!("goto {}", state),
            Action::Reduce(production) => format!("reduce {}", self.production(production)),
            Action::Accept => "accept".to_string(),
        }
    }

    pub(crate) fn state(&self, automaton: &Automaton, state: StateId) -> Vec<String> {
        automaton
            .items(state)
            .map(|item| self.lookahead_item(item))
            .collect()
    }

    fn render_dotted(&self, production: &Production, dot: Option<usize>) -> String {
        let mut out = format!("{} ::=", self.nonterminal(production.lhs));
        for (i, symbol) in production.rhs.iter().enumerate() {
            if dot == Some(i) {
                out.push_str(" .");
            }
            // writing into a String cannot fail
            let _ = write!(out, " {}", self.symbol(*symbol));
        }
        if dot == Some(production.rhs.len()) {
            out.push_str(" .");
        } else if production.rhs.is_empty() {
            out.push_str(" ε");
        }
        out
    }
}
