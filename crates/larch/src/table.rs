use crate::automaton::Automaton;
use crate::error::{BuildError, ConflictKind};
use crate::grammar::{Printer, Rules, Symbol, Terminal};
use crate::ids::{ProductionId, StateId, TerminalId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(StateId),
    /// Only ever taken at the tail of a reduce, never on lookahead.
    Goto(StateId),
    /// Reduce by the production of a complete item.
    Reduce(ProductionId),
    Accept,
}

/// One row per state, one column per symbol: terminals first, then
/// non-terminals. Every slot holds at most one action.
#[derive(Debug, Clone)]
pub struct ParseTable {
    n_states: usize,
    n_terminals: usize,
    n_nonterminals: usize,
    actions: Vec<Option<Action>>,
}

impl ParseTable {
    /// Shift/goto along every edge, reduce on every lookahead of every
    /// complete item, accept where an item waits on end-of-file. Filling an
    /// occupied slot is a conflict and aborts.
    pub(crate) fn build<T: Terminal>(
        rules: &Rules,
        automaton: &Automaton,
        printer: &Printer<'_, T>,
    ) -> Result<ParseTable, BuildError> {
        let n_states = automaton.state_count();
        let n_terminals = rules.terminal_count();
        let n_nonterminals = rules.nonterminal_count();
        let mut table = ParseTable {
            n_states,
            n_terminals,
            n_nonterminals,
            actions: vec![None; n_states * (n_terminals + n_nonterminals)],
        };

        for edge in automaton.edges() {
            let action = match edge.symbol {
                Symbol::Terminal(_) => Action::Shift(edge.to),
                Symbol::Nonterminal(_) => Action::Goto(edge.to),
            };
            table.install(automaton, printer, edge.from, edge.symbol, action)?;
        }

        let eof = Symbol::Terminal(rules.eof());
        for state in automaton.states() {
            for item in automaton.items(state) {
                if item.item.is_complete(rules) {
                    for terminal in item.lookahead.iter() {
                        let action = Action::Reduce(item.item.production);
                        table.install(automaton, printer, state, Symbol::Terminal(terminal), action)?;
                    }
                } else if item.item.next_symbol(rules) == Some(eof) {
                    table.install(automaton, printer, state, eof, Action::Accept)?;
                }
            }
        }

        Ok(table)
    }

    fn install<T: Terminal>(
        &mut self,
        automaton: &Automaton,
        printer: &Printer<'_, T>,
        state: StateId,
        symbol: Symbol<TerminalId>,
        action: Action,
    ) -> Result<(), BuildError> {
        let slot = self.slot(state, symbol);
        match self.actions[slot] {
            None => {
                self.actions[slot] = Some(action);
                Ok(())
            }
            Some(existing) => Err(BuildError::Conflict {
                state,
                symbol: printer.symbol(symbol),
                kind: classify(existing, action),
                existing: printer.action(existing),
                incoming: printer.action(action),
                items: printer.state(automaton, state),
            }),
        }
    }

    fn slot(&self, state: StateId, symbol: Symbol<TerminalId>) -> usize {
        let column = match symbol {
            Symbol::Terminal(t) => t.index(),
            Symbol::Nonterminal(nt) => self.n_terminals + nt.index(),
        };
        state.index() * (self.n_terminals + self.n_nonterminals) + column
    }

    pub fn action(&self, state: StateId, symbol: Symbol<TerminalId>) -> Option<Action> {
        let in_range = state.index() < self.n_states
            && match symbol {
                Symbol::Terminal(t) => t.index() < self.n_terminals,
                Symbol::Nonterminal(nt) => nt.index() < self.n_nonterminals,
            };
        if !in_range {
            return None;
        }
        self.actions[self.slot(state, symbol)]
    }

    /// Terminals with an action in `state`, in id order.
    pub fn expected(&self, state: StateId) -> impl Iterator<Item = TerminalId> + '_ {
        (0..self.n_terminals)
            .map(TerminalId::new)
            .filter(move |&t| self.action(state, Symbol::Terminal(t)).is_some())
    }

    pub fn state_count(&self) -> usize {
        self.n_states
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.actions.iter().filter(|action| action.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the table as a grid, one row per state. Shift `sN`, goto `gN`,
    /// reduce `rN` (production id), accept `acc`.
    pub(crate) fn render<T: Terminal>(&self, rules: &Rules, printer: &Printer<'_, T>) -> String {
        let columns: Vec<Symbol<TerminalId>> = (0..self.n_terminals)
            .map(|t| Symbol::Terminal(TerminalId::new(t)))
            .chain(rules.nonterminals().map(Symbol::Nonterminal))
            .collect();
        let headers: Vec<String> = columns.iter().map(|&symbol| printer.symbol(symbol)).collect();
        let width = headers.iter().map(String::len).max().unwrap_or(0).max(5) + 1;

        let mut out = format!("{:<6}", "");
        for header in &headers {
            out.push_str(&format!("{:^width$}", header, width = width));
        }
        out.push('\n');

        for state in 0..self.n_states {
            let state = StateId::new(state);
            out.push_str(&format!("{:<6}", state.index()));
            for &symbol in &columns {
                let cell = match self.action(state, symbol) {
                    Some(Action::Shift(to)) => format!("s{}", to),
                    Some(Action::Goto(to)) => format!("g{}", to),
                    Some(Action::Reduce(production)) => format!("r{}", production),
                    Some(Action::Accept) => "acc".to_string(),
                    None => String::new(),
                };
                out.push_str(&format!("{:^width$}", cell, width = width));
            }
            out.push('\n');
        }
        out
    }
}

fn classify(existing: Action, incoming: Action) -> ConflictKind {
    match (existing, incoming) {
        (Action::Shift(_), Action::Reduce(_)) | (Action::Reduce(_), Action::Shift(_)) => {
            ConflictKind::ShiftReduce
        }
        (Action::Reduce(_), Action::Reduce(_)) => ConflictKind::ReduceReduce,
        _ => ConflictKind::Other,
    }
}
