use std::collections::HashSet;

use petgraph::dot::Dot;

use crate::automaton::Automaton;
use crate::error::ParseError;
use crate::grammar::{Handler, Lexicon, Printer, Rules, Symbol, Terminal};
use crate::ids::{ProductionId, StateId, TerminalId, NT};
use crate::sets::GrammarSets;
use crate::table::{Action, ParseTable};

/// A lexer token: the terminal used for table lookup plus the payload handed
/// to reduction handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<T, V> {
    pub kind: T,
    pub value: V,
}

impl<T, V> Token<T, V> {
    pub fn new(kind: T, value: V) -> Token<T, V> {
        Token { kind, value }
    }
}

/// A built grammar: sets, automaton, table and handlers. Immutable, so one
/// parser can serve any number of concurrent parses; each call to
/// [`Parser::parse`] gets its own [`ParseSession`].
pub struct Parser<T, V> {
    lexicon: Lexicon<T>,
    rules: Rules,
    sets: GrammarSets,
    automaton: Automaton,
    table: ParseTable,
    handlers: Vec<Handler<V>>,
}

impl<T: Terminal, V> Parser<T, V> {
    pub(crate) fn new(
        lexicon: Lexicon<T>,
        rules: Rules,
        sets: GrammarSets,
        automaton: Automaton,
        table: ParseTable,
        handlers: Vec<Handler<V>>,
    ) -> Parser<T, V> {
        Parser {
            lexicon,
            rules,
            sets,
            automaton,
            table,
            handlers,
        }
    }

    /// Parses a whole token stream. A stream that runs out is treated as if
    /// it ended with the end-of-file terminal.
    pub fn parse<I>(&self, tokens: I) -> Result<V, ParseError<T>>
    where
        I: IntoIterator<Item = Token<T, V>>,
    {
        ParseSession::new(self).run(tokens)
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    pub fn start(&self) -> NT {
        self.rules.start()
    }

    pub fn eof(&self) -> &T {
        self.lexicon.resolve(self.rules.eof())
    }

    pub fn nonterminal_name(&self, nt: NT) -> Option<&str> {
        self.owns(nt).then(|| self.rules.nonterminal_name(nt))
    }

    pub fn terminal_id(&self, terminal: &T) -> Option<TerminalId> {
        self.lexicon.get(terminal)
    }

    /// `None` for an id this parser's lexicon never handed out.
    pub fn terminal(&self, id: TerminalId) -> Option<&T> {
        (id.index() < self.lexicon.len()).then(|| self.lexicon.resolve(id))
    }

    /// False for a non-terminal this parser does not own.
    pub fn is_nullable(&self, nt: NT) -> bool {
        self.owns(nt) && self.sets.is_nullable(Symbol::Nonterminal(nt))
    }

    /// first(symbol). Always `{t}` for a terminal `t`; `None` for a
    /// non-terminal this parser does not own.
    pub fn first(&self, symbol: &Symbol<T>) -> Option<HashSet<T>> {
        match symbol {
            Symbol::Terminal(t) => Some(HashSet::from([t.clone()])),
            Symbol::Nonterminal(nt) => self
                .owns(*nt)
                .then(|| self.resolve_set(self.sets.first(Symbol::Nonterminal(*nt)).iter())),
        }
    }

    /// First set of a symbol string, and whether the whole string is nullable.
    /// Terminals unknown to the grammar still begin the string they start;
    /// a foreign non-terminal makes the whole query `None`.
    pub fn first_of_sequence(&self, symbols: &[Symbol<T>]) -> Option<(HashSet<T>, bool)> {
        let mut result = HashSet::new();
        for symbol in symbols {
            result.extend(self.first(symbol)?);
            let nullable = match symbol {
                Symbol::Terminal(_) => false,
                Symbol::Nonterminal(nt) => self.is_nullable(*nt),
            };
            if !nullable {
                return Some((result, false));
            }
        }
        Some((result, true))
    }

    pub fn follow(&self, nt: NT) -> Option<HashSet<T>> {
        self.owns(nt).then(|| self.resolve_set(self.sets.follow(nt).iter()))
    }

    /// The parse table as a text grid.
    pub fn dump_table(&self) -> String {
        self.table.render(&self.rules, &self.printer())
    }

    /// Every state with its items, e.g. `E ::= E . + T, {"+", "$"}`.
    pub fn dump_states(&self) -> String {
        let printer = self.printer();
        let mut out = String::new();
        for state in self.automaton.states() {
            out.push_str(&format!("state {}\n", state));
            for item in printer.state(&self.automaton, state) {
                out.push_str("    ");
                out.push_str(&item);
                out.push('\n');
            }
        }
        out
    }

    /// The automaton in Graphviz `dot` syntax.
    pub fn to_dot(&self) -> String {
        let graph = self.automaton.to_graph(&self.printer());
        format!("{}", Dot::new(&graph))
    }

    fn owns(&self, nt: NT) -> bool {
        nt.index() < self.rules.nonterminal_count()
    }

    fn printer(&self) -> Printer<'_, T> {
        Printer::new(&self.rules, &self.lexicon)
    }

    fn resolve_set(&self, terminals: impl Iterator<Item = TerminalId>) -> HashSet<T> {
        terminals.map(|t| self.lexicon.resolve(t).clone()).collect()
    }
}

/// The current lookahead. A synthesized end-of-file has no payload.
struct Lookahead<T, V> {
    kind: T,
    terminal: Option<TerminalId>,
    value: Option<V>,
}

/// Mutable state of one parse: the state stack (top is the current state),
/// the symbol history used for diagnostics, and the semantic value stack.
///
/// Sessions borrow their parser immutably and can be reused across parses
/// to keep their stack allocations.
pub struct ParseSession<'p, T, V> {
    parser: &'p Parser<T, V>,
    states: Vec<StateId>,
    symbols: Vec<Symbol<TerminalId>>,
    data: Vec<V>,
}

impl<'p, T: Terminal, V> ParseSession<'p, T, V> {
    pub fn new(parser: &'p Parser<T, V>) -> ParseSession<'p, T, V> {
        ParseSession {
            parser,
            states: Vec::new(),
            symbols: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn run<I>(&mut self, tokens: I) -> Result<V, ParseError<T>>
    where
        I: IntoIterator<Item = Token<T, V>>,
    {
        self.states.clear();
        self.symbols.clear();
        self.data.clear();
        self.states.push(self.parser.automaton.start());

        let parser = self.parser;
        let mut tokens = tokens.into_iter();
        let mut position = 0;
        let mut lookahead = self.pull(&mut tokens);

        loop {
            let state = self.current();
            let action = lookahead
                .terminal
                .and_then(|t| parser.table.action(state, Symbol::Terminal(t)));

            match action {
                Some(Action::Shift(to)) => {
                    let (Some(terminal), Some(value)) = (lookahead.terminal, lookahead.value.take()) else {
                        return Err(self.fault("shift on synthesized end-of-file"));
                    };
                    self.states.push(to);
                    self.symbols.push(Symbol::Terminal(terminal));
                    self.data.push(value);

                    lookahead = self.pull(&mut tokens);
                    position += 1;
                }
                Some(Action::Reduce(production)) => self.reduce(production)?,
                Some(Action::Accept) => return self.accept(),
                Some(Action::Goto(_)) => {
                    return Err(self.fault("goto selected on a terminal lookahead"));
                }
                None => return Err(self.unexpected(state, lookahead.kind, position)),
            }
        }
    }

    fn current(&self) -> StateId {
        // never empty: the start state is only ever exposed, not popped
        self.states[self.states.len() - 1]
    }

    fn pull(&self, tokens: &mut impl Iterator<Item = Token<T, V>>) -> Lookahead<T, V> {
        match tokens.next() {
            Some(Token { kind, value }) => Lookahead {
                terminal: self.parser.lexicon.get(&kind),
                kind,
                value: Some(value),
            },
            None => {
                let eof = self.parser.rules.eof();
                Lookahead {
                    kind: self.parser.lexicon.resolve(eof).clone(),
                    terminal: Some(eof),
                    value: None,
                }
            }
        }
    }

    /// Pops one entry per right-hand symbol, runs the handler on the popped
    /// values (left to right), then follows the goto of the exposed state.
    fn reduce(&mut self, production_id: ProductionId) -> Result<(), ParseError<T>> {
        let parser = self.parser;
        let production = parser.rules.production(production_id);
        let n = production.len();
        if self.data.len() < n || self.states.len() <= n {
            return Err(self.fault("stack underflow during reduce"));
        }

        let Some(handler) = parser.handlers.get(production_id.index()) else {
            return Err(self.fault("reduce by the goal production"));
        };

        self.states.truncate(self.states.len() - n);
        self.symbols.truncate(self.symbols.len().saturating_sub(n));
        let values = self.data.split_off(self.data.len() - n);
        let value = handler(values);

        let exposed = self.current();
        let lhs = production.lhs();
        match parser.table.action(exposed, Symbol::Nonterminal(lhs)) {
            Some(Action::Goto(to)) => {
                self.states.push(to);
                self.symbols.push(Symbol::Nonterminal(lhs));
                self.data.push(value);
                Ok(())
            }
            _ => Err(self.fault(&format!(
                "no goto on `{}`",
                parser.rules.nonterminal_name(lhs)
            ))),
        }
    }

    fn accept(&mut self) -> Result<V, ParseError<T>> {
        match (self.data.pop(), self.data.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(self.fault("accept with other than one value on the stack")),
        }
    }

    fn unexpected(&self, state: StateId, found: T, position: usize) -> ParseError<T> {
        let printer = self.parser.printer();
        ParseError::UnexpectedToken {
            state,
            found,
            position,
            expected: self
                .parser
                .table
                .expected(state)
                .map(|t| self.parser.lexicon.resolve(t).clone())
                .collect(),
            viable_prefix: self.symbols.iter().map(|&symbol| printer.symbol(symbol)).collect(),
        }
    }

    fn fault(&self, detail: &str) -> ParseError<T> {
        ParseError::Internal {
            state: self.current(),
            detail: detail.to_string(),
        }
    }
}
