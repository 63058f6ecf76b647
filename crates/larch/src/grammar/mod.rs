use std::fmt::Debug;
use std::hash::Hash;

use crate::automaton::Automaton;
use crate::config::BuildConfig;
use crate::error::{BuildError, GrammarError};
use crate::ids::{ProductionId, TerminalId, NT};
use crate::intern::Interner;
use crate::parser::Parser;
use crate::sets::GrammarSets;
use crate::table::ParseTable;

mod print;
mod production;
mod rules;
mod symbol;

pub(crate) use print::Printer;
pub use production::Production;
pub(crate) use rules::Rules;
pub use symbol::Symbol;

/// Anything usable as a terminal: typically a fieldless token enum, or
/// `&'static str` for quick grammars.
pub trait Terminal: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Terminal for T {}

/// Reduction handler: receives the semantic values of the right-hand side in
/// left-to-right order and returns the value of the reduced non-terminal.
pub type Handler<V> = Box<dyn Fn(Vec<V>) -> V + Send + Sync>;

pub(crate) type Lexicon<T> = Interner<T, TerminalId>;

const GOAL_NAME: &str = "<goal>";

/// A grammar under construction.
///
/// Productions can be registered any number of times; [`Grammar::build`]
/// consumes the grammar, so nothing can be registered once the automaton
/// exists. The first declared non-terminal is the start symbol unless
/// [`Grammar::set_start`] says otherwise.
pub struct Grammar<T, V> {
    lexicon: Lexicon<T>,
    nonterminal_names: Vec<String>,
    productions: Vec<Production>,
    by_nonterminal: Vec<Vec<ProductionId>>,
    handlers: Vec<Handler<V>>,
    start: Option<NT>,
    eof: TerminalId,
}

impl<T: Terminal, V> Grammar<T, V> {
    /// `eof` is the terminal a token stream ends with. It is added to the
    /// lexicon immediately and may not appear in user productions.
    pub fn new(eof: T) -> Grammar<T, V> {
        let mut lexicon = Interner::new();
        let (eof, _) = lexicon.intern(eof);

        Grammar {
            lexicon,
            nonterminal_names: Vec::new(),
            productions: Vec::new(),
            by_nonterminal: Vec::new(),
            handlers: Vec::new(),
            start: None,
            eof,
        }
    }

    pub fn nonterminal(&mut self, name: impl Into<String>) -> NT {
        let nt = NT::from_push(&mut self.nonterminal_names, name.into());
        self.by_nonterminal.push(Vec::new());
        if self.start.is_none() {
            self.start = Some(nt);
        }
        nt
    }

    /// Adds a terminal to the lexicon without using it in a production, so
    /// that it is reported as a known (if never expected) token.
    pub fn terminal(&mut self, terminal: T) -> TerminalId {
        self.lexicon.intern(terminal).0
    }

    pub fn set_start(&mut self, start: NT) -> Result<(), GrammarError> {
        self.check_nonterminal(start)?;
        self.start = Some(start);
        Ok(())
    }

    pub fn start(&self) -> Option<NT> {
        self.start
    }

    pub fn nonterminal_name(&self, nt: NT) -> Option<&str> {
        self.nonterminal_names.get(nt.index()).map(String::as_str)
    }

    /// Registers `lhs ::= rhs`, recording every right-hand terminal in the
    /// lexicon. Non-terminals must come from this grammar's
    /// [`Grammar::nonterminal`].
    ///
    /// Registering a production whose left and right sides equal an existing
    /// one is rejected with [`GrammarError::DuplicateProduction`] rather than
    /// absorbed, since the two registrations may carry different handlers.
    pub fn add_production<F>(
        &mut self,
        lhs: NT,
        rhs: Vec<Symbol<T>>,
        handler: F,
    ) -> Result<ProductionId, GrammarError>
    where
        F: Fn(Vec<V>) -> V + Send + Sync + 'static,
    {
        self.check_nonterminal(lhs)?;
        for symbol in &rhs {
            match symbol {
                Symbol::Nonterminal(nt) => self.check_nonterminal(*nt)?,
                Symbol::Terminal(t) => {
                    if self.lexicon.get(t) == Some(self.eof) {
                        return Err(GrammarError::ReservedEndOfFile {
                            terminal: format!("{:?}", t),
                            nonterminal: self.nonterminal_names[lhs].clone(),
                        });
                    }
                }
            }
        }

        let rhs: Vec<Symbol<TerminalId>> = rhs
            .into_iter()
            .map(|symbol| symbol.map_terminal(|t| self.lexicon.intern(t).0))
            .collect();
        let production = Production { lhs, rhs };

        let duplicate = self.by_nonterminal[lhs]
            .iter()
            .any(|&existing| self.productions[existing] == production);
        if duplicate {
            let printer = Printer::from_parts(&self.nonterminal_names, &self.productions, &self.lexicon);
            return Err(GrammarError::DuplicateProduction(
                printer.render_production(&production),
            ));
        }

        let id = ProductionId::from_push(&mut self.productions, production);
        self.by_nonterminal[lhs].push(id);
        self.handlers.push(Box::new(handler));
        Ok(id)
    }

    pub fn build(self) -> Result<Parser<T, V>, BuildError> {
        self.build_with(&BuildConfig::default())
    }

    /// Computes nullable/first/follow, the canonical LR(1) automaton and the
    /// parse table, failing on the first conflict.
    pub fn build_with(self, config: &BuildConfig) -> Result<Parser<T, V>, BuildError> {
        let (lexicon, rules, handlers) = self.freeze()?;
        let sets = GrammarSets::compute(&rules);
        let automaton = Automaton::build(&rules, &sets, config)?;
        let table = ParseTable::build(&rules, &automaton, &Printer::new(&rules, &lexicon))?;

        Ok(Parser::new(lexicon, rules, sets, automaton, table, handlers))
    }

    /// Appends the synthetic goal production and splits the grammar into its
    /// structural part and its handlers.
    pub(crate) fn freeze(mut self) -> Result<(Lexicon<T>, Rules, Vec<Handler<V>>), GrammarError> {
        let start = self.start.ok_or(GrammarError::MissingStart)?;

        let goal = NT::from_push(&mut self.nonterminal_names, GOAL_NAME.to_string());
        let goal_production = ProductionId::from_push(
            &mut self.productions,
            Production {
                lhs: goal,
                rhs: vec![Symbol::Nonterminal(start), Symbol::Terminal(self.eof)],
            },
        );
        self.by_nonterminal.push(vec![goal_production]);

        let rules = Rules {
            nonterminal_names: self.nonterminal_names,
            productions: self.productions,
            by_nonterminal: self.by_nonterminal,
            n_terminals: self.lexicon.len(),
            eof: self.eof,
            start,
            goal_production,
        };

        Ok((self.lexicon, rules, self.handlers))
    }

    fn check_nonterminal(&self, nt: NT) -> Result<(), GrammarError> {
        if nt.index() < self.nonterminal_names.len() {
            Ok(())
        } else {
            Err(GrammarError::UnknownNonterminal(nt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(_: Vec<()>) {}

    #[test]
    fn registration_records_lexicon() {
        let mut grammar: Grammar<&str, ()> = Grammar::new("$");
        let s = grammar.nonterminal("S");
        let a = grammar.nonterminal("A");
        grammar
            .add_production(s, vec![Symbol::Terminal("x"), Symbol::Nonterminal(a)], unit)
            .unwrap();
        grammar.add_production(a, vec![Symbol::Terminal("y")], unit).unwrap();
        grammar.add_production(a, vec![], unit).unwrap();

        assert_eq!(grammar.start(), Some(s));
        assert_eq!(grammar.nonterminal_name(a), Some("A"));

        let (lexicon, rules, handlers) = grammar.freeze().unwrap();
        // "$", "x", "y"
        assert_eq!(lexicon.len(), 3);
        assert_eq!(handlers.len(), 3);
        assert_eq!(rules.productions_of(a).len(), 2);
        assert_eq!(rules.start(), s);

        let goal = rules.production(rules.goal_production());
        assert_eq!(goal.rhs(), &[Symbol::Nonterminal(s), Symbol::Terminal(rules.eof())]);
        assert_eq!(rules.nonterminal_name(goal.lhs()), GOAL_NAME);
    }

    #[test]
    fn rejects_foreign_nonterminal() {
        let mut other: Grammar<&str, ()> = Grammar::new("$");
        other.nonterminal("X");
        let foreign = other.nonterminal("Y");

        let mut grammar: Grammar<&str, ()> = Grammar::new("$");
        let s = grammar.nonterminal("S");
        assert_eq!(
            grammar.add_production(s, vec![Symbol::Nonterminal(foreign)], unit),
            Err(GrammarError::UnknownNonterminal(foreign))
        );
        assert_eq!(
            grammar.set_start(foreign),
            Err(GrammarError::UnknownNonterminal(foreign))
        );
    }

    #[test]
    fn rejects_eof_and_duplicates() {
        let mut grammar: Grammar<&str, ()> = Grammar::new("$");
        let s = grammar.nonterminal("S");
        assert!(matches!(
            grammar.add_production(s, vec![Symbol::Terminal("$")], unit),
            Err(GrammarError::ReservedEndOfFile { .. })
        ));

        grammar.add_production(s, vec![Symbol::Terminal("x")], unit).unwrap();
        assert_eq!(
            grammar.add_production(s, vec![Symbol::Terminal("x")], unit),
            Err(GrammarError::DuplicateProduction("S ::= \"x\"".to_string()))
        );
    }

    #[test]
    fn missing_start() {
        let grammar: Grammar<&str, ()> = Grammar::new("$");
        assert!(matches!(grammar.freeze(), Err(GrammarError::MissingStart)));
    }
}
