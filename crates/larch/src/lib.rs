//! Runtime generator of canonical LR(1) parsers.
//!
//! Register productions on a [`Grammar`], build it into a [`Parser`] (this
//! computes nullable/first/follow, the canonical LR(1) collection and a
//! conflict-checked parse table) and feed the parser [`Token`]s. Each
//! reduction runs the production's handler, so the result of a parse is
//! whatever value the handlers build.
//!
//! ```
//! use larch::{Grammar, Symbol, Token};
//!
//! let mut grammar = Grammar::new("$");
//! let sum = grammar.nonterminal("Sum");
//! grammar
//!     .add_production(
//!         sum,
//!         vec![Symbol::Nonterminal(sum), Symbol::Terminal("+"), Symbol::Terminal("n")],
//!         |v: Vec<i64>| v[0] + v[2],
//!     )
//!     .unwrap();
//! grammar.add_production(sum, vec![Symbol::Terminal("n")], |v: Vec<i64>| v[0]).unwrap();
//!
//! let parser = grammar.build().unwrap();
//! let tokens = vec![Token::new("n", 1), Token::new("+", 0), Token::new("n", 2)];
//! assert_eq!(parser.parse(tokens), Ok(3));
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod grammar;
mod ids;
mod intern;
pub mod lookahead;
pub mod parser;
mod sets;
pub mod table;


pub use config::{BuildConfig, Construction};
pub use error::{BuildError, ConflictKind, GrammarError, ParseError};
pub use grammar::{Grammar, Handler, Production, Symbol, Terminal};
pub use ids::{EdgeId, LookaheadId, ProductionId, StateId, TerminalId, NT};
pub use parser::{ParseSession, Parser, Token};
pub use table::{Action, ParseTable};
