use std::fmt::{self, Debug, Display};

use thiserror::Error;

use crate::ids::{StateId, NT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("non-terminal #{0} was not declared by this grammar")]
    UnknownNonterminal(NT),
    #[error("end-of-file terminal {terminal} cannot appear in a production of `{nonterminal}`")]
    ReservedEndOfFile {
        terminal: String,
        nonterminal: String,
    },
    #[error("production `{0}` is already registered")]
    DuplicateProduction(String),
    #[error("grammar has no start symbol")]
    MissingStart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
    /// Any other pair, e.g. accept against reduce.
    Other,
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::ShiftReduce => write!(f, "shift/reduce"),
            ConflictKind::ReduceReduce => write!(f, "reduce/reduce"),
            ConflictKind::Other => write!(f, "action"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// Two actions competed for one table slot. No precedence or default
    /// preference is applied, so this always aborts construction.
    #[error("{kind} conflict in state {state} on {symbol}: `{existing}` vs `{incoming}`")]
    Conflict {
        state: StateId,
        symbol: String,
        kind: ConflictKind,
        existing: String,
        incoming: String,
        /// The offending state's items, one per line when printed.
        items: Vec<String>,
    },
    #[cfg(feature = "parallel")]
    #[error("failed to start construction worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError<T: Debug> {
    #[error("unexpected {found:?} at token {position} in state {state}, expected one of {expected:?}")]
    UnexpectedToken {
        state: StateId,
        found: T,
        position: usize,
        expected: Vec<T>,
        /// Symbols shifted or reduced so far, bottom of the stack first.
        viable_prefix: Vec<String>,
    },
    /// The automaton disagrees with itself (e.g. a reduce without a goto).
    /// Never caused by input.
    #[error("internal parser fault in state {state}: {detail}")]
    Internal { state: StateId, detail: String },
}
