use crate::ids::NT;

/// A grammar symbol. Terminals carry the caller's token kind; non-terminals
/// are ids handed out by [`crate::Grammar::nonterminal`].
///
/// Internally productions are stored as `Symbol<TerminalId>` once the
/// terminal alphabet has been interned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol<T> {
    Terminal(T),
    Nonterminal(NT),
}

impl<T> Symbol<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn terminal(&self) -> Option<&T> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::Nonterminal(_) => None,
        }
    }

    pub fn nonterminal(&self) -> Option<NT> {
        match self {
            Symbol::Terminal(_) => None,
            Symbol::Nonterminal(nt) => Some(*nt),
        }
    }

    pub(crate) fn map_terminal<U>(self, f: impl FnOnce(T) -> U) -> Symbol<U> {
        match self {
            Symbol::Terminal(t) => Symbol::Terminal(f(t)),
            Symbol::Nonterminal(nt) => Symbol::Nonterminal(nt),
        }
    }
}

impl<T> From<NT> for Symbol<T> {
    fn from(nt: NT) -> Self {
        Symbol::Nonterminal(nt)
    }
}
