use crate::ids::{TerminalId, NT};

use super::symbol::Symbol;

/// `lhs ::= rhs`. The reduction handler lives beside the production in the
/// parser, so two productions compare equal whenever their structure does.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production {
    pub(crate) lhs: NT,
    pub(crate) rhs: Vec<Symbol<TerminalId>>,
}

impl Production {
    pub fn lhs(&self) -> NT {
        self.lhs
    }

    pub fn rhs(&self) -> &[Symbol<TerminalId>] {
        &self.rhs
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}
