// Nullable / first / follow, each computed as a least fixed point by
// sweeping every production until a sweep adds nothing. All three grow
// monotonically over finite sets, so the sweeps terminate.

use bit_set::BitSet;

use crate::grammar::{Rules, Symbol};
use crate::ids::{TerminalId, NT};
use crate::lookahead::TerminalSet;

#[derive(Debug, Clone)]
pub(crate) struct GrammarSets {
    nullable: BitSet,
    first: Vec<TerminalSet>,
    follow: Vec<TerminalSet>,
}

impl GrammarSets {
    pub(crate) fn compute(rules: &Rules) -> GrammarSets {
        let nullable = compute_nullable(rules);
        let first = compute_first(rules, &nullable);
        let mut sets = GrammarSets {
            nullable,
            first,
            follow: Vec::new(),
        };
        sets.follow = compute_follow(rules, &sets);
        sets
    }

    pub(crate) fn is_nullable(&self, symbol: Symbol<TerminalId>) -> bool {
        match symbol {
            Symbol::Terminal(_) => false,
            Symbol::Nonterminal(nt) => self.nullable.contains(nt.index()),
        }
    }

    pub(crate) fn first(&self, symbol: Symbol<TerminalId>) -> TerminalSet {
        match symbol {
            Symbol::Terminal(t) => TerminalSet::singleton(t),
            Symbol::Nonterminal(nt) => self.first[nt].clone(),
        }
    }

    pub(crate) fn follow(&self, nt: NT) -> &TerminalSet {
        &self.follow[nt]
    }

    /// First set of a symbol string: unions first(X) left to right, stopping
    /// after the first symbol that is not nullable. The flag reports whether
    /// the whole string is nullable (true for the empty string).
    pub(crate) fn first_of_sequence(&self, symbols: &[Symbol<TerminalId>]) -> (TerminalSet, bool) {
        let mut result = TerminalSet::new();
        let nullable = extend_first(&mut result, symbols, &self.nullable, &self.first);
        (result, nullable)
    }
}

fn extend_first(
    into: &mut TerminalSet,
    symbols: &[Symbol<TerminalId>],
    nullable: &BitSet,
    first: &[TerminalSet],
) -> bool {
    for &symbol in symbols {
        match symbol {
            Symbol::Terminal(t) => {
                into.insert(t);
                return false;
            }
            Symbol::Nonterminal(nt) => {
                into.union_with(&first[nt]);
                if !nullable.contains(nt.index()) {
                    return false;
                }
            }
        }
    }
    true
}

// n^2 in size of grammar, more efficient algorithm does exist
fn compute_nullable(rules: &Rules) -> BitSet {
    let mut nullable = BitSet::with_capacity(rules.nonterminal_count());
    loop {
        let mut changed = false;
        for (_, production) in rules.productions() {
            if nullable.contains(production.lhs().index()) {
                continue;
            }

            let all_nullable = production.rhs().iter().all(|symbol| match symbol {
                Symbol::Terminal(_) => false,
                Symbol::Nonterminal(nt) => nullable.contains(nt.index()),
            });

            if all_nullable {
                changed |= nullable.insert(production.lhs().index());
            }
        }

        if !changed {
            break;
        }
    }

    nullable
}

fn compute_first(rules: &Rules, nullable: &BitSet) -> Vec<TerminalSet> {
    let mut first = vec![TerminalSet::new(); rules.nonterminal_count()];
    loop {
        let mut changed = false;
        for (_, production) in rules.productions() {
            let mut contribution = TerminalSet::new();
            extend_first(&mut contribution, production.rhs(), nullable, &first);
            changed |= first[production.lhs()].union_with(&contribution);
        }

        if !changed {
            break;
        }
    }

    first
}

fn compute_follow(rules: &Rules, sets: &GrammarSets) -> Vec<TerminalSet> {
    let mut follow = vec![TerminalSet::new(); rules.nonterminal_count()];
    loop {
        let mut changed = false;
        for (_, production) in rules.productions() {
            let rhs = production.rhs();

            // A nullable suffix lets follow(A) through to the symbol before it.
            let inherited = follow[production.lhs()].clone();
            for &symbol in rhs.iter().rev() {
                if let Symbol::Nonterminal(nt) = symbol {
                    changed |= follow[nt].union_with(&inherited);
                }
                if !sets.is_nullable(symbol) {
                    break;
                }
            }

            for (i, symbol) in rhs.iter().enumerate() {
                if let Symbol::Nonterminal(nt) = symbol {
                    let (rest, _) = sets.first_of_sequence(&rhs[i + 1..]);
                    changed |= follow[*nt].union_with(&rest);
                }
            }
        }

        if !changed {
            break;
        }
    }

    follow
}
