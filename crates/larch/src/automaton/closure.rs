use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::{Rules, Symbol};
use crate::ids::TerminalId;
use crate::lookahead::TerminalSet;
use crate::sets::GrammarSets;

use super::Item;

/// Item -> lookaheads, ordered by item so that materialized states come out
/// in a canonical order no matter how they were discovered.
pub(crate) type ItemMap = BTreeMap<Item, TerminalSet>;

/// Expands `items` with every item reachable by predicting the non-terminal
/// after a dot, until no lookahead set grows.
///
/// For `A ::= α . N β, L` each production `N ::= γ` gets `N ::= . γ` with
/// lookaheads first(β L): first(β), plus L itself when β is nullable.
pub(crate) fn closure(rules: &Rules, sets: &GrammarSets, mut items: ItemMap) -> ItemMap {
    loop {
        let mut contributions: Vec<(Item, TerminalSet)> = Vec::new();
        for (item, lookahead) in &items {
            let Some(Symbol::Nonterminal(nt)) = item.next_symbol(rules) else {
                continue;
            };

            let rest = &rules.production(item.production).rhs()[item.dot() + 1..];
            let (mut contribution, rest_nullable) = sets.first_of_sequence(rest);
            if rest_nullable {
                contribution.union_with(lookahead);
            }

            for &production in rules.productions_of(nt) {
                contributions.push((Item::new(production, 0), contribution.clone()));
            }
        }

        let mut changed = false;
        for (item, lookahead) in contributions {
            match items.entry(item) {
                Entry::Vacant(entry) => {
                    entry.insert(lookahead);
                    changed = true;
                }
                Entry::Occupied(mut entry) => {
                    changed |= entry.get_mut().union_with(&lookahead);
                }
            }
        }

        if !changed {
            break;
        }
    }

    items
}

/// Advances every incomplete item whose next symbol is `symbol`, keeping its
/// lookaheads, and closes the result. Complete items never participate.
pub(crate) fn goto<'a>(
    rules: &Rules,
    sets: &GrammarSets,
    items: impl IntoIterator<Item = (Item, &'a TerminalSet)>,
    symbol: Symbol<TerminalId>,
) -> ItemMap {
    let kernel: ItemMap = items
        .into_iter()
        .filter(|(item, _)| item.next_symbol(rules) == Some(symbol))
        .map(|(item, lookahead)| (item.advance(), lookahead.clone()))
        .collect();

    closure(rules, sets, kernel)
}

/// Symbols with an outgoing transition: the next symbol of every incomplete
/// item, except end-of-file, which accepts instead of transitioning.
pub(crate) fn relevant_symbols(
    rules: &Rules,
    items: impl IntoIterator<Item = Item>,
) -> BTreeSet<Symbol<TerminalId>> {
    items
        .into_iter()
        .filter_map(|item| item.next_symbol(rules))
        .filter(|symbol| *symbol != Symbol::Terminal(rules.eof()))
        .collect()
}
