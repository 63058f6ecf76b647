// Canonical LR(1) collection.
//
// States are sets of items with *sets* of lookaheads: all lookaheads of one
// item in one state share the same transitions, so carrying them together
// (instead of one item per lookahead) changes nothing about the automaton
// while keeping states small. Two states are the same state iff they hold the
// same items with the same lookahead sets; no LALR-style merging happens.

use std::collections::{HashMap, HashSet};

use bit_set::BitSet;

use crate::config::{BuildConfig, Construction};
use crate::error::BuildError;
use crate::grammar::{Rules, Symbol};
use crate::ids::{EdgeId, LookaheadId, ProductionId, StateId, TerminalId};
use crate::intern::Interner;
use crate::lookahead::TerminalSet;
use crate::sets::GrammarSets;

mod closure;
mod graph;

pub(crate) use closure::{closure, goto, relevant_symbols, ItemMap};

/// A production with a dot: `dot` symbols of the right-hand side have been
/// matched. Items are plain values, so equal items are already identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: ProductionId,
    dot: u32,
}

impl Item {
    pub(crate) fn new(production: ProductionId, dot: usize) -> Item {
        Item {
            production,
            dot: dot as u32,
        }
    }

    pub fn dot(&self) -> usize {
        self.dot as usize
    }

    pub(crate) fn advance(self) -> Item {
        Item {
            dot: self.dot + 1,
            ..self
        }
    }

    pub(crate) fn next_symbol(&self, rules: &Rules) -> Option<Symbol<TerminalId>> {
        rules.symbol_at(self.production, self.dot())
    }

    pub(crate) fn is_complete(&self, rules: &Rules) -> bool {
        self.dot() == rules.production(self.production).len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LookaheadItem {
    pub item: Item,
    pub lookahead: TerminalSet,
}

/// An interned item set, ordered by item. Its actions live in the parse
/// table, so equality is by items alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParserState {
    items: Box<[LookaheadId]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: StateId,
    pub symbol: Symbol<TerminalId>,
    pub to: StateId,
}

/// Per-construction hash-consing of lookahead items, states and edges.
/// Retained by the automaton once construction finishes.
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    lookahead_items: Interner<LookaheadItem, LookaheadId>,
    states: Interner<ParserState, StateId>,
    edges: Interner<Edge, EdgeId>,
}

impl Arena {
    fn new() -> Arena {
        Arena {
            lookahead_items: Interner::new(),
            states: Interner::new(),
            edges: Interner::new(),
        }
    }

    /// Materializes a closed item map as a canonical state. The flag is true
    /// when no equal state existed before.
    pub(crate) fn intern_state(&mut self, items: ItemMap) -> (StateId, bool) {
        let items = items
            .into_iter()
            .map(|(item, lookahead)| self.lookahead_items.intern(LookaheadItem { item, lookahead }).0)
            .collect();
        self.states.intern(ParserState { items })
    }

    pub(crate) fn intern_edge(&mut self, edge: Edge) -> EdgeId {
        self.edges.intern(edge).0
    }

    pub(crate) fn items(&self, state: StateId) -> impl Iterator<Item = &LookaheadItem> + '_ {
        self.states
            .resolve(state)
            .items
            .iter()
            .map(|&id| self.lookahead_items.resolve(id))
    }
}

/// The canonical collection: every reachable state and every transition.
#[derive(Debug, Clone)]
pub struct Automaton {
    arena: Arena,
    start: StateId,
    transitions: HashMap<(StateId, Symbol<TerminalId>), StateId>,
}

/// One expanded state: `(symbol, closed target items)` per relevant symbol.
type Successors = Vec<(Symbol<TerminalId>, ItemMap)>;

fn successors(rules: &Rules, sets: &GrammarSets, arena: &Arena, state: StateId) -> Successors {
    let symbols = relevant_symbols(rules, arena.items(state).map(|item| item.item));
    symbols
        .into_iter()
        .map(|symbol| {
            let items = arena.items(state).map(|item| (item.item, &item.lookahead));
            (symbol, goto(rules, sets, items, symbol))
        })
        .collect()
}

enum Executor {
    Sequential,
    #[cfg(feature = "parallel")]
    Pool(rayon::ThreadPool),
}

impl Executor {
    fn from_config(config: &BuildConfig) -> Result<Executor, BuildError> {
        match config.construction {
            Construction::Sequential => Ok(Executor::Sequential),
            #[cfg(feature = "parallel")]
            Construction::Parallel { threads } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.unwrap_or(0))
                    .build()?;
                Ok(Executor::Pool(pool))
            }
        }
    }

    /// States within one frontier do not depend on each other, so their
    /// successors can be computed in any order. Results keep frontier order.
    fn expand(&self, rules: &Rules, sets: &GrammarSets, arena: &Arena, frontier: &[StateId]) -> Vec<Successors> {
        match self {
            Executor::Sequential => frontier
                .iter()
                .map(|&state| successors(rules, sets, arena, state))
                .collect(),
            #[cfg(feature = "parallel")]
            Executor::Pool(pool) => {
                use rayon::prelude::*;

                pool.install(|| {
                    frontier
                        .par_iter()
                        .map(|&state| successors(rules, sets, arena, state))
                        .collect()
                })
            }
        }
    }
}

impl Automaton {
    /// Breadth-first expansion from the closure of `<goal> ::= . start EOF,
    /// {EOF}`. Each round expands the frontier, interns the targets and
    /// edges, and continues with the targets not visited yet.
    pub(crate) fn build(rules: &Rules, sets: &GrammarSets, config: &BuildConfig) -> Result<Automaton, BuildError> {
        let executor = Executor::from_config(config)?;
        let mut arena = Arena::new();

        let seed: ItemMap = [(
            Item::new(rules.goal_production(), 0),
            TerminalSet::singleton(rules.eof()),
        )]
        .into_iter()
        .collect();
        let (start, _) = arena.intern_state(closure(rules, sets, seed));

        let mut transitions = HashMap::new();
        let mut visited = BitSet::new();
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let expanded = executor.expand(rules, sets, &arena, &frontier);

            let mut discovered = Vec::new();
            for (&from, targets) in frontier.iter().zip(expanded) {
                for (symbol, items) in targets {
                    let (to, _) = arena.intern_state(items);
                    arena.intern_edge(Edge { from, symbol, to });
                    transitions.insert((from, symbol), to);
                    discovered.push(to);
                }
            }

            for state in frontier.drain(..) {
                visited.insert(state.index());
            }

            let mut queued = HashSet::new();
            frontier = discovered
                .into_iter()
                .filter(|state| !visited.contains(state.index()) && queued.insert(*state))
                .collect();
        }

        Ok(Automaton {
            arena,
            start,
            transitions,
        })
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.arena.states.len()
    }

    pub fn edge_count(&self) -> usize {
        self.arena.edges.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.state_count()).map(StateId::new)
    }

    pub fn items(&self, state: StateId) -> impl Iterator<Item = &LookaheadItem> + '_ {
        self.arena.items(state)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.arena.edges.iter().map(|(_, edge)| edge)
    }

    pub fn transition(&self, from: StateId, symbol: Symbol<TerminalId>) -> Option<StateId> {
        self.transitions.get(&(from, symbol)).copied()
    }

    /// Looks up the state holding exactly these items, if one was built.
    #[cfg(test)]
    pub(crate) fn find_state(&self, items: &[LookaheadItem]) -> Option<StateId> {
        let ids = items
            .iter()
            .map(|item| self.arena.lookahead_items.get(item))
            .collect::<Option<Box<[LookaheadId]>>>()?;
        self.arena.states.get(&ParserState { items: ids })
    }
}
