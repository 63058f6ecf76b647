#![allow(dead_code)]

use larch::{Symbol, Token, NT};

pub fn t(name: &'static str) -> Symbol<&'static str> {
    Symbol::Terminal(name)
}

pub fn n(nt: NT) -> Symbol<&'static str> {
    Symbol::Nonterminal(nt)
}

/// Whitespace-separated terminals, each carrying its own text as payload.
pub fn tokens(input: &'static str) -> Vec<Token<&'static str, String>> {
    input
        .split_whitespace()
        .map(|kind| Token::new(kind, kind.to_string()))
        .collect()
}

/// Handler rendering a reduction as `name ::= [child] [child]`, `name ::= ε`
/// for an empty right-hand side.
pub fn tree(name: &'static str) -> impl Fn(Vec<String>) -> String + Send + Sync + 'static {
    move |children| {
        if children.is_empty() {
            format!("{} ::= ε", name)
        } else {
            let children: Vec<String> = children.iter().map(|child| format!("[{}]", child)).collect();
            format!("{} ::= {}", name, children.join(" "))
        }
    }
}
