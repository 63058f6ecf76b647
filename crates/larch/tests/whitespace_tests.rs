mod common;

use std::iter;

use common::{n, t, tokens, tree};
use larch::{Grammar, Parser, Token};

#[derive(Clone, Copy, Debug)]
enum Recursion {
    Left,
    Right,
}

// S ::= < W > ; W ::= W ws | ε  (left)  or  W ::= ws W | ε  (right)
fn bracketed(recursion: Recursion) -> Parser<&'static str, String> {
    let mut grammar = Grammar::new("$");
    let s = grammar.nonterminal("S");
    let w = grammar.nonterminal("W");
    grammar.add_production(s, vec![t("<"), n(w), t(">")], tree("S")).unwrap();
    let rhs = match recursion {
        Recursion::Left => vec![n(w), t("ws")],
        Recursion::Right => vec![t("ws"), n(w)],
    };
    grammar.add_production(w, rhs, tree("W")).unwrap();
    grammar.add_production(w, vec![], tree("W")).unwrap();
    grammar.build().expect("whitespace grammar is LR(1)")
}

// S ::= W with W counting its whitespace
fn counter(recursion: Recursion) -> Parser<&'static str, usize> {
    let mut grammar = Grammar::new("$");
    let s = grammar.nonterminal("S");
    let w = grammar.nonterminal("W");
    grammar.add_production(s, vec![n(w)], |v: Vec<usize>| v[0]).unwrap();
    let repeat = match recursion {
        Recursion::Left => grammar.add_production(w, vec![n(w), t("ws")], |v: Vec<usize>| v[0] + 1),
        Recursion::Right => grammar.add_production(w, vec![t("ws"), n(w)], |v: Vec<usize>| v[1] + 1),
    };
    repeat.unwrap();
    grammar.add_production(w, vec![], |_: Vec<usize>| 0).unwrap();
    grammar.build().expect("whitespace grammar is LR(1)")
}

fn whitespace(count: usize) -> impl Iterator<Item = Token<&'static str, usize>> {
    iter::repeat_with(|| Token::new("ws", 0)).take(count)
}

#[test]
fn left_recursive_trees() {
    let parser = bracketed(Recursion::Left);

    let test_vectors = vec![
        ("< >", "S ::= [<] [W ::= ε] [>]"),
        ("< ws >", "S ::= [<] [W ::= [W ::= ε] [ws]] [>]"),
        ("< ws ws >", "S ::= [<] [W ::= [W ::= [W ::= ε] [ws]] [ws]] [>]"),
    ];
    for (input, expected) in test_vectors {
        assert_eq!(parser.parse(tokens(input)), Ok(expected.to_string()), "input '{}'", input);
    }
}

#[test]
fn right_recursive_trees() {
    let parser = bracketed(Recursion::Right);

    let test_vectors = vec![
        ("< >", "S ::= [<] [W ::= ε] [>]"),
        ("< ws >", "S ::= [<] [W ::= [ws] [W ::= ε]] [>]"),
        ("< ws ws >", "S ::= [<] [W ::= [ws] [W ::= [ws] [W ::= ε]]] [>]"),
    ];
    for (input, expected) in test_vectors {
        assert_eq!(parser.parse(tokens(input)), Ok(expected.to_string()), "input '{}'", input);
    }
}

#[test]
fn unterminated_input_fails() {
    for recursion in [Recursion::Left, Recursion::Right] {
        let parser = bracketed(recursion);
        for input in ["<", "< ws", "ws", "< > >", "< ws < >"] {
            assert!(
                parser.parse(tokens(input)).is_err(),
                "{:?}: '{}' should not parse",
                recursion,
                input
            );
        }
    }
}

#[test]
fn nullable_start_accepts_empty_input() {
    for recursion in [Recursion::Left, Recursion::Right] {
        let parser = counter(recursion);
        assert!(parser.is_nullable(parser.start()));
        assert_eq!(parser.parse(whitespace(0)), Ok(0), "{:?}", recursion);
    }
}

#[test]
fn long_runs() {
    for recursion in [Recursion::Left, Recursion::Right] {
        let parser = counter(recursion);
        for count in [1, 2, 17, 10_000] {
            assert_eq!(parser.parse(whitespace(count)), Ok(count), "{:?} x{}", recursion, count);
        }
    }
}

#[test]
fn recursion_direction_changes_the_automaton_not_the_language() {
    let left = counter(Recursion::Left);
    let right = counter(Recursion::Right);

    // right recursion shifts every ws before reducing and has one more state
    // for W ::= ws W .
    assert_ne!(left.automaton().state_count(), right.automaton().state_count());
    for count in 0..8 {
        assert_eq!(left.parse(whitespace(count)), right.parse(whitespace(count)));
    }
}
