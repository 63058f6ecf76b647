mod common;

use common::{n, t, tokens, tree};
use larch::{Grammar, ParseError, Parser, ProductionId};

struct Lr1 {
    parser: Parser<&'static str, String>,
    e_prod: ProductionId,
    f_prod: ProductionId,
}

// S ::= a E a | a F c | c F a | c E c ; E ::= e ; F ::= e
//
// LR(1) but not LALR(1): merging the two states reached on `e` would put
// both E ::= e . and F ::= e . under lookaheads {a, c}.
fn lr1_grammar() -> Lr1 {
    let mut grammar = Grammar::new("$");
    let s = grammar.nonterminal("S");
    let e = grammar.nonterminal("E");
    let f = grammar.nonterminal("F");
    grammar.add_production(s, vec![t("a"), n(e), t("a")], tree("S")).unwrap();
    grammar.add_production(s, vec![t("a"), n(f), t("c")], tree("S")).unwrap();
    grammar.add_production(s, vec![t("c"), n(f), t("a")], tree("S")).unwrap();
    grammar.add_production(s, vec![t("c"), n(e), t("c")], tree("S")).unwrap();
    let e_prod = grammar.add_production(e, vec![t("e")], tree("E")).unwrap();
    let f_prod = grammar.add_production(f, vec![t("e")], tree("F")).unwrap();

    Lr1 {
        parser: grammar.build().expect("grammar is LR(1)"),
        e_prod,
        f_prod,
    }
}

#[test]
fn picks_reduction_by_context() {
    let Lr1 { parser, .. } = lr1_grammar();

    let test_vectors = vec![
        ("a e a", "S ::= [a] [E ::= [e]] [a]"),
        ("a e c", "S ::= [a] [F ::= [e]] [c]"),
        ("c e a", "S ::= [c] [F ::= [e]] [a]"),
        ("c e c", "S ::= [c] [E ::= [e]] [c]"),
    ];

    for (input, expected) in test_vectors {
        assert_eq!(parser.parse(tokens(input)), Ok(expected.to_string()), "input '{}'", input);
    }
}

#[test]
fn rejects_other_sentences() {
    let Lr1 { parser, .. } = lr1_grammar();
    for input in ["a e", "e", "a a a", "a e a a", "c c", "a e e a"] {
        assert!(parser.parse(tokens(input)).is_err(), "'{}' should not parse", input);
    }
}

#[test]
fn same_core_states_are_not_merged() {
    let Lr1 { parser, e_prod, f_prod } = lr1_grammar();
    let automaton = parser.automaton();

    let reducing_e: Vec<_> = automaton
        .states()
        .filter(|&state| {
            automaton
                .items(state)
                .any(|item| item.item.production == e_prod && item.item.dot() == 1)
        })
        .collect();
    assert_eq!(reducing_e.len(), 2);

    for state in reducing_e {
        let lookaheads: Vec<_> = automaton.items(state).map(|item| item.lookahead.clone()).collect();
        assert_eq!(lookaheads.len(), 2);
        assert!(automaton.items(state).any(|item| item.item.production == f_prod));
        // each complete item reduces on exactly one terminal
        assert!(lookaheads.iter().all(|lookahead| lookahead.len() == 1));
        assert_ne!(lookaheads[0], lookaheads[1]);
    }
}

#[test]
fn error_after_ambiguous_prefix() {
    let Lr1 { parser, .. } = lr1_grammar();
    let err = parser.parse(tokens("a e e")).unwrap_err();
    match err {
        ParseError::UnexpectedToken {
            found,
            position,
            mut expected,
            viable_prefix,
            ..
        } => {
            assert_eq!(found, "e");
            assert_eq!(position, 2);
            expected.sort();
            assert_eq!(expected, vec!["a", "c"]);
            assert_eq!(viable_prefix, vec!["\"a\"".to_string(), "\"e\"".to_string()]);
        }
        other => panic!("unexpected error {:?}", other),
    }
}
