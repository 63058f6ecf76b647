use clap::ValueEnum;
use larch::{BuildConfig, BuildError, Grammar, Parser, Symbol, NT};

/// Built-in grammars. Every handler renders its reduction as
/// `lhs ::= [child] ...`, so a successful parse prints its derivation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// E ::= E + T | T ; T ::= T * F | F ; F ::= ( E ) | id | num
    Arith,
    /// S ::= a E a | a F c | c F a | c E c ; E ::= e ; F ::= e
    Lr1,
    /// S ::= < W > ; W ::= W ws | ε
    WhitespaceLeft,
    /// S ::= < W > ; W ::= ws W | ε
    WhitespaceRight,
}

fn t(name: &str) -> Symbol<String> {
    Symbol::Terminal(name.to_string())
}

fn n(nt: NT) -> Symbol<String> {
    Symbol::Nonterminal(nt)
}

fn tree(name: &'static str) -> impl Fn(Vec<String>) -> String + Send + Sync + 'static {
    move |children| {
        if children.is_empty() {
            format!("{} ::= ε", name)
        } else {
            let children: Vec<String> = children.iter().map(|child| format!("[{}]", child)).collect();
            format!("{} ::= {}", name, children.join(" "))
        }
    }
}

pub fn build(sample: Sample, config: &BuildConfig) -> Result<Parser<String, String>, BuildError> {
    let mut grammar = Grammar::new("$".to_string());
    match sample {
        Sample::Arith => {
            let e = grammar.nonterminal("E");
            let tm = grammar.nonterminal("T");
            let f = grammar.nonterminal("F");
            grammar.add_production(e, vec![n(e), t("+"), n(tm)], tree("E"))?;
            grammar.add_production(e, vec![n(tm)], tree("E"))?;
            grammar.add_production(tm, vec![n(tm), t("*"), n(f)], tree("T"))?;
            grammar.add_production(tm, vec![n(f)], tree("T"))?;
            grammar.add_production(f, vec![t("("), n(e), t(")")], tree("F"))?;
            grammar.add_production(f, vec![t("id")], tree("F"))?;
            grammar.add_production(f, vec![t("num")], tree("F"))?;
        }
        Sample::Lr1 => {
            let s = grammar.nonterminal("S");
            let e = grammar.nonterminal("E");
            let f = grammar.nonterminal("F");
            grammar.add_production(s, vec![t("a"), n(e), t("a")], tree("S"))?;
            grammar.add_production(s, vec![t("a"), n(f), t("c")], tree("S"))?;
            grammar.add_production(s, vec![t("c"), n(f), t("a")], tree("S"))?;
            grammar.add_production(s, vec![t("c"), n(e), t("c")], tree("S"))?;
            grammar.add_production(e, vec![t("e")], tree("E"))?;
            grammar.add_production(f, vec![t("e")], tree("F"))?;
        }
        Sample::WhitespaceLeft | Sample::WhitespaceRight => {
            let s = grammar.nonterminal("S");
            let w = grammar.nonterminal("W");
            grammar.add_production(s, vec![t("<"), n(w), t(">")], tree("S"))?;
            let rhs = if sample == Sample::WhitespaceLeft {
                vec![n(w), t("ws")]
            } else {
                vec![t("ws"), n(w)]
            };
            grammar.add_production(w, rhs, tree("W"))?;
            grammar.add_production(w, vec![], tree("W"))?;
        }
    }
    grammar.build_with(config)
}
