use std::time::Instant;

use anyhow::Context;
use clap::{Parser as CommandLine, ValueEnum};
use larch::{BuildConfig, Parser, Symbol, Token, NT};

mod grammars;

use grammars::Sample;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Dump {
    /// nullable, first and follow of every non-terminal
    Sets,
    /// every state with its items
    States,
    /// the parse table grid
    Table,
    /// the automaton in Graphviz syntax
    Dot,
}

/// Builds a canonical LR(1) parser for a built-in grammar, optionally dumps
/// its construction, and parses whitespace-separated terminals.
#[derive(CommandLine, Debug)]
#[command(name = "larch", version)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Sample::Arith)]
    grammar: Sample,

    /// May be repeated.
    #[arg(short, long, value_enum)]
    dump: Vec<Dump>,

    /// Terminals to parse, e.g. "id + ( num * id )".
    #[arg(short, long)]
    input: Option<String>,

    /// Expand each frontier of the automaton on a worker pool.
    #[arg(long)]
    parallel: bool,

    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if args.parallel {
        BuildConfig::parallel(args.threads)
    } else {
        BuildConfig::sequential()
    };

    let now = Instant::now();
    let parser = grammars::build(args.grammar, &config)
        .with_context(|| format!("failed to build the {:?} grammar", args.grammar))?;
    let elapsed = now.elapsed();
    println!(
        "Built {} states, {} transitions, {} table entries in {:.2?}",
        parser.automaton().state_count(),
        parser.automaton().edge_count(),
        parser.table().len(),
        elapsed
    );

    for dump in &args.dump {
        match dump {
            Dump::Sets => print_sets(&parser),
            Dump::States => print!("{}", parser.dump_states()),
            Dump::Table => print!("{}", parser.dump_table()),
            Dump::Dot => println!("{}", parser.to_dot()),
        }
    }

    if let Some(input) = &args.input {
        let tokens: Vec<Token<String, String>> = input
            .split_whitespace()
            .map(|kind| Token::new(kind.to_string(), kind.to_string()))
            .collect();

        let now = Instant::now();
        let tree = parser.parse(tokens).context("input was rejected")?;
        let elapsed = now.elapsed();
        println!("Parsing took {:.2?}", elapsed);
        println!("{}", tree);
    }

    Ok(())
}

fn print_sets(parser: &Parser<String, String>) {
    let mut nt = NT::new(0);
    while let Some(name) = parser.nonterminal_name(nt) {
        let mut first: Vec<String> = parser
            .first(&Symbol::Nonterminal(nt))
            .unwrap_or_default()
            .into_iter()
            .collect();
        let mut follow: Vec<String> = parser.follow(nt).unwrap_or_default().into_iter().collect();
        first.sort();
        follow.sort();
        println!(
            "{:<8} nullable: {:<5} first: {{{}}} follow: {{{}}}",
            name,
            parser.is_nullable(nt),
            first.join(", "),
            follow.join(", ")
        );
        nt = NT::new(nt.index() + 1);
    }
}
