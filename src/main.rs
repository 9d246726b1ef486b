use std::path::Path;

use crate::commandline_parser::ArgumentParser;
use crate::generator::ParserGenerator;
use crate::grammar::GrammarLoader;
use crate::tokenizing::tokenizer::Tokenizer;

mod commandline_parser;
mod generator;

pub mod generating;
pub mod grammar;
pub mod tokenizing;

#[cfg(test)]
mod tests;

fn main() {
    let mut args = ArgumentParser::new();
    let debug = args.has_flag("--debug");

    let status = match args.verb() {
        Some("parse_grammar") => cmd_parse_grammar(&args, debug),
        Some("parse_file") => cmd_parse_file(&args, debug),
        Some("gen_parser") => cmd_gen_parser(&args, debug),
        _ => {
            print_usage();
            1
        }
    };

    for flag in args.unused_flags() {
        eprintln!("unrecognized flag {flag}");
    }

    std::process::exit(status);
}

fn print_usage() {
    eprintln!("usage: sprig [--debug] parse_grammar <grammar-file>");
    eprintln!("       sprig [--debug] parse_file <source-file>");
    eprintln!("       sprig [--debug] gen_parser <grammar-file>");
}

fn cmd_parse_grammar(args: &ArgumentParser, debug: bool) -> i32 {
    let file_name = match args.get_parameter(0) {
        Some(file_name) => file_name,
        None => {
            print_usage();
            return 1;
        }
    };

    let mut loader = GrammarLoader::new();
    loader.debug = debug;
    loader.load_file(Path::new(file_name));

    eprintln!("TOKENS COUNT={}", loader.tokens.len());
    eprintln!("RULES COUNT={}", loader.grammar.len());
    0
}

fn cmd_parse_file(args: &ArgumentParser, debug: bool) -> i32 {
    let file_name = match args.get_parameter(0) {
        Some(file_name) => file_name,
        None => {
            print_usage();
            return 1;
        }
    };

    let tokenizer = Tokenizer { debug };

    match tokenizer.tokenize_file(Path::new(file_name)) {
        Ok(tokens) => {
            for tok in &tokens {
                println!("{}", tok);
            }
            0
        }
        Err(err) => {
            let bytes = std::fs::read(file_name).unwrap_or_default();
            let source = String::from_utf8_lossy(&bytes);
            eprintln!("{}", err.error_string(&source));
            1
        }
    }
}

fn cmd_gen_parser(args: &ArgumentParser, debug: bool) -> i32 {
    let file_name = match args.get_parameter(0) {
        Some(file_name) => file_name,
        None => {
            print_usage();
            return 1;
        }
    };

    let generator = ParserGenerator { debug };
    let mut stdout = std::io::stdout();

    match generator.run(Path::new(file_name), &mut stdout) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            1
        }
    }
}
