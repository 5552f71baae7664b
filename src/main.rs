// minic: front-end driver — tokenize, parse, and analyze a source file,
// printing each stage's report.

use std::fs;
use std::path::Path;
use std::process;

use minic::parser::lexer::Lexer;
use minic::parser::parser::Parser;
use minic::report;
use minic::semantic::analyzer::Analyzer;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("minic");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.c>", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} demos/average.c    # multi-function program", program_name);
        eprintln!("  {} demos/scopes.c     # nested scopes and a for loop", program_name);
        process::exit(2);
    }

    let source_file = &args[1];

    if !source_file.ends_with(".c") {
        eprintln!("Error: '{}' is not a .c file", source_file);
        process::exit(2);
    }

    if !Path::new(source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        process::exit(1);
    }

    let source = match fs::read_to_string(source_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", source_file, e);
            process::exit(1);
        }
    };

    // Tokenize separately so the token report shows exactly the stream the
    // parser consumes.
    let tokens = Lexer::new(&source).tokenize();
    println!("--- Lexical analysis (tokens) ---");
    print!("{}", report::render_tokens(&tokens));
    println!("--- End tokens ---");
    println!();

    let mut parser = Parser::from_tokens(tokens);
    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    println!("--- Syntax / AST ---");
    print!("{}", report::render_ast(&program));
    println!("--- End AST ---");
    println!();

    match Analyzer::new().analyze(&program) {
        Ok(analysis) => {
            println!("Semantic: no errors");
            print!("{}", report::render_symbol_tables(&analysis));
        }
        Err(e) => {
            eprintln!("Semantic ERROR: {}", e);
            process::exit(1);
        }
    }
}
