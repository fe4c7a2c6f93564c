//! EL command-line tool.

use elc::commands::{eval_expression, lex_expression, parse_eval_options, parse_expression};

fn main() {
    elc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: el eval <expr> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --define, -d <name>=<expr>   Define a bean before evaluating");
                eprintln!("  --as <type>                  Coerce the result (int, double, String, ...)");
                std::process::exit(1);
            }
            let options = match parse_eval_options(&args[3..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            eval_expression(&args[2], &options);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: el parse <expr>");
                std::process::exit(1);
            }
            parse_expression(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: el lex <expr>");
                std::process::exit(1);
            }
            lex_expression(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("el {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("EL expression evaluator");
    println!();
    println!("Usage: el <command> [options]");
    println!();
    println!("Commands:");
    println!("  eval <expr>          Evaluate an expression or ${{...}} template");
    println!("  parse <expr>         Parse and display the expression tree");
    println!("  lex <expr>           Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Eval options:");
    println!("  --define, -d <name>=<expr>   Define a bean before evaluating");
    println!("  --as <type>                  Coerce the result to <type>");
    println!();
    println!("Environment:");
    println!("  EL_CACHE=0|1         Disable or enable the compile cache");
    println!("  EL_READ_ONLY=0|1     Reject every assignment");
    println!("  RUST_LOG=<filter>    Enable tracing output");
}
