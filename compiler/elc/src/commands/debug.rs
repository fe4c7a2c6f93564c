//! Debug commands: `parse` and `lex` for inspecting the front end.

use el_parse::compile_str;

use super::is_template;

/// Compile an expression and print its tree.
pub fn parse_expression(source: &str) {
    let result = if is_template(source) {
        compile_str(source).map(|compiled| (compiled.node, format!("{:?}", compiled.kind)))
    } else {
        el_parse::parse_expression(source).map(|node| (node, "Bare".to_string()))
    };
    match result {
        Ok((node, kind)) => {
            println!("Parse result for '{source}':");
            println!("  Kind: {kind}");
            println!("  Tree: {node}");
            println!();
            println!("{node:#?}");
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Tokenize a bare expression and print the token stream.
pub fn lex_expression(source: &str) {
    match el_lexer::lex(source) {
        Ok(tokens) => {
            println!("Tokens for '{source}' ({} tokens):", tokens.len());
            for tok in &tokens {
                println!("  {:?} @ {}", tok.kind, tok.span);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
