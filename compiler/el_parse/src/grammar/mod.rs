//! EL grammar, one method per precedence level.
//!
//! From loosest to tightest:
//! `;`, lambda / `=`, `?:`, `||`, `&&`, `==` `!=`, `<` `>` `<=` `>=`, `+=`,
//! `+` `-`, `*` `/` `%`, unary `-` `!` `empty`, then values with their
//! `.name` / `[key]` / `(args)` suffixes.

mod expr;
mod primary;
