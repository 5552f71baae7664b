//! # Introduction
//!
//! minic is the front end of a compiler for a small C-like language:
//! functions are introduced with the `func` keyword, variables are typed
//! (`int`, `float`, `bool`, `char`, `void`), and programs are checked but
//! never executed.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Analyzer → Symbol tables
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST.
//! 2. [`semantic`] — resolves every identifier against nested lexical
//!    scopes, checks types and function signatures, and produces the
//!    symbol tables plus an identifier→symbol resolution map.
//! 3. [`report`] — plain-text listings (tokens, AST tree, symbol tables)
//!    for the command-line driver; not part of the checked semantics.
//!
//! Each stage is fail-fast: the first violation surfaces as a structured
//! error and nothing after it runs.
//!
//! ## Supported language
//!
//! Types: `int`, `float`, `bool`, `char`, `void`.
//! Control flow: `if/else`, `while`, `for`, `return`.
//! Built-ins: `print`, `read`.
//! Expressions: arithmetic, comparison, logical, unary `- ! ~`,
//! function calls, `true`/`false`, integer and float literals.

pub mod parser;
pub mod report;
pub mod semantic;
