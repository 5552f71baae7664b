//! minic source parser
//!
//! This module transforms minic source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # The minic language
//!
//! A small C-like language in which every top-level declaration is a
//! function introduced with the `func` keyword:
//! - Types: `int`, `float`, `bool`, `char`, `void`
//! - Statements: declarations, assignments, `if/else`, `while`, `for`,
//!   `return`, `print`, `read`, function calls, expression statements
//! - Expressions: arithmetic, comparison, logical, unary `- ! ~`,
//!   function calls, parenthesised subexpressions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary
//! operators. No external parser generator dependencies. The parser consumes
//! tokens strictly left to right with a single token of lookahead and stops
//! at the first grammar violation.

pub mod ast;
pub mod lexer;
pub mod parser;
