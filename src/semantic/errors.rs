//! Semantic error types for the minic front end
//!
//! All semantic errors are fatal: analysis stops at the first one and
//! reports it to the caller as a structured value. Whether to terminate the
//! process is the caller's decision.

use std::fmt;

/// Errors raised during semantic analysis.
#[derive(Debug, Clone)]
pub enum SemanticError {
    /// A function, parameter, or variable declared twice under one name in
    /// the same scope.
    DuplicateDeclaration { name: String, line: usize },

    /// A variable used without a prior, in-scope declaration.
    UndeclaredUse { name: String, line: usize },

    /// A type rule violated by an initializer, assignment, return value,
    /// condition, operand, or call argument.
    TypeMismatch { message: String, line: usize },

    /// A call whose argument count differs from the declared parameter count.
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A call to a function absent from the global table.
    UndefinedFunctionCall { name: String, line: usize },
}

impl SemanticError {
    /// Source line the error was raised at.
    pub fn line(&self) -> usize {
        match self {
            SemanticError::DuplicateDeclaration { line, .. } => *line,
            SemanticError::UndeclaredUse { line, .. } => *line,
            SemanticError::TypeMismatch { line, .. } => *line,
            SemanticError::ArityMismatch { line, .. } => *line,
            SemanticError::UndefinedFunctionCall { line, .. } => *line,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::DuplicateDeclaration { name, line } => {
                write!(f, "Duplicate declaration of '{}' at line {}", name, line)
            }
            SemanticError::UndeclaredUse { name, line } => {
                write!(f, "Use of undeclared '{}' at line {}", name, line)
            }
            SemanticError::TypeMismatch { message, line } => {
                write!(f, "{} at line {}", message, line)
            }
            SemanticError::ArityMismatch {
                name,
                expected,
                found,
                line,
            } => {
                write!(
                    f,
                    "Function '{}' expects {} argument{}, got {} at line {}",
                    name,
                    expected,
                    if *expected == 1 { "" } else { "s" },
                    found,
                    line
                )
            }
            SemanticError::UndefinedFunctionCall { name, line } => {
                write!(f, "Call to undefined function '{}' at line {}", name, line)
            }
        }
    }
}

impl std::error::Error for SemanticError {}
