//! Plain-text reports over the pipeline's outputs
//!
//! The driver prints three listings: the token stream, the AST as an ASCII
//! tree (`|--`/`\--` connectors), and the symbol tables with aligned
//! columns. Everything here reads the pipeline's data structures without
//! touching them; rendering into a `String` keeps the library free of
//! direct terminal output.

use std::fmt::Write;

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::semantic::analyzer::Analysis;
use crate::semantic::symbols::SymbolKind;

/// Render the token stream, one token per line.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "line {:>4}  {:<12} {}", token.line, kind_name(token.kind), token.lexeme);
    }
    out
}

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Func => "func",
        TokenKind::If => "if",
        TokenKind::Else => "else",
        TokenKind::While => "while",
        TokenKind::For => "for",
        TokenKind::Return => "return",
        TokenKind::Print => "print",
        TokenKind::Read => "read",
        TokenKind::True => "true",
        TokenKind::False => "false",
        TokenKind::Int => "int",
        TokenKind::Float => "float",
        TokenKind::Bool => "bool",
        TokenKind::Char => "char",
        TokenKind::Void => "void",
        TokenKind::Identifier => "identifier",
        TokenKind::Number => "number",
        TokenKind::Assign => "assign",
        TokenKind::RelOp => "relop",
        TokenKind::AddOp => "addop",
        TokenKind::MulOp => "mulop",
        TokenKind::DivOp => "divop",
        TokenKind::ModOp => "modop",
        TokenKind::LogOp => "logop",
        TokenKind::UnOp => "unop",
        TokenKind::LParen => "lparen",
        TokenKind::RParen => "rparen",
        TokenKind::LBrace => "lbrace",
        TokenKind::RBrace => "rbrace",
        TokenKind::Semicolon => "semicolon",
        TokenKind::Comma => "comma",
    }
}

/// Render the AST as an indented tree.
pub fn render_ast(program: &Program) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\\-- Program");
    let count = program.functions.len();
    for (index, function) in program.functions.iter().enumerate() {
        render_function(&mut out, function, "    ", index + 1 == count);
    }
    out
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "\\-- "
    } else {
        "|-- "
    }
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    format!("{}{}", prefix, if is_last { "    " } else { "|   " })
}

fn render_function(out: &mut String, function: &Function, prefix: &str, is_last: bool) {
    let _ = writeln!(out, "{}{}Function: {}", prefix, connector(is_last), function.name);
    let inner = child_prefix(prefix, is_last);
    let _ = writeln!(out, "{}|-- return_type: {}", inner, function.return_type);
    if !function.params.is_empty() {
        let _ = writeln!(out, "{}|-- params:", inner);
        let param_prefix = child_prefix(&inner, false);
        let count = function.params.len();
        for (index, param) in function.params.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}{}({}, {})",
                param_prefix,
                connector(index + 1 == count),
                param.ty,
                param.name
            );
        }
    }
    render_block(out, &function.body, &inner, true);
}

fn render_block(out: &mut String, block: &Block, prefix: &str, is_last: bool) {
    let _ = writeln!(out, "{}{}Block", prefix, connector(is_last));
    let inner = child_prefix(prefix, is_last);
    let count = block.statements.len();
    for (index, stmt) in block.statements.iter().enumerate() {
        render_stmt(out, stmt, &inner, index + 1 == count);
    }
}

fn render_stmt(out: &mut String, stmt: &Stmt, prefix: &str, is_last: bool) {
    match stmt {
        Stmt::VarDecl { ty, name, init, .. } => {
            let _ = writeln!(out, "{}{}VarDecl: {} {}", prefix, connector(is_last), ty, name);
            if let Some(init) = init {
                render_expr(out, init, &child_prefix(prefix, is_last), true);
            }
        }
        Stmt::Assign { target, value, .. } => {
            let _ = writeln!(out, "{}{}Assign", prefix, connector(is_last));
            let inner = child_prefix(prefix, is_last);
            let _ = writeln!(out, "{}|-- Identifier: {}", inner, target.name);
            render_expr(out, value, &inner, true);
        }
        Stmt::If {
            cond,
            then_block,
            else_block,
            ..
        } => {
            let _ = writeln!(out, "{}{}IfElse", prefix, connector(is_last));
            let inner = child_prefix(prefix, is_last);
            render_expr(out, cond, &inner, false);
            render_block(out, then_block, &inner, else_block.is_none());
            if let Some(else_block) = else_block {
                render_block(out, else_block, &inner, true);
            }
        }
        Stmt::While { cond, body, .. } => {
            let _ = writeln!(out, "{}{}While", prefix, connector(is_last));
            let inner = child_prefix(prefix, is_last);
            render_expr(out, cond, &inner, false);
            render_block(out, body, &inner, true);
        }
        Stmt::For {
            init,
            cond,
            step,
            body,
            ..
        } => {
            let _ = writeln!(out, "{}{}For", prefix, connector(is_last));
            let inner = child_prefix(prefix, is_last);
            if let Some(init) = init {
                let _ = writeln!(out, "{}|-- init:", inner);
                render_stmt(out, init, &child_prefix(&inner, false), true);
            }
            if let Some(cond) = cond {
                let _ = writeln!(out, "{}|-- condition:", inner);
                render_expr(out, cond, &child_prefix(&inner, false), true);
            }
            if let Some(step) = step {
                let _ = writeln!(out, "{}|-- step:", inner);
                render_stmt(out, step, &child_prefix(&inner, false), true);
            }
            render_block(out, body, &inner, true);
        }
        Stmt::Return { value, .. } => {
            let _ = writeln!(out, "{}{}Return", prefix, connector(is_last));
            render_expr(out, value, &child_prefix(prefix, is_last), true);
        }
        Stmt::Print { value, .. } => {
            let _ = writeln!(out, "{}{}Print", prefix, connector(is_last));
            render_expr(out, value, &child_prefix(prefix, is_last), true);
        }
        Stmt::Read { target, .. } => {
            let _ = writeln!(out, "{}{}Read", prefix, connector(is_last));
            let inner = child_prefix(prefix, is_last);
            let _ = writeln!(out, "{}\\-- Identifier: {}", inner, target.name);
        }
        Stmt::Call(call) => render_call(out, call, prefix, is_last),
        Stmt::Expr(expr) => render_expr(out, expr, prefix, is_last),
    }
}

fn render_expr(out: &mut String, expr: &Expr, prefix: &str, is_last: bool) {
    match expr {
        Expr::Constant { value, .. } => {
            let _ = writeln!(out, "{}{}Constant: {}", prefix, connector(is_last), value);
        }
        Expr::Identifier(ident) => {
            let _ = writeln!(out, "{}{}Identifier: {}", prefix, connector(is_last), ident.name);
        }
        Expr::Binary { op, left, right, .. } => {
            let _ = writeln!(out, "{}{}BinOp: {}", prefix, connector(is_last), op);
            let inner = child_prefix(prefix, is_last);
            render_expr(out, left, &inner, false);
            render_expr(out, right, &inner, true);
        }
        Expr::Unary { op, operand, .. } => {
            let _ = writeln!(out, "{}{}UnOp: {}", prefix, connector(is_last), op);
            render_expr(out, operand, &child_prefix(prefix, is_last), true);
        }
        Expr::Call(call) => render_call(out, call, prefix, is_last),
    }
}

fn render_call(out: &mut String, call: &FuncCall, prefix: &str, is_last: bool) {
    let _ = writeln!(out, "{}{}FuncCall: {}", prefix, connector(is_last), call.name);
    let inner = child_prefix(prefix, is_last);
    let count = call.args.len();
    for (index, arg) in call.args.iter().enumerate() {
        render_expr(out, arg, &inner, index + 1 == count);
    }
}

/// Render the global table and every per-function scope list.
pub fn render_symbol_tables(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Symbol Tables ---");

    if !analysis.globals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Globals:");
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<10} {}",
            "Name", "Type", "Address", "Additional Info"
        );
        for id in analysis.globals.iter() {
            let entry = analysis.symbol(id);
            let address = format!("{:#06x}", entry.address);
            match &entry.kind {
                SymbolKind::Function {
                    return_type,
                    param_types,
                } => {
                    let params = param_types
                        .iter()
                        .map(|t| t.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    let _ = writeln!(
                        out,
                        "{:<20} {:<12} {:<10} returns={}, params=[{}]",
                        entry.name, "function", address, return_type, params
                    );
                }
                _ => {
                    let _ = writeln!(
                        out,
                        "{:<20} {:<12} {:<10} kind={}",
                        entry.name,
                        entry.ty.to_string(),
                        address,
                        entry.kind.label()
                    );
                }
            }
        }
    }

    for table in &analysis.functions {
        let _ = writeln!(out);
        let _ = writeln!(out, "Function: {}", table.name);
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<16} {:<6} {:<10} {}",
            "Name", "Type", "Scope", "Level", "Address", "Additional Info"
        );
        for (level, scope) in table.scopes.iter().enumerate() {
            for &id in &scope.symbols {
                let entry = analysis.symbol(id);
                let scope_display = format!("{}({})", scope.label, entry.kind.label());
                let address = format!("{:#06x}", entry.address);
                let additional = match &entry.init_value {
                    Some(init) => format!("initialized=true, init={}", init),
                    None => "initialized=false".to_string(),
                };
                let _ = writeln!(
                    out,
                    "{:<20} {:<12} {:<16} {:<6} {:<10} {}",
                    entry.name,
                    entry.ty.to_string(),
                    scope_display,
                    level,
                    address,
                    additional
                );
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- End Symbol Tables ---");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;
    use crate::parser::parser::Parser;
    use crate::semantic::analyzer::Analyzer;

    const SOURCE: &str = "func int add(int a, int b) { return a + b; }\n\
                          func int main() { int x = add(1, 2); print(x); return x; }";

    #[test]
    fn test_token_listing() {
        let tokens = Lexer::new("int x = 1;").tokenize();
        let listing = render_tokens(&tokens);

        assert!(listing.contains("identifier"));
        assert!(listing.contains("assign"));
        assert!(listing.lines().count() == tokens.len());
    }

    #[test]
    fn test_ast_tree_shape() {
        let program = Parser::new(SOURCE).parse_program().unwrap();
        let tree = render_ast(&program);

        assert!(tree.starts_with("\\-- Program"));
        assert!(tree.contains("|-- Function: add"));
        assert!(tree.contains("\\-- Function: main"));
        assert!(tree.contains("BinOp: +"));
        assert!(tree.contains("FuncCall: add"));
    }

    #[test]
    fn test_symbol_table_listing() {
        let program = Parser::new(SOURCE).parse_program().unwrap();
        let analysis = Analyzer::new().analyze(&program).unwrap();
        let listing = render_symbol_tables(&analysis);

        assert!(listing.contains("Globals:"));
        assert!(listing.contains("returns=int, params=[int, int]"));
        assert!(listing.contains("Function: main"));
        assert!(listing.contains("function(param)"));
        assert!(listing.contains("init=add(1, 2)"));
        assert!(listing.contains("0x1000"));
    }
}
