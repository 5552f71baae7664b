//! Recursive descent parser for the minic language
//!
//! One method per grammar nonterminal; binary expressions use precedence
//! climbing, one method per precedence level, each folding left-to-right so
//! every binary level is left-associative. The parser consumes tokens
//! strictly left to right with a single token of lookahead and stops at the
//! first grammar violation; there is no backtracking and no recovery.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for minic
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    next_node_id: NodeId,
}

impl Parser {
    /// Create a parser for the given source string, tokenizing it first.
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::new(source).tokenize())
    }

    /// Create a parser over an already-tokenized stream.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            next_node_id: 0,
        }
    }

    /// Parse the entire program: a sequence of `func` definitions.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();

        while !self.is_at_end() {
            if !self.check(TokenKind::Func) {
                return self.error(format!(
                    "Expected 'func' at top level, found {}",
                    self.describe_current()
                ));
            }
            functions.push(self.parse_function()?);
        }

        Ok(Program { functions })
    }

    /// Function := 'func' Type identifier '(' ParamList? ')' Block
    fn parse_function(&mut self) -> Result<Function, ParseError> {
        let line = self.expect(TokenKind::Func, "Expected 'func' at start of function")?.line;
        let return_type = self.parse_type()?;
        let name = self.expect_identifier("Expected function name")?.lexeme;

        self.expect(TokenKind::LParen, "Expected '(' after function name")?;
        let params = self.parse_param_list()?;
        self.expect(TokenKind::RParen, "Missing ')' after parameter list")?;

        let body = self.parse_block()?;

        Ok(Function {
            name,
            return_type,
            params,
            body,
            line,
        })
    }

    /// ParamList := Param (',' Param)* | ε
    fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let ty = self.parse_type()?;
            let name = self.expect_identifier("Expected parameter name")?.lexeme;
            params.push(Param { ty, name });

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a type-name token; anything else here is a parse failure.
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let ty = match self.peek_kind() {
            Some(TokenKind::Int) => Type::Int,
            Some(TokenKind::Float) => Type::Float,
            Some(TokenKind::Bool) => Type::Bool,
            Some(TokenKind::Char) => Type::Char,
            Some(TokenKind::Void) => Type::Void,
            _ => {
                return self.error(format!("Expected type, found {}", self.describe_current()));
            }
        };
        self.advance();
        Ok(ty)
    }

    /// Block := '{' Stmt* '}'
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LBrace, "Expected '{' to start block")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.is_at_end() {
                return self.error("Expected '}' to close block");
            }
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace, "Expected '}' to close block")?;
        Ok(Block { statements })
    }

    /// Parse a statement, dispatching on the current token.
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.is_type_token() {
            return self.parse_var_decl();
        }

        match self.peek_kind() {
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Return) => self.parse_return(),
            Some(TokenKind::Print) => self.parse_print(),
            Some(TokenKind::Read) => self.parse_read(),
            Some(TokenKind::Identifier) => self.parse_identifier_statement(),
            Some(
                TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::UnOp,
            ) => self.parse_expr_statement(),
            Some(TokenKind::AddOp) if self.peek_lexeme() == Some("-") => {
                self.parse_expr_statement()
            }
            Some(_) => self.error(format!(
                "Unknown statement start: {}",
                self.describe_current()
            )),
            None => self.error("Unexpected end of input in statement"),
        }
    }

    /// Statements led by an identifier: assignment, call, or a plain
    /// expression statement.
    fn parse_identifier_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek_ahead(1).map(|t| t.kind) {
            Some(TokenKind::Assign) => {
                let stmt = self.parse_assignment_open()?;
                self.expect(TokenKind::Semicolon, "Missing ';' after assignment")?;
                Ok(stmt)
            }
            Some(TokenKind::LParen) => {
                let call = self.parse_call()?;
                self.expect(TokenKind::Semicolon, "Missing ';' after function call")?;
                Ok(Stmt::Call(call))
            }
            _ => self.parse_expr_statement(),
        }
    }

    /// ExprStmt := Expr ';'
    fn parse_expr_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "Missing ';' after expression")?;
        Ok(Stmt::Expr(expr))
    }

    /// VarDecl := Type identifier ('=' Expr)? ';'
    fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let decl = self.parse_var_decl_open()?;
        self.expect(TokenKind::Semicolon, "Missing ';' after variable declaration")?;
        Ok(decl)
    }

    /// Variable declaration without the trailing ';' (shared with `for`
    /// headers, which supply their own separators).
    fn parse_var_decl_open(&mut self) -> Result<Stmt, ParseError> {
        let ty = self.parse_type()?;
        let token = self.expect_identifier("Expected identifier after type")?;

        let init = if self.match_kind(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Stmt::VarDecl {
            ty,
            name: token.lexeme,
            init,
            line: token.line,
        })
    }

    /// Assignment without the trailing ';' (shared with `for` headers).
    fn parse_assignment_open(&mut self) -> Result<Stmt, ParseError> {
        let target = self.parse_identifier()?;
        let line = target.line;
        self.expect(TokenKind::Assign, "Expected '=' in assignment")?;
        let value = self.parse_expression()?;
        Ok(Stmt::Assign {
            target,
            value,
            line,
        })
    }

    /// IfElse := 'if' '(' Expr ')' Block ('else' Block)?
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let line = self.expect(TokenKind::If, "Expected 'if'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'if'")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen, "Missing ')' after if condition")?;

        let then_block = self.parse_block()?;
        let else_block = if self.match_kind(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
            line,
        })
    }

    /// While := 'while' '(' Expr ')' Block
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let line = self.expect(TokenKind::While, "Expected 'while'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'while'")?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen, "Missing ')' after while condition")?;
        let body = self.parse_block()?;

        Ok(Stmt::While { cond, body, line })
    }

    /// For := 'for' '(' ForInit? ';' Expr? ';' ForStep? ')' Block
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let line = self.expect(TokenKind::For, "Expected 'for'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'for'")?;

        let init = self.parse_for_init()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after for init")?;

        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after for condition")?;

        let step = self.parse_for_step()?;
        self.expect(TokenKind::RParen, "Expected ')' after for header")?;

        let body = self.parse_block()?;

        Ok(Stmt::For {
            init,
            cond,
            step,
            body,
            line,
        })
    }

    /// ForInit := VarDecl-without-';' | Assignment-without-';' | ε
    fn parse_for_init(&mut self) -> Result<Option<Box<Stmt>>, ParseError> {
        if self.is_type_token() {
            return Ok(Some(Box::new(self.parse_var_decl_open()?)));
        }
        if self.check(TokenKind::Identifier)
            && self.peek_ahead(1).map(|t| t.kind) == Some(TokenKind::Assign)
        {
            return Ok(Some(Box::new(self.parse_assignment_open()?)));
        }
        Ok(None)
    }

    /// ForStep := Assignment-without-';' | ε
    fn parse_for_step(&mut self) -> Result<Option<Box<Stmt>>, ParseError> {
        if self.check(TokenKind::Identifier)
            && self.peek_ahead(1).map(|t| t.kind) == Some(TokenKind::Assign)
        {
            return Ok(Some(Box::new(self.parse_assignment_open()?)));
        }
        Ok(None)
    }

    /// Return := 'return' Expr ';'
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let line = self.expect(TokenKind::Return, "Expected 'return'")?.line;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "Missing ';' after return")?;
        Ok(Stmt::Return { value, line })
    }

    /// Print := 'print' '(' Expr ')' ';'
    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        let line = self.expect(TokenKind::Print, "Expected 'print'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'print'")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::RParen, "Missing ')' after print")?;
        self.expect(TokenKind::Semicolon, "Missing ';' after print")?;
        Ok(Stmt::Print { value, line })
    }

    /// Read := 'read' '(' identifier ')' ';'
    fn parse_read(&mut self) -> Result<Stmt, ParseError> {
        let line = self.expect(TokenKind::Read, "Expected 'read'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'read'")?;
        let target = self.parse_identifier()?;
        self.expect(TokenKind::RParen, "Missing ')' after read")?;
        self.expect(TokenKind::Semicolon, "Missing ';' after read")?;
        Ok(Stmt::Read { target, line })
    }

    // ===== Expressions (precedence climbing, lowest level first) =====

    /// Expr := LogicalOr
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    /// LogicalOr := LogicalAnd ('||' LogicalAnd)*
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while let Some(token) = self.match_op(TokenKind::LogOp, &["||"]) {
            let right = self.parse_logical_and()?;
            left = Expr::Binary {
                op: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                line: token.line,
            };
        }

        Ok(left)
    }

    /// LogicalAnd := Equality ('&&' Equality)*
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while let Some(token) = self.match_op(TokenKind::LogOp, &["&&"]) {
            let right = self.parse_equality()?;
            left = Expr::Binary {
                op: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
                line: token.line,
            };
        }

        Ok(left)
    }

    /// Equality := Relational (('==' | '!=') Relational)*
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        while let Some(token) = self.match_op(TokenKind::RelOp, &["==", "!="]) {
            let op = if token.lexeme == "==" {
                BinOp::Eq
            } else {
                BinOp::Ne
            };
            let right = self.parse_relational()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line: token.line,
            };
        }

        Ok(left)
    }

    /// Relational := Additive (('<' | '>' | '<=' | '>=') Additive)*
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while let Some(token) = self.match_op(TokenKind::RelOp, &["<", ">", "<=", ">="]) {
            let op = match token.lexeme.as_str() {
                "<" => BinOp::Lt,
                ">" => BinOp::Gt,
                "<=" => BinOp::Le,
                _ => BinOp::Ge,
            };
            let right = self.parse_additive()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line: token.line,
            };
        }

        Ok(left)
    }

    /// Additive := Multiplicative (('+' | '-') Multiplicative)*
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(token) = self.match_op(TokenKind::AddOp, &["+", "-"]) {
            let op = if token.lexeme == "+" {
                BinOp::Add
            } else {
                BinOp::Sub
            };
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line: token.line,
            };
        }

        Ok(left)
    }

    /// Multiplicative := Unary (('*' | '/' | '%') Unary)*
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::MulOp) => BinOp::Mul,
                Some(TokenKind::DivOp) => BinOp::Div,
                Some(TokenKind::ModOp) => BinOp::Mod,
                _ => break,
            };
            let line = self.advance_token().line;
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    /// Unary := ('-' | '!' | '~') Unary | Primary
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match (self.peek_kind(), self.peek_lexeme()) {
            (Some(TokenKind::AddOp), Some("-")) => Some(UnOp::Neg),
            (Some(TokenKind::UnOp), Some("!")) => Some(UnOp::Not),
            (Some(TokenKind::UnOp), Some("~")) => Some(UnOp::BitNot),
            _ => None,
        };

        if let Some(op) = op {
            let line = self.advance_token().line;
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::Unary { op, operand, line });
        }

        self.parse_primary()
    }

    /// Primary := number | 'true' | 'false' | identifier ('(' ArgList? ')')?
    ///          | '(' Expr ')'
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Number) => {
                let token = self.advance_token();
                let value = parse_number(&token)?;
                Ok(Expr::Constant {
                    value,
                    line: token.line,
                })
            }
            Some(TokenKind::True) => {
                let line = self.advance_token().line;
                Ok(Expr::Constant {
                    value: Constant::Bool(true),
                    line,
                })
            }
            Some(TokenKind::False) => {
                let line = self.advance_token().line;
                Ok(Expr::Constant {
                    value: Constant::Bool(false),
                    line,
                })
            }
            Some(TokenKind::Identifier) => {
                if self.peek_ahead(1).map(|t| t.kind) == Some(TokenKind::LParen) {
                    Ok(Expr::Call(self.parse_call()?))
                } else {
                    Ok(Expr::Identifier(self.parse_identifier()?))
                }
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "Missing ')'")?;
                Ok(expr)
            }
            Some(_) => self.error(format!(
                "Unexpected {} in expression",
                self.describe_current()
            )),
            None => self.error("Unexpected end of input in expression"),
        }
    }

    /// FuncCall := identifier '(' ArgList? ')'
    fn parse_call(&mut self) -> Result<FuncCall, ParseError> {
        let token = self.expect_identifier("Expected function name")?;
        self.expect(TokenKind::LParen, "Expected '(' after function name")?;
        let args = self.parse_arg_list()?;
        self.expect(TokenKind::RParen, "Missing ')' after function call")?;

        Ok(FuncCall {
            name: token.lexeme,
            args,
            line: token.line,
        })
    }

    /// ArgList := Expr (',' Expr)* | ε
    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    /// Consume an identifier token into an [`Identifier`] node with a fresh
    /// [`NodeId`].
    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.expect_identifier("Expected identifier")?;
        let id = self.next_node_id;
        self.next_node_id += 1;
        Ok(Identifier {
            name: token.lexeme,
            id,
            line: token.line,
        })
    }

    // ===== Helper methods =====

    fn is_type_token(&self) -> bool {
        self.peek_kind().is_some_and(|k| k.is_type_name())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_lexeme(&self) -> Option<&str> {
        self.peek().map(|t| t.lexeme.as_str())
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume the current token if it has the given kind.
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it has `kind` and one of the given
    /// lexemes, returning it.
    fn match_op(&mut self, kind: TokenKind, ops: &[&str]) -> Option<Token> {
        let matched = self
            .peek()
            .is_some_and(|t| t.kind == kind && ops.contains(&t.lexeme.as_str()));
        if matched {
            Some(self.advance_token())
        } else {
            None
        }
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Consume and return the current token. Callers check `peek` first.
    fn advance_token(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        self.position += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance_token())
        } else {
            self.error(format!("{}, found {}", message, self.describe_current()))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Identifier, message)
    }

    fn describe_current(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, ParseError> {
        let line = self
            .peek()
            .map(|t| t.line)
            .or_else(|| self.tokens.last().map(|t| t.line))
            .unwrap_or(1);
        Err(ParseError {
            message: message.into(),
            line,
        })
    }
}

/// The lexeme of a `Number` token decides int vs float by whether it
/// contains a `.`.
fn parse_number(token: &Token) -> Result<Constant, ParseError> {
    if token.lexeme.contains('.') {
        token
            .lexeme
            .parse::<f64>()
            .map(Constant::Float)
            .map_err(|_| ParseError {
                message: format!("Invalid float literal: {}", token.lexeme),
                line: token.line,
            })
    } else {
        token
            .lexeme
            .parse::<i64>()
            .map(Constant::Int)
            .map_err(|_| ParseError {
                message: format!("Invalid integer literal: {}", token.lexeme),
                line: token.line,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).parse_program().unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::new(source).parse_program().unwrap_err()
    }

    /// Parse `expr` wrapped in a minimal function and dig it back out.
    fn parse_expr(expr: &str) -> Expr {
        let program = parse(&format!("func int main() {{ return {}; }}", expr));
        match &program.functions[0].body.statements[0] {
            Stmt::Return { value, .. } => value.clone(),
            other => panic!("Expected return statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("func int main() { return 0; }");

        assert_eq!(program.functions.len(), 1);
        let function = &program.functions[0];
        assert_eq!(function.name, "main");
        assert_eq!(function.return_type, Type::Int);
        assert!(function.params.is_empty());
        assert_eq!(function.body.statements.len(), 1);
    }

    #[test]
    fn test_parse_parameters() {
        let program = parse("func float avg(int a, float b) { return b; }");

        let params = &program.functions[0].params;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].ty, Type::Int);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[1].ty, Type::Float);
        assert_eq!(params[1].name, "b");
    }

    #[test]
    fn test_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        match parse_expr("1 + 2 * 3") {
            Expr::Binary {
                op: BinOp::Add,
                left,
                right,
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::Constant {
                        value: Constant::Int(1),
                        ..
                    }
                ));
                assert!(matches!(*right, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("Expected addition at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        // 8 - 3 - 2 parses as (8 - 3) - 2
        match parse_expr("8 - 3 - 2") {
            Expr::Binary {
                op: BinOp::Sub,
                left,
                right,
                ..
            } => {
                assert!(matches!(*left, Expr::Binary { op: BinOp::Sub, .. }));
                assert!(matches!(
                    *right,
                    Expr::Constant {
                        value: Constant::Int(2),
                        ..
                    }
                ));
            }
            other => panic!("Expected subtraction at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_nesting() {
        match parse_expr("!!true") {
            Expr::Unary {
                op: UnOp::Not,
                operand,
                ..
            } => assert!(matches!(*operand, Expr::Unary { op: UnOp::Not, .. })),
            other => panic!("Expected unary '!', got {:?}", other),
        }
    }

    #[test]
    fn test_if_else() {
        let program = parse("func int main() { if (1 < 2) { return 1; } else { return 0; } }");

        match &program.functions[0].body.statements[0] {
            Stmt::If {
                cond, else_block, ..
            } => {
                assert!(matches!(cond, Expr::Binary { op: BinOp::Lt, .. }));
                assert!(else_block.is_some());
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_header() {
        let program =
            parse("func int main() { for (int i = 0; i < 3; i = i + 1) { print(i); } return 0; }");

        match &program.functions[0].body.statements[0] {
            Stmt::For {
                init, cond, step, ..
            } => {
                assert!(matches!(init.as_deref(), Some(Stmt::VarDecl { .. })));
                assert!(cond.is_some());
                assert!(matches!(step.as_deref(), Some(Stmt::Assign { .. })));
            }
            other => panic!("Expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_for_header() {
        let program = parse("func int main() { for (;;) { } return 0; }");

        match &program.functions[0].body.statements[0] {
            Stmt::For {
                init, cond, step, ..
            } => {
                assert!(init.is_none());
                assert!(cond.is_none());
                assert!(step.is_none());
            }
            other => panic!("Expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_call_statement_and_expression() {
        let program = parse("func int main() { foo(1, 2); int x = foo(3); return x; }");

        let statements = &program.functions[0].body.statements;
        assert!(matches!(&statements[0], Stmt::Call(call) if call.args.len() == 2));
        assert!(
            matches!(&statements[1], Stmt::VarDecl { init: Some(Expr::Call(_)), .. })
        );
    }

    #[test]
    fn test_identifier_expression_statement() {
        let program = parse("func int main() { x; x + 1; return 0; }");
        let statements = &program.functions[0].body.statements;
        assert!(matches!(&statements[0], Stmt::Expr(Expr::Identifier(_))));
        assert!(matches!(&statements[1], Stmt::Expr(Expr::Binary { .. })));
    }

    #[test]
    fn test_identifier_nodes_get_distinct_ids() {
        let program = parse("func int main() { int x = 0; x = x + 1; return x; }");

        let mut ids = Vec::new();
        for stmt in &program.functions[0].body.statements {
            if let Stmt::Assign { target, .. } = stmt {
                ids.push(target.id);
            }
        }
        let first_id = ids[0];
        // Every identifier node in the tree carries its own id.
        match &program.functions[0].body.statements[2] {
            Stmt::Return {
                value: Expr::Identifier(ident),
                ..
            } => assert_ne!(ident.id, first_id),
            other => panic!("Expected return of identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_must_be_func() {
        let err = parse_err("int main() { return 0; }");
        assert!(err.message.contains("Expected 'func'"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_err("func int main() { int x = 1 return x; }");
        assert!(err.message.contains("';'"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_non_type_in_parameter_list() {
        let err = parse_err("func int f(x int) { return 0; }");
        assert!(err.message.contains("Expected type"));
    }

    #[test]
    fn test_error_line_numbers() {
        let err = parse_err("func int main() {\n    int x = 1;\n    y = ;\n}");
        assert_eq!(err.line, 3);
    }
}
