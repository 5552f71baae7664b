//! Lexer (tokenizer) for minic source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. The scan is a single left-to-right pass: letters, digits, `_`
//! and `.` accumulate into a pending lexeme, and anything else flushes the
//! lexeme before being classified as punctuation or an operator.
//!
//! Tokenization is total: unrecognized characters are skipped rather than
//! reported, and over-long lexemes are discarded, so `tokenize` never fails.

use std::fmt;

/// Identifiers are significant to 31 characters; longer lexemes are dropped.
const MAX_IDENT_LEN: usize = 31;

/// All token kinds produced by the lexer.
///
/// Keywords and type names each get their own kind; operators are grouped
/// by grammatical category (the lexeme distinguishes members of a group,
/// e.g. `RelOp` covers `== != < > <= >=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Func,
    If,
    Else,
    While,
    For,
    Return,
    Print,
    Read,
    True,
    False,

    // Type names
    Int,
    Float,
    Bool,
    Char,
    Void,

    // Literals and names
    Identifier,
    Number,

    // Operators, grouped by grammatical category
    Assign, // =
    RelOp,  // == != < > <= >=
    AddOp,  // + -
    MulOp,  // *
    DivOp,  // /
    ModOp,  // %
    LogOp,  // && ||
    UnOp,   // ~ !

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
}

impl TokenKind {
    /// True for the type-name kinds (`int`, `float`, `bool`, `char`, `void`).
    pub fn is_type_name(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Bool | TokenKind::Char | TokenKind::Void
        )
    }
}

/// A classified lexical unit: kind, source text, and 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Map a flushed lexeme onto its keyword or type-name kind, if it is one.
fn keyword_kind(lexeme: &str) -> Option<TokenKind> {
    let kind = match lexeme {
        "func" => TokenKind::Func,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "return" => TokenKind::Return,
        "print" => TokenKind::Print,
        "read" => TokenKind::Read,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "int" => TokenKind::Int,
        "float" => TokenKind::Float,
        "bool" => TokenKind::Bool,
        "char" => TokenKind::Char,
        "void" => TokenKind::Void,
        _ => return None,
    };
    Some(kind)
}

/// A numeric literal holds at least one digit, at most one `.`, and nothing
/// else (`3`, `3.5`, `3.` and `.5` all qualify; a bare `.` does not).
fn is_number(lexeme: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in lexeme.chars() {
        match c {
            '.' => dots += 1,
            '0'..='9' => digits += 1,
            _ => return false,
        }
    }
    dots <= 1 && digits > 0
}

/// Lexer for minic source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pending = String::new();

        while let Some(c) = self.peek() {
            // Letters, digits, '_' and '.' accumulate into the pending
            // lexeme ('.' so float literals survive as a single lexeme).
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                pending.push(c);
                self.advance();
                continue;
            }

            // Whitespace flushes; a newline bumps the line counter for
            // every token emitted after it.
            if c.is_whitespace() {
                self.flush(&mut pending, &mut tokens);
                if c == '\n' {
                    self.line += 1;
                }
                self.advance();
                continue;
            }

            // Punctuation or operator: flush the running lexeme first.
            self.flush(&mut pending, &mut tokens);

            // Line comment: skip to (but not past) the newline, so the
            // whitespace branch above keeps the line count.
            if c == '/' && self.peek_ahead(1) == Some('/') {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            // Two-character operators, recognized by one-character lookahead.
            let two = match (c, self.peek_ahead(1)) {
                ('=', Some('=')) => Some((TokenKind::RelOp, "==")),
                ('!', Some('=')) => Some((TokenKind::RelOp, "!=")),
                ('<', Some('=')) => Some((TokenKind::RelOp, "<=")),
                ('>', Some('=')) => Some((TokenKind::RelOp, ">=")),
                ('&', Some('&')) => Some((TokenKind::LogOp, "&&")),
                ('|', Some('|')) => Some((TokenKind::LogOp, "||")),
                _ => None,
            };
            if let Some((kind, lexeme)) = two {
                tokens.push(Token {
                    kind,
                    lexeme: lexeme.to_string(),
                    line: self.line,
                });
                self.advance();
                self.advance();
                continue;
            }

            let single = match c {
                '=' => Some(TokenKind::Assign),
                '+' | '-' => Some(TokenKind::AddOp),
                '*' => Some(TokenKind::MulOp),
                '/' => Some(TokenKind::DivOp),
                '%' => Some(TokenKind::ModOp),
                '~' | '!' => Some(TokenKind::UnOp),
                '<' | '>' => Some(TokenKind::RelOp),
                '(' => Some(TokenKind::LParen),
                ')' => Some(TokenKind::RParen),
                '{' => Some(TokenKind::LBrace),
                '}' => Some(TokenKind::RBrace),
                ';' => Some(TokenKind::Semicolon),
                ',' => Some(TokenKind::Comma),
                // Unrecognized characters are skipped without a token or an
                // error. TODO: surface these as lexical errors once callers
                // can render them; silent discard hides typos like `@`.
                _ => None,
            };
            if let Some(kind) = single {
                tokens.push(Token {
                    kind,
                    lexeme: c.to_string(),
                    line: self.line,
                });
            }
            self.advance();
        }

        // Input may end without trailing whitespace; flush the last lexeme.
        self.flush(&mut pending, &mut tokens);

        tokens
    }

    /// Classify and emit the pending lexeme, if any.
    fn flush(&mut self, pending: &mut String, tokens: &mut Vec<Token>) {
        if pending.is_empty() {
            return;
        }
        let lexeme = std::mem::take(pending);

        let kind = if let Some(kind) = keyword_kind(&lexeme) {
            kind
        } else if is_number(&lexeme) {
            TokenKind::Number
        } else if lexeme.len() <= MAX_IDENT_LEN {
            TokenKind::Identifier
        } else {
            // Over-long lexemes are discarded outright.
            return;
        };

        tokens.push(Token {
            kind,
            lexeme,
            line: self.line,
        });
    }

    /// Peek at the current character without consuming.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters.
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Consume the current character.
    fn advance(&mut self) {
        self.position += 1;
    }
}
