//! Compile error types

use thiserror::Error;

use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("line {line}: illegal character in number: expected digit after '.'")]
    DanglingDecimal { line: usize },

    #[error("line {line}: illegal character in string: {ch:?}")]
    IllegalStringCharacter { line: usize, ch: char },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("line {line}: expected !=, got !{found:?}")]
    ExpectedNotEq { line: usize, found: char },

    #[error("line {line}: unknown token: {ch:?}")]
    UnknownToken { line: usize, ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("line {line}: expected {expected}, got {found}")]
    Expected {
        line: usize,
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("line {line}: unexpected token at {lexeme:?}")]
    UnexpectedToken { line: usize, lexeme: String },

    #[error("line {line}: expected comparison operator at {lexeme:?} ({found})")]
    ExpectedComparison {
        line: usize,
        lexeme: String,
        found: TokenKind,
    },

    #[error("line {line}: invalid statement at {lexeme:?} ({found})")]
    InvalidStatement {
        line: usize,
        lexeme: String,
        found: TokenKind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("line {line}: referencing variable before assignment: {name}")]
    UndeclaredVariable { line: usize, name: String },

    #[error("line {line}: label already exists: {name}")]
    DuplicateLabel { line: usize, name: String },

    #[error("line {line}: attempting to GOTO undeclared label: {name}")]
    UndeclaredLabel { line: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

pub type CompileResult<T> = Result<T, CompileError>;
