//! Recursive-descent translator.
//!
//! Parsing and code generation happen in a single pass: each grammar rule
//! validates what it recognizes and immediately appends the matching C text
//! to the emitter. No syntax tree is built.
//!
//! ```text
//! program    := newline* statement* EOF
//! statement  := "PRINT" (STRING | expression) nl
//!             | "IF" comparison "THEN" nl statement* "ENDIF" nl
//!             | "WHILE" comparison "REPEAT" nl statement* "ENDWHILE" nl
//!             | "LABEL" IDENT nl
//!             | "GOTO" IDENT nl
//!             | "LET" IDENT "=" expression nl
//!             | "INPUT" IDENT nl
//! comparison := expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
//! expression := term (("-" | "+") term)*
//! term       := unary (("/" | "*") unary)*
//! unary      := ["+" | "-"] primary
//! primary    := NUMBER | IDENT
//! nl         := NEWLINE+
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::emitter::CEmitter;
use crate::error::{CompileResult, SemanticError, SyntaxError};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// C keywords plus the names the generated program itself relies on.
const C_RESERVED: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "main", "printf", "scanf",
    // Macros from <stdio.h>
    "EOF", "NULL", "BUFSIZ", "FILENAME_MAX", "FOPEN_MAX", "TMP_MAX", "L_tmpnam", "SEEK_SET",
    "SEEK_CUR", "SEEK_END", "stdin", "stdout", "stderr",
];

pub struct Translator<'e> {
    lexer: Lexer,
    emitter: &'e mut CEmitter,
    current: Token,
    peek: Token,
    /// Variables declared so far by LET or INPUT.
    symbols: HashSet<String>,
    labels_declared: HashSet<String>,
    /// GOTO targets in order of first use, with the line of that use.
    labels_gotoed: IndexMap<String, usize>,
    trace: bool,
}

impl<'e> Translator<'e> {
    pub fn new(lexer: Lexer, emitter: &'e mut CEmitter) -> CompileResult<Self> {
        let placeholder = Token::new(TokenKind::Eof, "", 1);
        let mut translator = Translator {
            lexer,
            emitter,
            current: placeholder.clone(),
            peek: placeholder,
            symbols: HashSet::new(),
            labels_declared: HashSet::new(),
            labels_gotoed: IndexMap::new(),
            trace: false,
        };
        translator.advance()?;
        translator.advance()?;
        Ok(translator)
    }

    /// Report every grammar rule entered on stderr.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn program(&mut self) -> CompileResult<()> {
        self.enter("PROGRAM");
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.dedent();
        self.emitter.emit_line("}");

        // Forward GOTOs are legal, so targets can only be checked now.
        for (label, &line) in &self.labels_gotoed {
            if !self.labels_declared.contains(label) {
                return Err(SemanticError::UndeclaredLabel {
                    line,
                    name: label.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    // === Token window ===

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> CompileResult<()> {
        if !self.check(kind) {
            return Err(SyntaxError::Expected {
                line: self.current.line,
                expected: kind,
                found: self.current.kind,
            }
            .into());
        }
        self.advance()
    }

    fn advance(&mut self) -> CompileResult<()> {
        let next = self.lexer.next_token()?;
        self.current = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Consume an identifier, returning its spelling.
    fn ident(&mut self) -> CompileResult<String> {
        let name = self.current.lexeme.clone();
        self.match_token(TokenKind::Ident)?;
        Ok(name)
    }

    fn enter(&self, rule: &str) {
        if self.trace {
            eprintln!("{}", rule);
        }
    }

    // === Statements ===

    fn statement(&mut self) -> CompileResult<()> {
        match self.current.kind {
            TokenKind::Print => {
                self.enter("STATEMENT-PRINT");
                self.advance()?;

                if self.check(TokenKind::String) {
                    let text = format!("printf(\"{}\\n\");", self.current.lexeme);
                    self.emitter.emit_line(&text);
                    self.advance()?;
                } else {
                    self.emitter.emit("printf(\"%.2f\\n\", (float)(");
                    self.expression()?;
                    self.emitter.emit_line("));");
                }
            }
            TokenKind::If => {
                self.enter("STATEMENT-IF");
                self.advance()?;
                self.emitter.emit("if(");
                self.comparison()?;

                self.match_token(TokenKind::Then)?;
                self.nl()?;
                self.emitter.emit_line("){");
                self.block(TokenKind::Endif)?;
            }
            TokenKind::While => {
                self.enter("STATEMENT-WHILE");
                self.advance()?;
                self.emitter.emit("while(");
                self.comparison()?;

                self.match_token(TokenKind::Repeat)?;
                self.nl()?;
                self.emitter.emit_line("){");
                self.block(TokenKind::Endwhile)?;
            }
            TokenKind::Label => {
                self.enter("STATEMENT-LABEL");
                self.advance()?;
                let line = self.current.line;
                let name = self.ident()?;

                if !self.labels_declared.insert(name.clone()) {
                    return Err(SemanticError::DuplicateLabel { line, name }.into());
                }
                // The null statement keeps the label legal right before `}`.
                let text = format!("{}:;", mangle_name(&name));
                self.emitter.emit_line(&text);
            }
            TokenKind::Goto => {
                self.enter("STATEMENT-GOTO");
                self.advance()?;
                let line = self.current.line;
                let name = self.ident()?;

                let text = format!("goto {};", mangle_name(&name));
                self.labels_gotoed.entry(name).or_insert(line);
                self.emitter.emit_line(&text);
            }
            TokenKind::Let => {
                self.enter("STATEMENT-LET");
                self.advance()?;
                let name = self.ident()?;
                self.declare(&name);

                self.match_token(TokenKind::Eq)?;
                self.emitter.emit(&format!("{} = ", mangle_name(&name)));
                self.expression()?;
                self.emitter.emit_line(";");
            }
            TokenKind::Input => {
                self.enter("STATEMENT-INPUT");
                self.advance()?;
                let name = self.ident()?;
                self.declare(&name);
                let name = mangle_name(&name);

                // A failed read zeroes the variable and drops the bad input.
                self.emitter
                    .emit_line(&format!("if(0 == scanf(\"%f\", &{})) {{", name));
                self.emitter.indent();
                self.emitter.emit_line(&format!("{} = 0;", name));
                self.emitter.emit_line("scanf(\"%*s\");");
                self.emitter.dedent();
                self.emitter.emit_line("}");
            }
            found => {
                return Err(SyntaxError::InvalidStatement {
                    line: self.current.line,
                    lexeme: self.current.lexeme.clone(),
                    found,
                }
                .into());
            }
        }

        self.nl()
    }

    /// Nested statements up to `end`, then the closing brace.
    fn block(&mut self, end: TokenKind) -> CompileResult<()> {
        self.emitter.indent();
        while !self.check(end) && !self.check(TokenKind::Eof) {
            self.statement()?;
        }
        self.match_token(end)?;
        self.emitter.dedent();
        self.emitter.emit_line("}");
        Ok(())
    }

    /// Declare storage the first time a variable is assigned.
    fn declare(&mut self, name: &str) {
        if self.symbols.insert(name.to_string()) {
            self.emitter
                .header_line(&format!("  float {};", mangle_name(name)));
        }
    }

    fn nl(&mut self) -> CompileResult<()> {
        self.enter("NEWLINE");
        self.match_token(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    // === Expressions ===

    fn comparison(&mut self) -> CompileResult<()> {
        self.enter("COMPARISON");
        self.expression()?;

        if !self.current.kind.is_comparison() {
            return Err(SyntaxError::ExpectedComparison {
                line: self.current.line,
                lexeme: self.current.lexeme.clone(),
                found: self.current.kind,
            }
            .into());
        }
        while self.current.kind.is_comparison() {
            self.binary_operator()?;
            self.expression()?;
        }
        Ok(())
    }

    fn expression(&mut self) -> CompileResult<()> {
        self.enter("EXPRESSION");
        self.term()?;
        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.binary_operator()?;
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> CompileResult<()> {
        self.enter("TERM");
        self.unary()?;
        while self.check(TokenKind::Asterisk) || self.check(TokenKind::Slash) {
            let divide = self.check(TokenKind::Slash);
            self.binary_operator()?;
            // Every value is a float, so `7 / 2` must not divide as integers.
            if divide {
                self.emitter.emit("(float)");
            }
            self.unary()?;
        }
        Ok(())
    }

    fn unary(&mut self) -> CompileResult<()> {
        self.enter("UNARY");
        if self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            let sign = self.current.lexeme.clone();
            self.emitter.emit(&sign);
            self.advance()?;
        }
        self.primary()
    }

    fn primary(&mut self) -> CompileResult<()> {
        if self.trace {
            eprintln!("PRIMARY ({})", self.current.lexeme);
        }

        match self.current.kind {
            TokenKind::Number => {
                let number = c_number(&self.current.lexeme);
                self.emitter.emit(&number);
            }
            TokenKind::Ident => {
                if !self.symbols.contains(&self.current.lexeme) {
                    return Err(SemanticError::UndeclaredVariable {
                        line: self.current.line,
                        name: self.current.lexeme.clone(),
                    }
                    .into());
                }
                let name = mangle_name(&self.current.lexeme);
                self.emitter.emit(&name);
            }
            _ => {
                return Err(SyntaxError::UnexpectedToken {
                    line: self.current.line,
                    lexeme: self.current.lexeme.clone(),
                }
                .into());
            }
        }
        self.advance()
    }

    /// Emit the current operator with a space on each side, then consume it.
    fn binary_operator(&mut self) -> CompileResult<()> {
        let text = format!(" {} ", self.current.lexeme);
        self.emitter.emit(&text);
        self.advance()
    }
}

/// Names that would clash with C get a trailing underscore.
fn mangle_name(name: &str) -> String {
    if C_RESERVED.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// Strip leading zeros so C does not read the literal as octal.
fn c_number(lexeme: &str) -> String {
    let (whole, fraction) = match lexeme.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (lexeme, None),
    };
    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    match fraction {
        Some(fraction) => format!("{}.{}", whole, fraction),
        None => whole.to_string(),
    }
}
