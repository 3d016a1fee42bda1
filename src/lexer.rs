//! Character scanner.
//!
//! Produces tokens on demand from the whole source held in memory. Spaces and
//! tabs separate tokens, `#` starts a comment running to the end of the line,
//! and newlines are significant (they terminate statements).

use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    current: char,
    line: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut source: Vec<char> = source.chars().collect();
        if source.last() != Some(&'\n') {
            source.push('\n');
        }
        let current = source.first().copied().unwrap_or('\0');

        Lexer {
            source,
            pos: 0,
            current,
            line: 1,
            finished: false,
        }
    }

    /// Collect every token up to and including `Eof`.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        while self.current == '#' {
            self.skip_comment();
            self.skip_whitespace();
        }

        let line = self.line;
        let token = match self.current {
            '+' => Token::new(TokenKind::Plus, "+", line),
            '-' => Token::new(TokenKind::Minus, "-", line),
            '*' => Token::new(TokenKind::Asterisk, "*", line),
            '/' => Token::new(TokenKind::Slash, "/", line),
            '=' => self.one_or_two('=', TokenKind::Eq, TokenKind::Eqeq),
            '>' => self.one_or_two('>', TokenKind::Gt, TokenKind::Gteq),
            '<' => self.one_or_two('<', TokenKind::Lt, TokenKind::Lteq),
            '!' => {
                if self.peek() != '=' {
                    return Err(LexError::ExpectedNotEq {
                        line,
                        found: self.peek(),
                    });
                }
                self.next_char();
                Token::new(TokenKind::Noteq, "!=", line)
            }
            '"' => self.lex_string()?,
            '\n' => Token::new(TokenKind::Newline, "\n", line),
            _ if self.at_end() => Token::new(TokenKind::Eof, "", line),
            c if c.is_ascii_digit() => self.lex_number()?,
            c if c.is_ascii_alphabetic() => self.lex_word(),
            c => return Err(LexError::UnknownToken { line, ch: c }),
        };

        self.next_char();
        Ok(token)
    }

    // === Character navigation ===

    fn next_char(&mut self) {
        if self.current == '\n' {
            self.line += 1;
        }
        self.pos += 1;
        self.current = self.source.get(self.pos).copied().unwrap_or('\0');
    }

    /// `'\0'` only means end of input once the cursor has left the source.
    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> char {
        self.source.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.source[start..end].iter().collect()
    }

    // === Skipping ===

    fn skip_whitespace(&mut self) {
        while self.current == ' ' || self.current == '\t' || self.current == '\r' {
            self.next_char();
        }
    }

    fn skip_comment(&mut self) {
        while self.current != '\n' && !self.at_end() {
            self.next_char();
        }
    }

    // === Token classes ===
    //
    // Each leaves the cursor on the last character of its token; `next_token`
    // steps past it.

    fn one_or_two(&mut self, first: char, single: TokenKind, double: TokenKind) -> Token {
        let line = self.line;
        if self.peek() == '=' {
            self.next_char();
            Token::new(double, format!("{first}="), line)
        } else {
            Token::new(single, first.to_string(), line)
        }
    }

    fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let line = self.line;

        while self.peek().is_ascii_digit() {
            self.next_char();
        }
        if self.peek() == '.' {
            self.next_char();
            if !self.peek().is_ascii_digit() {
                return Err(LexError::DanglingDecimal { line });
            }
            while self.peek().is_ascii_digit() {
                self.next_char();
            }
        }

        Ok(Token::new(
            TokenKind::Number,
            self.text(start, self.pos + 1),
            line,
        ))
    }

    fn lex_word(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_ascii_alphanumeric() {
            self.next_char();
        }

        let word = self.text(start, self.pos + 1);
        let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Ident);
        Token::new(kind, word, self.line)
    }

    /// String bodies are pasted into a C format string, so anything that
    /// would change its meaning there is rejected.
    fn lex_string(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        self.next_char();
        let start = self.pos;

        while self.current != '"' {
            match self.current {
                '\n' => return Err(LexError::UnterminatedString { line }),
                _ if self.at_end() => return Err(LexError::UnterminatedString { line }),
                '\r' | '\t' | '\\' | '%' | '\0' => {
                    return Err(LexError::IllegalStringCharacter {
                        line,
                        ch: self.current,
                    })
                }
                _ => self.next_char(),
            }
        }

        Ok(Token::new(TokenKind::String, self.text(start, self.pos), line))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    /// Yields tokens through `Eof` (inclusive), or stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.kind != TokenKind::Eof => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}
