// Token kinds and the keyword table.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Newline,
    Number,
    Ident,
    String,
    // Keywords
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    Endif,
    While,
    Repeat,
    Endwhile,
    // Operators
    Eq,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Eqeq,
    Noteq,
    Lt,
    Lteq,
    Gt,
    Gteq,
}

impl TokenKind {
    /// Keyword lookup. Spellings are upper case and matched exactly.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "LABEL" => TokenKind::Label,
            "GOTO" => TokenKind::Goto,
            "PRINT" => TokenKind::Print,
            "INPUT" => TokenKind::Input,
            "LET" => TokenKind::Let,
            "IF" => TokenKind::If,
            "THEN" => TokenKind::Then,
            "ENDIF" => TokenKind::Endif,
            "WHILE" => TokenKind::While,
            "REPEAT" => TokenKind::Repeat,
            "ENDWHILE" => TokenKind::Endwhile,
            _ => return None,
        })
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Eqeq
                | TokenKind::Noteq
                | TokenKind::Gt
                | TokenKind::Gteq
                | TokenKind::Lt
                | TokenKind::Lteq
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Number => "NUMBER",
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Label => "LABEL",
            TokenKind::Goto => "GOTO",
            TokenKind::Print => "PRINT",
            TokenKind::Input => "INPUT",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Endif => "ENDIF",
            TokenKind::While => "WHILE",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Endwhile => "ENDWHILE",
            TokenKind::Eq => "EQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Eqeq => "EQEQ",
            TokenKind::Noteq => "NOTEQ",
            TokenKind::Lt => "LT",
            TokenKind::Lteq => "LTEQ",
            TokenKind::Gt => "GT",
            TokenKind::Gteq => "GTEQ",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token. `lexeme` is the source spelling, without quotes for strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line the token starts on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}
