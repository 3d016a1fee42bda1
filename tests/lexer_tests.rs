use teeny_c::lexer::Lexer;
use teeny_c::token::{Token, TokenKind};
use teeny_c::LexError;

/// Helper: tokenize source and return token kinds (including Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn tokens(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize().unwrap()
}

fn error(source: &str) -> LexError {
    Lexer::new(source).tokenize().unwrap_err()
}

// ============================================================================
// TRIVIAL INPUTS
// ============================================================================

#[test]
fn test_empty_source_gets_newline() {
    assert_eq!(kinds(""), vec![TokenKind::Newline, TokenKind::Eof]);
}

#[test]
fn test_trailing_newline_not_doubled() {
    assert_eq!(
        kinds("PRINT\n"),
        vec![TokenKind::Print, TokenKind::Newline, TokenKind::Eof]
    );
    assert_eq!(kinds("PRINT"), kinds("PRINT\n"));
}

#[test]
fn test_whitespace_and_comments_skipped() {
    assert_eq!(
        kinds(" \t# comment\n  LET # another\n"),
        vec![
            TokenKind::Newline,
            TokenKind::Let,
            TokenKind::Newline,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_iterator_stops_after_eof() {
    let mut lexer = Lexer::new("1");
    assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Number);
    assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Newline);
    assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Eof);
    assert!(lexer.next().is_none());
}

#[test]
fn test_next_token_repeats_eof() {
    let mut lexer = Lexer::new("");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

// ============================================================================
// NUMBERS, WORDS, STRINGS
// ============================================================================

#[test]
fn test_numbers_keep_exact_spelling() {
    let toks = tokens("7 12.50 0.0");
    let lexemes: Vec<&str> = toks.iter().map(|t| t.lexeme.as_str()).take(3).collect();
    assert_eq!(lexemes, vec!["7", "12.50", "0.0"]);
    assert!(toks.iter().take(3).all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_dangling_decimal() {
    assert_eq!(error("LET a = 3.\n"), LexError::DanglingDecimal { line: 1 });
    assert_eq!(error("3.x"), LexError::DanglingDecimal { line: 1 });
}

#[test]
fn test_number_then_word() {
    let toks = tokens("1abc");
    assert_eq!(toks[0], Token::new(TokenKind::Number, "1", 1));
    assert_eq!(toks[1], Token::new(TokenKind::Ident, "abc", 1));
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("LABEL GOTO PRINT INPUT LET IF THEN ENDIF WHILE REPEAT ENDWHILE"),
        vec![
            TokenKind::Label,
            TokenKind::Goto,
            TokenKind::Print,
            TokenKind::Input,
            TokenKind::Let,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Endif,
            TokenKind::While,
            TokenKind::Repeat,
            TokenKind::Endwhile,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_case_sensitive() {
    let toks = tokens("Print print PRINTX x1y2");
    assert!(toks.iter().take(4).all(|t| t.kind == TokenKind::Ident));
    assert_eq!(toks[2].lexeme, "PRINTX");
    assert_eq!(toks[3].lexeme, "x1y2");
}

#[test]
fn test_string_body_without_quotes() {
    let toks = tokens("PRINT \"Hello, world!\"");
    assert_eq!(toks[1], Token::new(TokenKind::String, "Hello, world!", 1));
}

#[test]
fn test_string_rejects_format_and_control_characters() {
    for (source, ch) in [
        ("\"50%\"", '%'),
        ("\"a\\b\"", '\\'),
        ("\"a\tb\"", '\t'),
        ("\"a\rb\"", '\r'),
    ] {
        assert_eq!(
            error(source),
            LexError::IllegalStringCharacter { line: 1, ch },
            "source {:?}",
            source
        );
    }
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        error("PRINT \"oops\nPRINT 1\n"),
        LexError::UnterminatedString { line: 1 }
    );
}

// ============================================================================
// OPERATORS
// ============================================================================

#[test]
fn test_operators() {
    let toks = tokens("+ - * / = == != < <= > >=");
    let pairs: Vec<(TokenKind, &str)> = toks
        .iter()
        .take(11)
        .map(|t| (t.kind, t.lexeme.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::Plus, "+"),
            (TokenKind::Minus, "-"),
            (TokenKind::Asterisk, "*"),
            (TokenKind::Slash, "/"),
            (TokenKind::Eq, "="),
            (TokenKind::Eqeq, "=="),
            (TokenKind::Noteq, "!="),
            (TokenKind::Lt, "<"),
            (TokenKind::Lteq, "<="),
            (TokenKind::Gt, ">"),
            (TokenKind::Gteq, ">="),
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        kinds("a>=-1"),
        vec![
            TokenKind::Ident,
            TokenKind::Gteq,
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_bang_needs_equals() {
    assert_eq!(error("a ! b"), LexError::ExpectedNotEq { line: 1, found: ' ' });
    assert_eq!(error("!x"), LexError::ExpectedNotEq { line: 1, found: 'x' });
}

#[test]
fn test_unknown_token() {
    assert_eq!(error("LET a = 1\n@"), LexError::UnknownToken { line: 2, ch: '@' });
    assert_eq!(error("(1)"), LexError::UnknownToken { line: 1, ch: '(' });
}

#[test]
fn test_embedded_nul() {
    assert_eq!(error("PRINT 1\n\0PRINT 2\n"), LexError::UnknownToken { line: 2, ch: '\0' });
    assert_eq!(
        error("PRINT \"a\0b\""),
        LexError::IllegalStringCharacter { line: 1, ch: '\0' }
    );
    // A comment runs past a NUL to the end of the line.
    assert_eq!(
        kinds("# a\0b\nLET"),
        vec![TokenKind::Newline, TokenKind::Let, TokenKind::Newline, TokenKind::Eof]
    );
}

// ============================================================================
// LINE TRACKING
// ============================================================================

#[test]
fn test_line_numbers() {
    let toks = tokens("PRINT 1\n\n# note\nLET x = 2\n");
    let let_tok = toks.iter().find(|t| t.kind == TokenKind::Let).unwrap();
    assert_eq!(let_tok.line, 4);
    assert_eq!(toks[0].line, 1);
    // The newline token belongs to the line it ends.
    assert_eq!(toks[2], Token::new(TokenKind::Newline, "\n", 1));
}

#[test]
fn test_display_names() {
    assert_eq!(TokenKind::Ident.to_string(), "IDENT");
    assert_eq!(TokenKind::Noteq.to_string(), "NOTEQ");
    assert_eq!(TokenKind::Eof.to_string(), "EOF");
}
