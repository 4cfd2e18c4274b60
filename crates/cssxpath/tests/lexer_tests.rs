//! Integration tests for the pattern table and lexer.

use cssxpath::{Compiler, CompileOptions, Cursor, Lexer, PatternTable, TokenKind};
use strum::IntoEnumIterator;

#[test]
fn test_every_kind_has_a_pattern() {
    let table = PatternTable::new().unwrap();
    for kind in TokenKind::iter() {
        assert!(!kind.pattern().is_empty(), "{kind} has no pattern");
        // Lookup must not panic for any kind.
        let _ = table.match_len(kind, "x");
    }
}

#[test]
fn test_combinator_tokens_absorb_leading_whitespace() {
    let lexer = Lexer::new(PatternTable::shared());
    let (text, rest) = lexer
        .token(TokenKind::ParentOf, Cursor::new("  > li"))
        .unwrap();
    assert_eq!(text, "  >");
    assert_eq!(rest.rest(), " li");
}

#[test]
fn test_attribute_value_with_escaped_quote() {
    let lexer = Lexer::new(PatternTable::shared());
    let (text, rest) = lexer
        .token(TokenKind::AttrValue, Cursor::new(r#""a\"b"]"#))
        .unwrap();
    assert_eq!(text, r#""a\"b""#);
    assert_eq!(rest.rest(), "]");
}

#[test]
fn test_keywords_are_case_insensitive() {
    let lexer = Lexer::new(PatternTable::shared());
    assert!(lexer.peek(TokenKind::Odd, Cursor::new("ODD")));
    assert!(lexer.peek(TokenKind::Even, Cursor::new("Even")));
    assert!(lexer.peek(TokenKind::N, Cursor::new("N")));
}

#[test]
fn test_substitute_table_changes_one_rule() {
    // A dialect where element names may start with a digit.
    let table = PatternTable::new()
        .unwrap()
        .with_pattern(TokenKind::Element, r"[_a-zA-Z0-9][-\w]*")
        .unwrap();
    let compiler = Compiler::with_table(&table, CompileOptions::default());
    assert_eq!(
        compiler.compile("h1 > 3d").unwrap(),
        "descendant-or-self::*/child::*[self::h1]/child::*[self::3d]"
    );

    assert!(cssxpath::compile("h1 > 3d").is_err());
}

#[test]
fn test_invalid_substitute_pattern() {
    let error = PatternTable::new()
        .unwrap()
        .with_pattern(TokenKind::Class, r"\.(")
        .unwrap_err();
    assert_eq!(error.kind, "class");
    assert!(error.to_string().contains("class"));
}

#[test]
fn test_universal_is_its_own_token() {
    let lexer = Lexer::new(PatternTable::shared());
    assert!(lexer.peek(TokenKind::Universal, Cursor::new("*.note")));
    assert!(!lexer.peek(TokenKind::Element, Cursor::new("*.note")));
}

#[test]
fn test_attribute_names_have_no_prefix_or_leading_dash() {
    let lexer = Lexer::new(PatternTable::shared());
    let (name, _) = lexer
        .token(TokenKind::AttrName, Cursor::new("data-x.y]"))
        .unwrap();
    assert_eq!(name, "data-x.y");
    assert!(!lexer.peek(TokenKind::AttrName, Cursor::new("-foo")));
    assert!(!lexer.peek(TokenKind::AttrName, Cursor::new(":x")));
    let (name, _) = lexer
        .token(TokenKind::AttrName, Cursor::new("xlink:href"))
        .unwrap();
    assert_eq!(name, "xlink");
}
