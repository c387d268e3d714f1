//! Token model for the simpl language
//!
//! The set of tokens is closed: fixed operators and punctuation, four
//! keywords, identifiers and numeric literals. Numeric literals keep their
//! source text; conversion to machine numbers happens when the AST is built.

use crate::parser::error::TableError;
use std::fmt;
use std::sync::OnceLock;

/// Numeric literal as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Number {
    Integer(String), // 3, 042
    Float(String),   // 3.14, 3., .5, 3e2, 3.0e-2
}

impl Number {
    /// Original source text of the literal
    pub fn text(&self) -> &str {
        match self {
            Number::Integer(text) | Number::Float(text) => text,
        }
    }
}

/// Represents the different tokens of the simpl language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Arithmetic operators
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    Assign, // :=

    // Punctuation
    Semicolon,  // ;
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }

    // Logical operators
    And,          // &&
    Or,           // ||
    DoubleEquals, // ==
    NotEquals,    // !=

    // Keywords
    If,
    Print,
    True,
    False,

    // Literal-bearing tokens
    Identifier(String),
    Number(Number),
}

/// Payload-free discriminant of a [`Token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    And,
    Or,
    DoubleEquals,
    NotEquals,
    If,
    Print,
    True,
    False,
    Identifier,
    Integer,
    Float,
}

impl Token {
    /// The kind of this token, without its payload
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Assign => TokenKind::Assign,
            Token::Semicolon => TokenKind::Semicolon,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::And => TokenKind::And,
            Token::Or => TokenKind::Or,
            Token::DoubleEquals => TokenKind::DoubleEquals,
            Token::NotEquals => TokenKind::NotEquals,
            Token::If => TokenKind::If,
            Token::Print => TokenKind::Print,
            Token::True => TokenKind::True,
            Token::False => TokenKind::False,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Number(Number::Integer(_)) => TokenKind::Integer,
            Token::Number(Number::Float(_)) => TokenKind::Float,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(number) => write!(f, "{}", number.text()),
            fixed => match fixed_text(fixed.kind()) {
                Some(text) => write!(f, "{}", text),
                None => write!(f, "{:?}", fixed),
            },
        }
    }
}

impl TokenKind {
    /// Name printed by the tokenizer entry point
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::Assign => "Assign",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::DoubleEquals => "DoubleEquals",
            TokenKind::NotEquals => "NotEquals",
            TokenKind::If => "If",
            TokenKind::Print => "Print",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Identifier => "Identifier",
            TokenKind::Integer => "Integer",
            TokenKind::Float => "Float",
        }
    }

    /// Human-readable form used in parse errors
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Assign => "':='",
            TokenKind::Semicolon => "';'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::DoubleEquals => "'=='",
            TokenKind::NotEquals => "'!='",
            TokenKind::If => "'if'",
            TokenKind::Print => "'print'",
            TokenKind::True => "'True'",
            TokenKind::False => "'False'",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer literal",
            TokenKind::Float => "float literal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operators and punctuation, matched longest-first by the lexer
pub static OPERATORS: &[(&str, Token)] = &[
    ("+", Token::Plus),
    ("-", Token::Minus),
    ("*", Token::Star),
    ("/", Token::Slash),
    (":=", Token::Assign),
    (";", Token::Semicolon),
    ("(", Token::LeftParen),
    (")", Token::RightParen),
    ("{", Token::LeftBrace),
    ("}", Token::RightBrace),
    ("&&", Token::And),
    ("||", Token::Or),
    ("==", Token::DoubleEquals),
    ("!=", Token::NotEquals),
];

/// Reserved words; each must itself be a valid identifier
pub static KEYWORDS: &[(&str, Token)] = &[
    ("if", Token::If),
    ("print", Token::Print),
    ("True", Token::True),
    ("False", Token::False),
];

fn fixed_text(kind: TokenKind) -> Option<&'static str> {
    OPERATORS
        .iter()
        .chain(KEYWORDS.iter())
        .find(|(_, token)| token.kind() == kind)
        .map(|(text, _)| *text)
}

/// Word characters: letters, digits and underscore (Unicode-aware)
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A word character that is not numeric in any script
///
/// Numeric characters outside ASCII (`٣`, `Ⅻ`) therefore start neither an
/// identifier nor a number.
pub fn is_identifier_start(ch: char) -> bool {
    is_word_char(ch) && !ch.is_numeric()
}

/// Whether the whole of `text` follows the identifier rule
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_word_char),
        _ => false,
    }
}

/// Longest operator or punctuation that prefixes `input`
pub fn match_operator(input: &str) -> Option<(&'static str, &'static Token)> {
    OPERATORS
        .iter()
        .filter(|(text, _)| input.starts_with(text))
        .max_by_key(|(text, _)| text.len())
        .map(|(text, token)| (*text, token))
}

/// Keyword token for `word`, if it is reserved
pub fn keyword(word: &str) -> Option<&'static Token> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, token)| token)
}

/// Check the fixed tables against the identifier rule
pub fn validate_tables(
    operators: &[(&'static str, Token)],
    keywords: &[(&'static str, Token)],
) -> Result<(), TableError> {
    for (text, _) in keywords {
        if !is_identifier(text) {
            return Err(TableError::KeywordNotIdentifier(*text));
        }
    }

    for (text, _) in operators {
        if text.chars().next().is_some_and(is_identifier_start) {
            return Err(TableError::OperatorIsIdentifier(*text));
        }
    }

    Ok(())
}

/// Validates the built-in tables once per process
pub fn check_tables() -> Result<(), TableError> {
    static CHECKED: OnceLock<Result<(), TableError>> = OnceLock::new();
    *CHECKED.get_or_init(|| validate_tables(OPERATORS, KEYWORDS))
}
