//! Pull-based lexer
//!
//! The lexer reads its source one line at a time and keeps two buffers: the
//! unconsumed rest of the current line and a queue of tokens that have been
//! scanned but not yet taken. Lines are only read when the line buffer is
//! empty, and tokens are only scanned when a caller asks for more lookahead
//! than the queue holds.

use crate::parser::error::LexError;
use crate::parser::token::{self, Number, Token};
use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;
use tracing::trace;

/// Position of a token in the source (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token together with where it starts in the source
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Tokenizes a line-oriented source into a lazily filled token queue
pub struct Lexer<R> {
    /// `None` once the source has reported end of input
    source: Option<R>,
    line: String,
    /// Byte offset of the first unconsumed character of `line`
    cursor: usize,
    line_number: usize,
    pending: VecDeque<SpannedToken>,
}

impl<R: BufRead> Lexer<R> {
    /// Create a lexer over `source`, validating the token tables on first use
    pub fn new(source: R) -> Result<Self, LexError> {
        token::check_tables()?;

        Ok(Lexer {
            source: Some(source),
            line: String::new(),
            cursor: 0,
            line_number: 0,
            pending: VecDeque::new(),
        })
    }

    /// Whether at least `n` more tokens are available, scanning as needed
    pub fn has_next(&mut self, n: usize) -> Result<bool, LexError> {
        self.fill(n)
    }

    /// Look at the token `offset` positions ahead without consuming it
    pub fn peek(&mut self, offset: usize) -> Result<&Token, LexError> {
        Ok(&self.peek_spanned(offset)?.token)
    }

    /// Like [`Lexer::peek`], including the token's position
    pub fn peek_spanned(&mut self, offset: usize) -> Result<&SpannedToken, LexError> {
        if !self.fill(offset + 1)? {
            return Err(LexError::NotEnoughTokens {
                requested: offset + 1,
                available: self.pending.len(),
            });
        }
        Ok(&self.pending[offset])
    }

    /// Consume and return the next `n` tokens
    pub fn take(&mut self, n: usize) -> Result<Vec<Token>, LexError> {
        if !self.fill(n)? {
            return Err(LexError::NotEnoughTokens {
                requested: n,
                available: self.pending.len(),
            });
        }
        Ok(self.pending.drain(..n).map(|st| st.token).collect())
    }

    /// Consume the next token, failing at end of input
    pub fn take_one(&mut self) -> Result<SpannedToken, LexError> {
        self.fill(1)?;
        self.pending.pop_front().ok_or(LexError::NotEnoughTokens {
            requested: 1,
            available: 0,
        })
    }

    /// Consume the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<SpannedToken>, LexError> {
        self.fill(1)?;
        Ok(self.pending.pop_front())
    }

    /// Tokenize the rest of the input into a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(spanned) = self.next_token()? {
            tokens.push(spanned.token);
        }
        Ok(tokens)
    }

    /// Scan until `n` tokens are queued; `false` if the source ran out first
    fn fill(&mut self, n: usize) -> Result<bool, LexError> {
        while self.pending.len() < n {
            match self.scan_token()? {
                Some(token) => self.pending.push_back(token),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn rest(&self) -> &str {
        &self.line[self.cursor..]
    }

    fn span(&self) -> Span {
        Span::new(self.line_number, self.line[..self.cursor].chars().count() + 1)
    }

    /// Make sure the line buffer is non-empty, reading a new line if needed
    fn refill_line(&mut self) -> Result<bool, LexError> {
        if self.cursor < self.line.len() {
            return Ok(true);
        }

        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };

        self.line.clear();
        self.cursor = 0;
        if source.read_line(&mut self.line)? == 0 {
            trace!(lines = self.line_number, "end of source");
            self.source = None;
            return Ok(false);
        }

        self.line_number += 1;
        trace!(line = self.line_number, "refilled line buffer");
        Ok(true)
    }

    /// Skip whitespace, possibly across lines; `false` at end of input
    fn skip_whitespace(&mut self) -> Result<bool, LexError> {
        loop {
            if !self.refill_line()? {
                return Ok(false);
            }

            let rest = self.rest();
            let skipped = rest.len() - rest.trim_start().len();
            self.cursor += skipped;

            if self.cursor < self.line.len() {
                return Ok(true);
            }
        }
    }

    /// Produce the next token from the line buffer
    fn scan_token(&mut self) -> Result<Option<SpannedToken>, LexError> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }

        let span = self.span();

        if let Some(token) = self.scan_operator() {
            return Ok(Some(SpannedToken { token, span }));
        }

        if let Some(token) = self.scan_word() {
            return Ok(Some(SpannedToken { token, span }));
        }

        if let Some(token) = self.scan_number(span)? {
            return Ok(Some(SpannedToken { token, span }));
        }

        match self.rest().chars().next() {
            Some(ch) => Err(LexError::UnexpectedCharacter { ch, span }),
            None => Ok(None),
        }
    }

    fn scan_operator(&mut self) -> Option<Token> {
        let (text, token) = token::match_operator(self.rest())?;
        self.cursor += text.len();
        Some(token.clone())
    }

    /// Identifier or keyword
    fn scan_word(&mut self) -> Option<Token> {
        let rest = self.rest();
        if !rest.chars().next().is_some_and(token::is_identifier_start) {
            return None;
        }

        let len = rest
            .char_indices()
            .find(|&(_, ch)| !token::is_word_char(ch))
            .map_or(rest.len(), |(idx, _)| idx);
        let word = &rest[..len];

        let token = match token::keyword(word) {
            Some(keyword) => keyword.clone(),
            None => Token::Identifier(word.to_string()),
        };
        self.cursor += len;
        Some(token)
    }

    /// Integer or float literal
    ///
    /// Grammar: `digits ('.' digits?)? exponent?` or `'.' digits exponent?`,
    /// where `exponent = [eE] [+-]? digits` and any fraction or exponent
    /// makes the literal a float.
    fn scan_number(&mut self, span: Span) -> Result<Option<Token>, LexError> {
        let bytes = self.rest().as_bytes();
        let digits_from =
            |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

        let mut end;
        let mut is_float = false;

        match bytes.first() {
            Some(b) if b.is_ascii_digit() => {
                end = digits_from(0);
                if bytes.get(end) == Some(&b'.') {
                    is_float = true;
                    end += 1;
                    end += digits_from(end);
                }
            }
            Some(b'.') if bytes.get(1).is_some_and(u8::is_ascii_digit) => {
                is_float = true;
                end = 1 + digits_from(1);
            }
            _ => return Ok(None),
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }

            let digits = digits_from(exponent);
            if digits == 0 {
                return Err(LexError::MalformedExponent {
                    literal: self.rest()[..exponent].to_string(),
                    span,
                });
            }

            is_float = true;
            end = exponent + digits;
        }

        let text = self.rest()[..end].to_string();
        self.cursor += end;

        let number = if is_float {
            Number::Float(text)
        } else {
            Number::Integer(text)
        };
        Ok(Some(Token::Number(number)))
    }
}
