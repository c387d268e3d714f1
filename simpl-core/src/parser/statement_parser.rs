//! Recursive descent parser
//!
//! Grammar:
//! ```text
//! program        := statement*
//! statement      := print_stmt | assignment | empty_stmt | if_stmt | block
//! empty_stmt     := ';'
//! block          := '{' statement* '}'
//! if_stmt        := 'if' '(' logical_expr ')' statement
//! print_stmt     := 'print' arithm_expr (('==' | '!=') arithm_expr)? ';'
//! assignment     := identifier ':=' arithm_expr ';'
//! logical_expr   := logical_term (('&&' | '||') logical_term)*
//! logical_term   := logical_factor (('==' | '!=') logical_factor)?
//! logical_factor := 'True' | 'False' | '(' logical_expr ')'
//! arithm_expr    := arithm_term (('+' | '-') arithm_term)*
//! arithm_term    := arithm_factor (('*' | '/') arithm_factor)*
//! arithm_factor  := identifier | integer | float | '(' arithm_expr ')'
//! ```
//!
//! The whole program is parsed before anything runs; the first error aborts
//! the parse. Parentheses, blocks and `if` bodies may nest at most
//! [`MAX_NESTING`] levels deep.

use crate::parser::ast::{Expression, Program, Statement};
use crate::parser::error::ParseError;
use crate::parser::lexer::{Lexer, SpannedToken};
use crate::parser::token::{Number, Token, TokenKind};
use std::io::BufRead;
use tracing::debug;

/// Deepest allowed nesting of `(`, `{` and `if`
pub const MAX_NESTING: usize = 256;

/// Parses a token stream into a [`Program`]
pub struct StatementParser<R> {
    lexer: Lexer<R>,
    depth: usize,
}

impl<'a> StatementParser<&'a [u8]> {
    /// Create a new statement parser from input string
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        Self::from_reader(input.as_bytes())
    }
}

impl<R: BufRead> StatementParser<R> {
    /// Create a parser reading its source from `reader`
    pub fn from_reader(reader: R) -> Result<Self, ParseError> {
        Ok(StatementParser {
            lexer: Lexer::new(reader)?,
            depth: 0,
        })
    }

    /// Kind of the token `offset` positions ahead, `None` past end of input
    fn peek_kind(&mut self, offset: usize) -> Result<Option<TokenKind>, ParseError> {
        if !self.lexer.has_next(offset + 1)? {
            return Ok(None);
        }
        Ok(Some(self.lexer.peek(offset)?.kind()))
    }

    /// Check if the next token has the given kind (without consuming)
    fn check(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.peek_kind(0)? == Some(kind))
    }

    /// Consume the next token if it has the given kind
    fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind)? {
            self.lexer.take_one()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn advance(&mut self) -> Result<SpannedToken, ParseError> {
        Ok(self.lexer.take_one()?)
    }

    /// Expect a specific token kind
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind)? {
            return Ok(self.advance()?.token);
        }
        self.fail(kind.describe())
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let name = match self.lexer.has_next(1)? {
            true => match self.lexer.peek(0)? {
                Token::Identifier(name) => Some(name.clone()),
                _ => None,
            },
            false => None,
        };

        match name {
            Some(name) => {
                self.advance()?;
                Ok(name)
            }
            None => self.fail(TokenKind::Identifier.describe()),
        }
    }

    /// Error describing what was expected and what is actually next
    fn fail<T>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        if !self.lexer.has_next(1)? {
            return Err(ParseError::UnexpectedEnd { expected });
        }

        let next = self.lexer.peek_spanned(0)?;
        Err(ParseError::Expected {
            expected,
            found: next.token.clone(),
            span: next.span,
        })
    }

    /// Error for a token that cannot start any statement
    fn unexpected_token<T>(&mut self) -> Result<T, ParseError> {
        if !self.lexer.has_next(1)? {
            return Err(ParseError::UnexpectedEnd {
                expected: "a statement",
            });
        }

        let next = self.lexer.peek_spanned(0)?;
        Err(ParseError::UnexpectedToken {
            token: next.token.clone(),
            span: next.span,
        })
    }

    /// Run `parse` one nesting level deeper, failing at the opening token
    /// once [`MAX_NESTING`] is reached
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            let span = self.lexer.peek_spanned(0)?.span;
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                span,
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse a complete program (sequence of statements)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        while self.lexer.has_next(1)? {
            match self.try_parse_statement()? {
                Some(stmt) => statements.push(stmt),
                None => return self.unexpected_token(),
            }
        }

        debug!(statements = statements.len(), "parsed program");
        Ok(Program::new(statements))
    }

    /// Parse a statement if the lookahead starts one
    fn try_parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        let stmt = match self.peek_kind(0)? {
            Some(TokenKind::Print) => self.parse_print()?,
            Some(TokenKind::Identifier) if self.peek_kind(1)? == Some(TokenKind::Assign) => {
                self.parse_assignment()?
            }
            Some(TokenKind::Semicolon) => {
                self.advance()?;
                Statement::Empty
            }
            Some(TokenKind::If) => self.nested(Self::parse_if)?,
            Some(TokenKind::LeftBrace) => self.nested(Self::parse_block)?,
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    /// Grammar: print_stmt = 'print' arithm_expr (('==' | '!=') arithm_expr)? ';'
    fn parse_print(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Print)?;
        let mut expr = self.parse_arithm_expr()?;

        if self.eat(TokenKind::DoubleEquals)? {
            expr = Expression::eq(expr, self.parse_arithm_expr()?);
        } else if self.eat(TokenKind::NotEquals)? {
            expr = Expression::not_eq(expr, self.parse_arithm_expr()?);
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Print(expr))
    }

    /// Grammar: assignment = identifier ':=' arithm_expr ';'
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_arithm_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Statement::Assign { name, value })
    }

    /// Grammar: if_stmt = 'if' '(' logical_expr ')' statement
    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LeftParen)?;
        let condition = self.parse_logical_expr()?;
        self.expect(TokenKind::RightParen)?;

        let body = match self.try_parse_statement()? {
            Some(stmt) => stmt,
            None => return self.unexpected_token(),
        };

        Ok(Statement::If {
            condition,
            body: Box::new(body),
        })
    }

    /// Grammar: block = '{' statement* '}'
    fn parse_block(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while let Some(stmt) = self.try_parse_statement()? {
            statements.push(stmt);
        }

        self.expect(TokenKind::RightBrace)?;
        Ok(Statement::Block(statements))
    }

    /// Grammar: logical_expr = logical_term (('&&' | '||') logical_term)*
    fn parse_logical_expr(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_logical_term()?;

        loop {
            if self.eat(TokenKind::And)? {
                left = Expression::and(left, self.parse_logical_term()?);
            } else if self.eat(TokenKind::Or)? {
                left = Expression::or(left, self.parse_logical_term()?);
            } else {
                return Ok(left);
            }
        }
    }

    /// Grammar: logical_term = logical_factor (('==' | '!=') logical_factor)?
    ///
    /// Comparisons do not chain: `True == True == True` is a syntax error.
    fn parse_logical_term(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_logical_factor()?;

        if self.eat(TokenKind::DoubleEquals)? {
            Ok(Expression::eq(left, self.parse_logical_factor()?))
        } else if self.eat(TokenKind::NotEquals)? {
            Ok(Expression::not_eq(left, self.parse_logical_factor()?))
        } else {
            Ok(left)
        }
    }

    /// Grammar: logical_factor = 'True' | 'False' | '(' logical_expr ')'
    fn parse_logical_factor(&mut self) -> Result<Expression, ParseError> {
        match self.peek_kind(0)? {
            Some(TokenKind::True) => {
                self.advance()?;
                Ok(Expression::BoolLiteral(true))
            }
            Some(TokenKind::False) => {
                self.advance()?;
                Ok(Expression::BoolLiteral(false))
            }
            Some(TokenKind::LeftParen) => self.nested(|parser| {
                parser.advance()?;
                let expr = parser.parse_logical_expr()?;
                parser.expect(TokenKind::RightParen)?;
                Ok(expr)
            }),
            _ => self.fail("'True', 'False' or '('"),
        }
    }

    /// Grammar: arithm_expr = arithm_term (('+' | '-') arithm_term)*
    fn parse_arithm_expr(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_arithm_term()?;

        loop {
            if self.eat(TokenKind::Plus)? {
                left = Expression::add(left, self.parse_arithm_term()?);
            } else if self.eat(TokenKind::Minus)? {
                left = Expression::sub(left, self.parse_arithm_term()?);
            } else {
                return Ok(left);
            }
        }
    }

    /// Grammar: arithm_term = arithm_factor (('*' | '/') arithm_factor)*
    fn parse_arithm_term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_arithm_factor()?;

        loop {
            if self.eat(TokenKind::Star)? {
                left = Expression::mul(left, self.parse_arithm_factor()?);
            } else if self.eat(TokenKind::Slash)? {
                left = Expression::div(left, self.parse_arithm_factor()?);
            } else {
                return Ok(left);
            }
        }
    }

    /// Grammar: arithm_factor = identifier | integer | float | '(' arithm_expr ')'
    fn parse_arithm_factor(&mut self) -> Result<Expression, ParseError> {
        match self.peek_kind(0)? {
            Some(TokenKind::Identifier) => Ok(Expression::Var(self.expect_identifier()?)),
            Some(TokenKind::Integer | TokenKind::Float) => self.parse_number(),
            Some(TokenKind::LeftParen) => self.nested(|parser| {
                parser.advance()?;
                let expr = parser.parse_arithm_expr()?;
                parser.expect(TokenKind::RightParen)?;
                Ok(expr)
            }),
            _ => self.fail("an identifier, a number or '('"),
        }
    }

    /// Convert a numeric literal token into a literal node
    fn parse_number(&mut self) -> Result<Expression, ParseError> {
        let SpannedToken { token, span } = self.advance()?;

        match token {
            Token::Number(Number::Integer(text)) => text
                .parse::<i64>()
                .map(Expression::IntLiteral)
                .map_err(|_| ParseError::InvalidNumber { text, span }),
            Token::Number(Number::Float(text)) => text
                .parse::<f64>()
                .map(Expression::FloatLiteral)
                .map_err(|_| ParseError::InvalidNumber { text, span }),
            found => Err(ParseError::Expected {
                expected: "a number",
                found,
                span,
            }),
        }
    }
}

/// Parse a complete program from a string
pub fn parse_statements(input: &str) -> Result<Program, ParseError> {
    StatementParser::new(input)?.parse_program()
}

/// Parse a complete program from any buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Program, ParseError> {
    StatementParser::from_reader(reader)?.parse_program()
}
