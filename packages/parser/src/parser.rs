use std::str::CharIndices;

use crate::ast::{Node, Property, Span};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{lex, SpannedToken, Token};

/// Recursive-descent parser for JSONC
///
/// Trailing commas are tolerated in objects and arrays; comments are
/// tolerated anywhere trivia may appear. Emitted spans always reference the
/// original text.
pub struct Parser<'src> {
    tokens: Vec<SpannedToken<'src>>,
    pos: usize,
    end: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for item in lex(source) {
            match item {
                Ok(token) => {
                    if !token.token.is_trivia() {
                        tokens.push(token);
                    }
                }
                Err(err) => return Err(ParseError::invalid_symbol(err.span.start)),
            }
        }
        Ok(Self {
            tokens,
            pos: 0,
            end: source.len(),
        })
    }

    /// Parse a complete document: exactly one value, then end of input
    pub fn parse_document(&mut self) -> ParseResult<Node> {
        let root = self.parse_value()?;
        if !self.is_at_end() {
            return Err(ParseError::end_of_file_expected(self.peek_offset()));
        }
        Ok(root)
    }

    fn parse_value(&mut self) -> ParseResult<Node> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::value_expected(self.end));
        };
        let span = Span::new(token.span.start, token.span.end);

        match token.token {
            Token::LBrace => self.parse_object(),
            Token::LBracket => self.parse_array(),
            Token::String(raw) => {
                self.pos += 1;
                let value = unescape(raw, span.start)?;
                Ok(Node::String { value, span })
            }
            Token::Number(raw) => {
                self.pos += 1;
                let value = raw
                    .parse()
                    .map_err(|_| ParseError::invalid_number_format(span.start))?;
                Ok(Node::Number { value, span })
            }
            Token::True => {
                self.pos += 1;
                Ok(Node::Boolean { value: true, span })
            }
            Token::False => {
                self.pos += 1;
                Ok(Node::Boolean { value: false, span })
            }
            Token::Null => {
                self.pos += 1;
                Ok(Node::Null { span })
            }
            _ => Err(ParseError::value_expected(span.start)),
        }
    }

    fn parse_object(&mut self) -> ParseResult<Node> {
        let start = self.peek_offset();
        self.pos += 1; // past '{'
        let mut properties = Vec::new();

        loop {
            if let Some(end) = self.match_close(&Token::RBrace) {
                return Ok(Node::Object {
                    properties,
                    span: Span::new(start, end),
                });
            }
            let Some(token) = self.peek().cloned() else {
                return Err(ParseError::close_brace_expected(self.end));
            };
            let Token::String(raw) = token.token else {
                return Err(ParseError::property_name_expected(token.span.start));
            };
            self.pos += 1;
            let key = unescape(raw, token.span.start)?;
            let key_span = Span::new(token.span.start, token.span.end);

            if !self.match_token(&Token::Colon) {
                return Err(ParseError::colon_expected(self.peek_offset()));
            }
            let value = self.parse_value()?;
            let span = Span::new(key_span.start, value.span().end);
            properties.push(Property {
                key,
                key_span,
                value,
                span,
            });

            if self.match_token(&Token::Comma) {
                // trailing comma tolerated: the loop re-checks for '}'
                continue;
            }
            if let Some(end) = self.match_close(&Token::RBrace) {
                return Ok(Node::Object {
                    properties,
                    span: Span::new(start, end),
                });
            }
            return Err(ParseError::comma_expected(self.peek_offset()));
        }
    }

    fn parse_array(&mut self) -> ParseResult<Node> {
        let start = self.peek_offset();
        self.pos += 1; // past '['
        let mut items = Vec::new();

        loop {
            if let Some(end) = self.match_close(&Token::RBracket) {
                return Ok(Node::Array {
                    items,
                    span: Span::new(start, end),
                });
            }
            if self.is_at_end() {
                return Err(ParseError::close_bracket_expected(self.end));
            }
            items.push(self.parse_value()?);

            if self.match_token(&Token::Comma) {
                continue;
            }
            if let Some(end) = self.match_close(&Token::RBracket) {
                return Ok(Node::Array {
                    items,
                    span: Span::new(start, end),
                });
            }
            return Err(ParseError::comma_expected(self.peek_offset()));
        }
    }

    fn peek(&self) -> Option<&SpannedToken<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_offset(&self) -> usize {
        self.peek().map(|token| token.span.start).unwrap_or(self.end)
    }

    fn match_token(&mut self, expected: &Token<'src>) -> bool {
        if self.peek().map(|token| &token.token) == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a closing token and return its end offset
    fn match_close(&mut self, expected: &Token<'src>) -> Option<usize> {
        let end = match self.peek() {
            Some(token) if &token.token == expected => token.span.end,
            _ => return None,
        };
        self.pos += 1;
        Some(end)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Parse JSONC text into a lossless syntax tree
pub fn parse(source: &str) -> ParseResult<Node> {
    Parser::new(source)?.parse_document()
}

/// Decode a raw string token (quotes included) per JSON escape rules
fn unescape(raw: &str, offset: usize) -> ParseResult<String> {
    let inner = &raw[1..raw.len() - 1];
    if !inner.contains('\\') {
        return Ok(inner.to_string());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let at = offset + 1 + i;
        let Some((_, escape)) = chars.next() else {
            return Err(ParseError::invalid_escape(at));
        };
        match escape {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let unit = read_code_unit(&mut chars, at)?;
                if (0xD800..=0xDBFF).contains(&unit) {
                    // high surrogate: a low surrogate escape must follow
                    match (chars.next(), chars.next()) {
                        (Some((_, '\\')), Some((_, 'u'))) => {
                            let low = read_code_unit(&mut chars, at)?;
                            if !(0xDC00..=0xDFFF).contains(&low) {
                                return Err(ParseError::invalid_unicode(at));
                            }
                            let combined = 0x10000
                                + ((unit as u32 - 0xD800) << 10)
                                + (low as u32 - 0xDC00);
                            match char::from_u32(combined) {
                                Some(c) => out.push(c),
                                None => return Err(ParseError::invalid_unicode(at)),
                            }
                        }
                        _ => return Err(ParseError::invalid_unicode(at)),
                    }
                } else {
                    match char::from_u32(unit as u32) {
                        Some(c) => out.push(c),
                        None => return Err(ParseError::invalid_unicode(at)),
                    }
                }
            }
            _ => return Err(ParseError::invalid_escape(at)),
        }
    }
    Ok(out)
}

fn read_code_unit(chars: &mut CharIndices<'_>, at: usize) -> ParseResult<u16> {
    let mut unit: u16 = 0;
    for _ in 0..4 {
        let Some((_, c)) = chars.next() else {
            return Err(ParseError::invalid_unicode(at));
        };
        let Some(digit) = c.to_digit(16) else {
            return Err(ParseError::invalid_unicode(at));
        };
        unit = unit * 16 + digit as u16;
    }
    Ok(unit)
}
