//! Lexer for JSONC text using logos
//!
//! Trivia (whitespace and comments) are produced as real tokens rather than
//! skipped, so the token stream covers every byte of the input and each
//! significant token keeps an exact span.

use logos::Logos;

/// Token types for JSONC syntax
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // Keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Literals (kept raw; the parser unescapes strings and parses numbers)
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice())]
    String(&'src str),

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    // Trivia
    #[regex(r"[ \t\r\n]+", |lex| lex.slice())]
    Whitespace(&'src str),

    #[regex(r"//[^\n]*", |lex| lex.slice())]
    LineComment(&'src str),

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/", |lex| lex.slice())]
    BlockComment(&'src str),
}

impl Token<'_> {
    /// Whitespace or comment token carrying no JSON value
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace(_) | Token::LineComment(_) | Token::BlockComment(_)
        )
    }
}

/// Span information for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

/// A token with its span
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone)]
pub struct LexError {
    pub span: TokenSpan,
    pub message: String,
}

/// Lex JSONC text into tokens with spans
pub fn lex(source: &str) -> impl Iterator<Item = Result<SpannedToken<'_>, LexError>> + '_ {
    Token::lexer(source).spanned().map(|(result, span)| match result {
        Ok(token) => Ok(SpannedToken {
            token,
            span: TokenSpan {
                start: span.start,
                end: span.end,
            },
        }),
        Err(_) => Err(LexError {
            span: TokenSpan {
                start: span.start,
                end: span.end,
            },
            message: "Unexpected character".to_string(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_punctuation() {
        let source = "{}[]:,";
        let tokens: Vec<_> = lex(source).filter_map(|r| r.ok()).collect();

        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].token, Token::LBrace);
        assert_eq!(tokens[1].token, Token::RBrace);
        assert_eq!(tokens[2].token, Token::LBracket);
        assert_eq!(tokens[3].token, Token::RBracket);
        assert_eq!(tokens[4].token, Token::Colon);
        assert_eq!(tokens[5].token, Token::Comma);
    }

    #[test]
    fn test_lex_string_keeps_quotes() {
        let source = r#""hello \"world\"""#;
        let tokens: Vec<_> = lex(source).filter_map(|r| r.ok()).collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, Token::String(r#""hello \"world\"""#));
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[0].span.end, source.len());
    }

    #[test]
    fn test_lex_numbers() {
        let source = "0 -12 3.5 1e10 2E-3";
        let tokens: Vec<_> = lex(source)
            .filter_map(|r| r.ok())
            .filter(|t| !t.token.is_trivia())
            .collect();

        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].token, Token::Number("0"));
        assert_eq!(tokens[1].token, Token::Number("-12"));
        assert_eq!(tokens[2].token, Token::Number("3.5"));
        assert_eq!(tokens[3].token, Token::Number("1e10"));
        assert_eq!(tokens[4].token, Token::Number("2E-3"));
    }

    #[test]
    fn test_lex_comments_are_tokens() {
        let source = "// line\n{ /* block */ }";
        let tokens: Vec<_> = lex(source).filter_map(|r| r.ok()).collect();

        assert_eq!(tokens[0].token, Token::LineComment("// line"));
        assert!(tokens.iter().any(|t| t.token == Token::BlockComment("/* block */")));
    }

    #[test]
    fn test_lex_covers_every_byte() {
        let source = "{ \"a\": 1, // c\n  \"b\": [true, null] }";
        let mut expected = 0;
        for token in lex(source) {
            let token = token.unwrap();
            assert_eq!(token.span.start, expected);
            expected = token.span.end;
        }
        assert_eq!(expected, source.len());
    }

    #[test]
    fn test_lex_error_position() {
        let source = "{ a: 1 }";
        let err = lex(source).find_map(|r| r.err()).unwrap();
        assert_eq!(err.span.start, 2);
    }
}
