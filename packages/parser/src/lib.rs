pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::{Node, NodeKind, Property, Segment, Span};
pub use error::{ParseError, ParseResult};
pub use lexer::{lex, Token};
pub use parser::{parse, Parser};
pub use serializer::{serialize, FormattingOptions, Serializer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let source = r#"{ "a": 1 }"#;
        let tokens: Vec<_> = lex(source).filter_map(|r| r.ok()).collect();
        assert_eq!(tokens.len(), 8);
    }
}
