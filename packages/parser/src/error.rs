use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse diagnostics, one variant per diagnostic code
///
/// Every variant carries the byte offset of the offending token so callers
/// can point at the exact location in the original text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid symbol at offset {pos}")]
    InvalidSymbol { pos: usize },

    #[error("Invalid number format at offset {pos}")]
    InvalidNumberFormat { pos: usize },

    #[error("Property name expected at offset {pos}")]
    PropertyNameExpected { pos: usize },

    #[error("Value expected at offset {pos}")]
    ValueExpected { pos: usize },

    #[error("Colon expected at offset {pos}")]
    ColonExpected { pos: usize },

    #[error("Comma expected at offset {pos}")]
    CommaExpected { pos: usize },

    #[error("Closing brace expected at offset {pos}")]
    CloseBraceExpected { pos: usize },

    #[error("Closing bracket expected at offset {pos}")]
    CloseBracketExpected { pos: usize },

    #[error("End of file expected at offset {pos}")]
    EndOfFileExpected { pos: usize },

    #[error("Invalid escape character at offset {pos}")]
    InvalidEscapeCharacter { pos: usize },

    #[error("Invalid unicode sequence at offset {pos}")]
    InvalidUnicode { pos: usize },
}

impl ParseError {
    pub fn invalid_symbol(pos: usize) -> Self {
        Self::InvalidSymbol { pos }
    }

    pub fn invalid_number_format(pos: usize) -> Self {
        Self::InvalidNumberFormat { pos }
    }

    pub fn property_name_expected(pos: usize) -> Self {
        Self::PropertyNameExpected { pos }
    }

    pub fn value_expected(pos: usize) -> Self {
        Self::ValueExpected { pos }
    }

    pub fn colon_expected(pos: usize) -> Self {
        Self::ColonExpected { pos }
    }

    pub fn comma_expected(pos: usize) -> Self {
        Self::CommaExpected { pos }
    }

    pub fn close_brace_expected(pos: usize) -> Self {
        Self::CloseBraceExpected { pos }
    }

    pub fn close_bracket_expected(pos: usize) -> Self {
        Self::CloseBracketExpected { pos }
    }

    pub fn end_of_file_expected(pos: usize) -> Self {
        Self::EndOfFileExpected { pos }
    }

    pub fn invalid_escape(pos: usize) -> Self {
        Self::InvalidEscapeCharacter { pos }
    }

    pub fn invalid_unicode(pos: usize) -> Self {
        Self::InvalidUnicode { pos }
    }

    /// Diagnostic code name, stable across message wording changes
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSymbol { .. } => "InvalidSymbol",
            Self::InvalidNumberFormat { .. } => "InvalidNumberFormat",
            Self::PropertyNameExpected { .. } => "PropertyNameExpected",
            Self::ValueExpected { .. } => "ValueExpected",
            Self::ColonExpected { .. } => "ColonExpected",
            Self::CommaExpected { .. } => "CommaExpected",
            Self::CloseBraceExpected { .. } => "CloseBraceExpected",
            Self::CloseBracketExpected { .. } => "CloseBracketExpected",
            Self::EndOfFileExpected { .. } => "EndOfFileExpected",
            Self::InvalidEscapeCharacter { .. } => "InvalidEscapeCharacter",
            Self::InvalidUnicode { .. } => "InvalidUnicode",
        }
    }

    /// Byte offset of the offending token
    pub fn offset(&self) -> usize {
        match self {
            Self::InvalidSymbol { pos }
            | Self::InvalidNumberFormat { pos }
            | Self::PropertyNameExpected { pos }
            | Self::ValueExpected { pos }
            | Self::ColonExpected { pos }
            | Self::CommaExpected { pos }
            | Self::CloseBraceExpected { pos }
            | Self::CloseBracketExpected { pos }
            | Self::EndOfFileExpected { pos }
            | Self::InvalidEscapeCharacter { pos }
            | Self::InvalidUnicode { pos } => *pos,
        }
    }
}
