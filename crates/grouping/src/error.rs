use std::fmt;

/// Why a single input line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Token is a lone character, e.g. the `"5` in `"5;6`.
    TooShort { column: usize, token: String },
    /// Token is not enclosed in double quotes.
    Unquoted { column: usize, token: String },
    /// Quoted body is not a number.
    NotNumeric { column: usize, token: String },
    /// Raw line bytes are not UTF-8; `offset` is the first bad byte.
    InvalidUtf8 { offset: usize },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { column, token } => {
                write!(f, "column {column}: malformed token '{token}'")
            }
            Self::Unquoted { column, token } => {
                write!(f, "column {column}: token '{token}' is not quoted")
            }
            Self::NotNumeric { column, token } => {
                write!(f, "column {column}: cannot parse number from '{token}'")
            }
            Self::InvalidUtf8 { offset } => write!(f, "invalid UTF-8 at byte {offset}"),
        }
    }
}

#[derive(Debug)]
pub enum GroupError {
    /// Line could not be parsed. Recoverable: the line is skipped.
    Parse { line: String, reason: ParseFailure },
    /// Record id outside the disjoint-set universe.
    InvalidId { id: usize, len: usize },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad delimiter, bad suffix).
    ConfigValidation(String),
    /// IO error (file read, write, etc.).
    Io(String),
}

impl GroupError {
    /// True for errors that only invalidate the current line.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, reason } => write!(f, "wrong line in input: {line} ({reason})"),
            Self::InvalidId { id, len } => {
                write!(f, "record id {id} out of range (have {len} records)")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for GroupError {}

impl From<std::io::Error> for GroupError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
