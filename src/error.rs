use std::fmt;

/// Errors that can occur during HTTP message parsing.
///
/// Ordinals are stable and match the ordering used by the reference C
/// parser's `http_parse_error_e`, so they can be logged or compared across
/// language boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ParseError {
    /// No error. The parser's resting state; never returned from `run`.
    #[default]
    None = 0,
    /// The scratch buffer would have to exceed its fixed capacity, or a
    /// `Content-Length` value has more than 20 digits / overflows `u64`.
    TooBig = 1,
    /// The request method token is not uppercase-letters-or-underscore.
    InvalidMethod = 2,
    /// The request or status line is malformed.
    InvalidRequestLine = 3,
    /// The URI scheme is malformed.
    InvalidSchema = 4,
    /// The `HTTP/` literal is malformed.
    InvalidProtocol = 5,
    /// The version digits are malformed.
    InvalidVersion = 6,
    /// A header line is malformed.
    InvalidHeader = 7,
    /// A chunk-size line is not valid hexadecimal.
    InvalidChunkSize = 8,
    /// A chunk's trailing CRLF is malformed.
    InvalidChunk = 9,
    /// The parser reached an internal state it does not recognize.
    InvalidState = 10,
    /// A hook returned nonzero, aborting the parse.
    User = 11,
    /// An error not covered by the kinds above (e.g. a malformed status line).
    Generic = 12,
}

impl ParseError {
    /// A short, stable, lowercase identifier for the error kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "http_parse_error_none",
            Self::TooBig => "http_parse_error_too_big",
            Self::InvalidMethod => "http_parse_error_invalid_method",
            Self::InvalidRequestLine => "http_parse_error_invalid_requestline",
            Self::InvalidSchema => "http_parse_error_invalid_schema",
            Self::InvalidProtocol => "http_parse_error_invalid_protocol",
            Self::InvalidVersion => "http_parse_error_invalid_version",
            Self::InvalidHeader => "http_parse_error_invalid_header",
            Self::InvalidChunkSize => "http_parse_error_invalid_chunk_size",
            Self::InvalidChunk => "http_parse_error_invalid_chunk",
            Self::InvalidState => "http_parse_error_invalid_state",
            Self::User => "http_parse_error_user",
            Self::Generic => "http_parse_error_generic",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ParseError {}
