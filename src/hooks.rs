use crate::Parser;

/// Caller-supplied callbacks invoked as the parser recognizes structural
/// elements of an HTTP message.
///
/// Every method has a no-op default, so implementors only override the
/// events they care about. Each method returns an `i32`: `0` to continue
/// parsing, nonzero to abort with [`ParseError::User`](crate::ParseError::User).
///
/// Data hooks receive a byte slice borrowed from the parser's internal
/// scratch buffer. The slice is valid only for the duration of the call —
/// copy it if you need to retain the bytes past the hook returning, per
/// the non-buffering contract described in the crate documentation.
#[allow(unused_variables)]
pub trait ParserHooks {
    // ----- event hooks (no payload) -----------------------------------

    /// Fired once the first byte of a new message has been seen.
    fn on_message_begin(&mut self, parser: &Parser) -> i32 {
        0
    }

    /// Fired once the request/status line is complete and header parsing is
    /// about to begin.
    fn on_headers_begin(&mut self, parser: &Parser) -> i32 {
        0
    }

    /// Fired once the terminating CRLF of the header block has been seen.
    fn on_headers_complete(&mut self, parser: &Parser) -> i32 {
        0
    }

    /// Fired when a new chunk's size line has been parsed and its data is
    /// about to begin streaming.
    fn on_new_chunk(&mut self, parser: &Parser) -> i32 {
        0
    }

    /// Fired once a chunk's data and trailing CRLF have both been consumed.
    fn on_chunk_complete(&mut self, parser: &Parser) -> i32 {
        0
    }

    /// Fired once the terminating zero-size chunk has been seen, before
    /// trailer headers (if any) are parsed.
    fn on_chunks_complete(&mut self, parser: &Parser) -> i32 {
        0
    }

    /// Fired once a complete message (including any body/trailers) has been
    /// parsed.
    fn on_message_complete(&mut self, parser: &Parser) -> i32 {
        0
    }

    // ----- data hooks (slice + parser handle) --------------------------

    /// The request method token, e.g. `b"GET"`. Fired even for unrecognized
    /// methods with the literal bytes seen.
    fn on_method(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The URI scheme token, e.g. `b"http"`, for an absolute-form request
    /// target.
    fn on_scheme(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The host token from an absolute-form request target.
    fn on_host(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The port token from an absolute-form request target.
    fn on_port(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The path component of the request target (no query string).
    fn on_path(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The query-string component of the request target, with the leading
    /// `?` stripped.
    fn on_args(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The full, unmodified request target.
    fn on_uri(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// A header field name.
    fn on_header_key(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// A header field value (after folded-line continuations have been
    /// appended).
    fn on_header_value(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// A slice of body bytes. May fire multiple times for a single body;
    /// the sum of all slice lengths equals the total body size.
    fn on_body(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }

    /// The value of the `Host` header (distinct from [`on_host`], which
    /// covers the absolute-form URI's host component).
    fn on_hostname(&mut self, parser: &Parser, data: &[u8]) -> i32 {
        0
    }
}

/// A [`ParserHooks`] implementation that does nothing and never aborts.
/// Useful for exercising the state machine without caring about output, or
/// as a base to wrap with `&mut` adapters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl ParserHooks for NoopHooks {}
