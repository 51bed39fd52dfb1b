use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// MessageType
// ---------------------------------------------------------------------------

/// Whether a [`Parser`](crate::Parser) is driving request-line or
/// status-line grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageType {
    Request,
    Response,
}

// ---------------------------------------------------------------------------
// Scheme
// ---------------------------------------------------------------------------

/// URI scheme recognized in an absolute-form request target
/// (`scheme://host[:port]/path`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Scheme {
    #[default]
    Unknown,
    Http,
    Https,
    Ftp,
    Nfs,
}

impl Scheme {
    /// Classify a scheme token by its accumulated bytes.
    pub(crate) fn classify(bytes: &[u8]) -> Scheme {
        match bytes.len() {
            3 if bytes.eq_ignore_ascii_case(b"ftp") => Scheme::Ftp,
            3 if bytes.eq_ignore_ascii_case(b"nfs") => Scheme::Nfs,
            4 if bytes.eq_ignore_ascii_case(b"http") => Scheme::Http,
            5 if bytes.eq_ignore_ascii_case(b"https") => Scheme::Https,
            _ => Scheme::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Unknown => "unknown",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ftp => "ftp",
            Scheme::Nfs => "nfs",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

/// One of the fourteen methods the reference parser recognizes by exact
/// byte-length-bucketed comparison, or `Unknown` for anything else.
///
/// Per the reference implementation's documented quirk, an unrecognized
/// method token does **not** force this to `Unknown` on its own — the
/// parser leaves `method` at whatever value it previously held (`Unknown`
/// for the very first message on a fresh parser). See
/// [`Parser::method`](crate::Parser::method).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum HttpMethod {
    #[default]
    Unknown,
    Get,
    Head,
    Post,
    Put,
    Delete,
    Mkcol,
    Copy,
    Move,
    Options,
    Propfind,
    Proppatch,
    Lock,
    Unlock,
    Trace,
}

impl HttpMethod {
    /// Classify a method token, returning `None` when it does not match any
    /// of the fourteen known methods (the caller must then leave the
    /// parser's current `method` field untouched).
    pub(crate) fn classify(bytes: &[u8]) -> Option<HttpMethod> {
        Some(match bytes {
            b"GET" => HttpMethod::Get,
            b"PUT" => HttpMethod::Put,
            b"POST" => HttpMethod::Post,
            b"COPY" => HttpMethod::Copy,
            b"MOVE" => HttpMethod::Move,
            b"LOCK" => HttpMethod::Lock,
            b"HEAD" => HttpMethod::Head,
            b"MKCOL" => HttpMethod::Mkcol,
            b"TRACE" => HttpMethod::Trace,
            b"DELETE" => HttpMethod::Delete,
            b"UNLOCK" => HttpMethod::Unlock,
            b"OPTIONS" => HttpMethod::Options,
            b"PROPFIND" => HttpMethod::Propfind,
            b"PROPPATCH" => HttpMethod::Proppatch,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Unknown => "UNKNOWN",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Mkcol => "MKCOL",
            HttpMethod::Copy => "COPY",
            HttpMethod::Move => "MOVE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Propfind => "PROPFIND",
            HttpMethod::Proppatch => "PROPPATCH",
            HttpMethod::Lock => "LOCK",
            HttpMethod::Unlock => "UNLOCK",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HeaderEval
// ---------------------------------------------------------------------------

/// Which framing-relevant header the parser is currently accumulating a
/// value for. Set once the header name is known (`HdrlineHdrKey` → `:`), and
/// consulted when the value is complete (CR seen in `HdrlineHdrVal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum HeaderEval {
    #[default]
    None,
    Connection,
    ProxyConnection,
    ContentLength,
    TransferEncoding,
    Host,
    ContentType,
}

impl HeaderEval {
    /// Identify a framing header by name, matching case-insensitively.
    /// Mirrors the reference parser's length-bucketed `strcasecmp` dispatch.
    pub(crate) fn classify(name: &[u8]) -> HeaderEval {
        match name.len() {
            4 if name.eq_ignore_ascii_case(b"host") => HeaderEval::Host,
            10 if name.eq_ignore_ascii_case(b"connection") => HeaderEval::Connection,
            12 if name.eq_ignore_ascii_case(b"content-type") => HeaderEval::ContentType,
            14 if name.eq_ignore_ascii_case(b"content-length") => HeaderEval::ContentLength,
            16 if name.eq_ignore_ascii_case(b"proxy-connection") => HeaderEval::ProxyConnection,
            17 if name.eq_ignore_ascii_case(b"transfer-encoding") => HeaderEval::TransferEncoding,
            _ => HeaderEval::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Parser flag bits, mirroring the reference C `parser_flags` bitmask.
/// Implemented by hand rather than pulling in a bitflags-style dependency
/// the rest of the crate does not otherwise need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Flags(u8);

impl Flags {
    pub(crate) const CHUNKED: u8 = 1 << 0;
    pub(crate) const CONNECTION_KEEP_ALIVE: u8 = 1 << 1;
    pub(crate) const CONNECTION_CLOSE: u8 = 1 << 2;
    pub(crate) const TRAILING: u8 = 1 << 3;

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub(crate) fn set(&mut self, bit: u8) {
        self.0 |= bit;
    }

    #[inline]
    pub(crate) fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// A single owned header field, as captured by [`CollectingHooks`](crate::CollectingHooks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Header field name, original casing preserved.
    pub name: String,
    /// Header field value.
    pub value: String,
}

/// Serialize body bytes as a UTF-8 string (lossy) for JSON output.
pub(crate) fn serialize_body<S: Serializer>(
    body: &Option<Vec<u8>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match body {
        None => s.serialize_none(),
        Some(bytes) => s.serialize_str(&String::from_utf8_lossy(bytes)),
    }
}
