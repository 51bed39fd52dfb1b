use crate::classify::{hex_value, is_uri_allowed};
use crate::error::ParseError;
use crate::hooks::ParserHooks;
use crate::types::{Flags, HeaderEval, HttpMethod, MessageType, Scheme};

/// Capacity of the parser's inline scratch buffer. Exceeding it aborts the
/// parse with [`ParseError::TooBig`]. Chosen to match the reference C
/// parser's stack-allocated token buffer.
pub const SCRATCH_CAPACITY: usize = 8192;

const CR: u8 = 0x0d;
const LF: u8 = 0x0a;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,

    // ---- request line ----
    Method,
    SpacesBeforeUri,
    Schema,
    SchemaSlash,
    SchemaSlashSlash,
    Host,
    Port,
    AfterSlashInUri,
    CheckUri,
    Uri,

    // ---- version ----
    Http09,
    HttpH,
    HttpHt,
    HttpHtt,
    HttpHttp,
    FirstMajorDigit,
    MajorDigit,
    FirstMinorDigit,
    MinorDigit,
    SpacesAfterDigit,

    // ---- response status line ----
    Status,
    SpaceAfterStatus,
    StatusText,

    // ---- request/status line termination ----
    AlmostDone,
    Done,

    // ---- headers ----
    HdrlineStart,
    HdrlineHdrKey,
    HdrlineHdrSpaceBeforeVal,
    HdrlineHdrVal,
    HdrlineHdrAlmostDone,
    HdrlineHdrDone,
    HdrlineBlankAlmostDone,
    HdrlineAlmostDone,

    // ---- identity body ----
    BodyRead,

    // ---- chunked body ----
    ChunkSizeStart,
    ChunkSize,
    ChunkSizeAlmostDone,
    ChunkData,
    ChunkDataAlmostDone,
    ChunkDataDone,
}

/// An incremental, non-buffering HTTP/1.x message parser.
///
/// The parser never allocates on behalf of the caller: all intermediate
/// tokens (method, URI components, header names/values) are accumulated in
/// a fixed-capacity inline scratch buffer and handed to [`ParserHooks`] as
/// borrowed slices. It can be fed a whole message in one [`Parser::run`]
/// call or one byte at a time with identical externally observable
/// behavior.
pub struct Parser {
    message_type: MessageType,
    state: State,
    flags: Flags,
    heval: HeaderEval,

    scheme: Scheme,
    method: HttpMethod,
    major: u8,
    minor: u8,
    status: u16,
    status_count: u8,

    content_len: u64,
    bytes_read: u64,
    total_bytes_read: u64,
    multipart: bool,

    scratch: [u8; SCRATCH_CAPACITY],
    scratch_idx: usize,

    scheme_offset: Option<usize>,
    host_offset: Option<usize>,
    port_offset: Option<usize>,
    path_offset: Option<usize>,
    args_offset: Option<usize>,

    userdata: Option<Box<dyn std::any::Any>>,
    error: ParseError,
}

impl Parser {
    /// Construct a new parser for parsing requests or responses.
    pub fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            state: State::Start,
            flags: Flags::default(),
            heval: HeaderEval::None,
            scheme: Scheme::Unknown,
            method: HttpMethod::Unknown,
            major: 0,
            minor: 0,
            status: 0,
            status_count: 0,
            content_len: 0,
            bytes_read: 0,
            total_bytes_read: 0,
            multipart: false,
            scratch: [0u8; SCRATCH_CAPACITY],
            scratch_idx: 0,
            scheme_offset: None,
            host_offset: None,
            port_offset: None,
            path_offset: None,
            args_offset: None,
            userdata: None,
            error: ParseError::None,
        }
    }

    // ----- inspector accessors ---------------------------------------

    pub fn error(&self) -> ParseError {
        self.error
    }

    pub fn error_string(&self) -> &'static str {
        self.error.as_str()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn method_string(&self) -> &'static str {
        self.method.as_str()
    }

    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    pub fn multipart(&self) -> bool {
        self.multipart
    }

    pub fn content_length(&self) -> u64 {
        self.content_len
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn total_bytes_read(&self) -> u64 {
        self.total_bytes_read
    }

    pub fn userdata(&self) -> Option<&dyn std::any::Any> {
        self.userdata.as_deref()
    }

    pub fn set_userdata(&mut self, value: Box<dyn std::any::Any>) {
        self.userdata = Some(value);
    }

    /// Whether the connection should be kept alive after this message.
    /// HTTP/1.1+ defaults to keep-alive unless `Connection: close` was
    /// seen; HTTP/1.0 and earlier default to close unless
    /// `Connection: keep-alive` was seen.
    pub fn should_keep_alive(&self) -> bool {
        if self.major > 0 && self.minor > 0 {
            !self.flags.has(Flags::CONNECTION_CLOSE)
        } else {
            self.flags.has(Flags::CONNECTION_KEEP_ALIVE)
        }
    }

    // ----- scratch helpers --------------------------------------------

    #[inline]
    fn push_scratch(&mut self, byte: u8) {
        self.scratch[self.scratch_idx] = byte;
        self.scratch_idx += 1;
    }

    #[inline]
    fn scratch_range(&self, start: usize, end: usize) -> &[u8] {
        &self.scratch[start..end]
    }

    fn uri_token_is_args(&self) -> bool {
        self.args_offset.is_some()
    }

    fn reset_message_state(&mut self) {
        self.state = State::Start;
        self.flags.clear();
        self.heval = HeaderEval::None;
        self.scheme = Scheme::Unknown;
        self.major = 0;
        self.minor = 0;
        self.status = 0;
        self.status_count = 0;
        self.content_len = 0;
        self.multipart = false;
        self.scratch_idx = 0;
        self.scheme_offset = None;
        self.host_offset = None;
        self.port_offset = None;
        self.path_offset = None;
        self.args_offset = None;
        // `method` and `total_bytes_read` intentionally survive a message
        // boundary: method per the "unknown method preserves prior value"
        // quirk, total_bytes_read because it is a lifetime counter.
    }

    #[inline]
    fn check_hook(&mut self, hook_result: i32, consumed_on_error: usize) -> Result<(), usize> {
        if hook_result != 0 {
            self.error = ParseError::User;
            Err(consumed_on_error)
        } else {
            Ok(())
        }
    }

    /// Drive the state machine over `data`, invoking `hooks` for every
    /// structural element recognized. Returns the number of bytes
    /// consumed: `data.len()` if more input is needed, or one past the
    /// offending byte on error.
    pub fn run<H: ParserHooks>(&mut self, hooks: &mut H, data: &[u8]) -> usize {
        self.bytes_read = 0;
        self.error = ParseError::None;

        let mut i = 0usize;

        while i < data.len() {
            // ----- bulk-copy paths for streaming body states -----
            match self.state {
                State::BodyRead => {
                    let available = data.len() - i;
                    let to_read = available.min(self.content_len as usize);

                    if to_read > 0 {
                        let r = hooks.on_body(self, &data[i..i + to_read]);
                        if let Err(c) = self.check_hook(r, i + to_read) {
                            return c;
                        }
                        self.content_len -= to_read as u64;
                        self.bytes_read += to_read as u64;
                        self.total_bytes_read += to_read as u64;
                        i += to_read;
                    }

                    if self.content_len == 0 {
                        let r = hooks.on_message_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.reset_message_state();
                    }
                    continue;
                }
                State::ChunkData => {
                    let available = data.len() - i;
                    let to_read = available.min(self.content_len as usize);

                    if to_read > 0 {
                        let r = hooks.on_body(self, &data[i..i + to_read]);
                        if let Err(c) = self.check_hook(r, i + to_read) {
                            return c;
                        }
                        self.content_len -= to_read as u64;
                        self.bytes_read += to_read as u64;
                        self.total_bytes_read += to_read as u64;
                        i += to_read;

                        if self.content_len == 0 {
                            self.state = State::ChunkDataAlmostDone;
                        }
                        continue;
                    }
                }
                _ => {}
            }

            if self.scratch_idx >= SCRATCH_CAPACITY {
                self.error = ParseError::TooBig;
                return i + 1;
            }

            let byte = data[i];
            self.bytes_read += 1;
            self.total_bytes_read += 1;
            i += 1;

            match self.state {
                // ===================== START =====================
                State::Start => {
                    self.flags.clear();

                    if byte == CR || byte == LF {
                        // stay in Start
                    } else if !(byte.is_ascii_uppercase() || byte == b'_') {
                        self.error = ParseError::InvalidRequestLine;
                        return i;
                    } else {
                        let r = hooks.on_message_begin(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        self.scratch_idx = 0;
                        self.push_scratch(byte);

                        match self.message_type {
                            MessageType::Request => self.state = State::Method,
                            MessageType::Response if byte == b'H' => self.state = State::HttpH,
                            MessageType::Response => {
                                self.error = ParseError::InvalidRequestLine;
                                return i;
                            }
                        }
                    }
                }

                // ===================== REQUEST LINE =====================
                State::Method => {
                    if byte == b' ' {
                        let slice_end = self.scratch_idx;
                        if let Some(m) = HttpMethod::classify(self.scratch_range(0, slice_end)) {
                            self.method = m;
                        }

                        let r = hooks.on_method(self, &self.scratch[0..slice_end]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        self.scratch_idx = 0;
                        self.state = State::SpacesBeforeUri;
                    } else if byte.is_ascii_uppercase() || byte == b'_' {
                        self.push_scratch(byte);
                    } else {
                        self.error = ParseError::InvalidMethod;
                        return i;
                    }
                }

                State::SpacesBeforeUri => match byte {
                    b' ' => {}
                    b'/' => {
                        self.path_offset = Some(self.scratch_idx);
                        self.push_scratch(byte);
                        self.state = State::AfterSlashInUri;
                    }
                    _ => {
                        let folded = byte | 0x20;
                        if folded.is_ascii_lowercase() {
                            self.scheme_offset = Some(self.scratch_idx);
                            self.push_scratch(byte);
                            self.state = State::Schema;
                        } else {
                            self.error = ParseError::InvalidRequestLine;
                            return i;
                        }
                    }
                },

                State::Schema => {
                    let folded = byte | 0x20;
                    if folded.is_ascii_lowercase() {
                        self.push_scratch(byte);
                    } else if byte == b':' {
                        let start = self.scheme_offset.unwrap_or(0);
                        self.scheme = Scheme::classify(self.scratch_range(start, self.scratch_idx));

                        let r = hooks.on_scheme(self, &self.scratch[start..self.scratch_idx]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        self.push_scratch(byte);
                        self.state = State::SchemaSlash;
                    } else {
                        self.error = ParseError::InvalidSchema;
                        return i;
                    }
                }

                State::SchemaSlash => {
                    if byte == b'/' {
                        self.push_scratch(byte);
                        self.state = State::SchemaSlashSlash;
                    } else {
                        self.error = ParseError::InvalidSchema;
                        return i;
                    }
                }

                State::SchemaSlashSlash => {
                    if byte == b'/' {
                        self.push_scratch(byte);
                        self.host_offset = Some(self.scratch_idx);
                        self.state = State::Host;
                    } else {
                        self.error = ParseError::InvalidSchema;
                        return i;
                    }
                }

                State::Host => {
                    let folded = byte | 0x20;
                    if folded.is_ascii_lowercase()
                        || byte.is_ascii_digit()
                        || byte == b'.'
                        || byte == b'-'
                    {
                        self.push_scratch(byte);
                    } else {
                        let start = self.host_offset.unwrap_or(0);
                        let r = hooks.on_host(self, &self.scratch[start..self.scratch_idx]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        match byte {
                            b':' => {
                                self.push_scratch(byte);
                                self.port_offset = Some(self.scratch_idx);
                                self.state = State::Port;
                            }
                            b' ' => {
                                i -= 1;
                                self.path_offset = Some(self.scratch_idx);
                                self.push_scratch(b' ');
                                self.state = State::AfterSlashInUri;
                            }
                            b'/' => {
                                self.path_offset = Some(self.scratch_idx);
                                self.push_scratch(byte);
                                self.state = State::AfterSlashInUri;
                            }
                            _ => {
                                self.error = ParseError::InvalidSchema;
                                return i;
                            }
                        }
                    }
                }

                State::Port => {
                    if byte.is_ascii_digit() {
                        self.push_scratch(byte);
                    } else {
                        let start = self.port_offset.unwrap_or(0);
                        let r = hooks.on_port(self, &self.scratch[start..self.scratch_idx]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        match byte {
                            b'/' => {
                                self.push_scratch(byte);
                                self.path_offset = Some(self.scratch_idx - 1);
                                self.state = State::AfterSlashInUri;
                            }
                            b' ' => {
                                self.scratch_idx = 0;
                                self.state = State::Http09;
                            }
                            _ => {
                                self.error = ParseError::InvalidRequestLine;
                                return i;
                            }
                        }
                    }
                }

                State::AfterSlashInUri => {
                    if is_uri_allowed(byte) {
                        self.push_scratch(byte);
                        self.state = State::CheckUri;
                    } else {
                        match byte {
                            b' ' => {
                                if let Err(c) = self.emit_uri_tokens(hooks, i) {
                                    return c;
                                }
                                self.scratch_idx = 0;
                                self.state = State::Http09;
                            }
                            CR => {
                                self.minor = 9;
                                self.state = State::AlmostDone;
                            }
                            LF => {
                                self.minor = 9;
                                self.state = State::HdrlineStart;
                            }
                            b'.' | b'%' | b'/' | b'#' => {
                                self.push_scratch(byte);
                                self.state = State::Uri;
                            }
                            b'?' => {
                                let start = self.path_offset.unwrap_or(0);
                                let r = hooks.on_path(self, &self.scratch[start..self.scratch_idx]);
                                if let Err(c) = self.check_hook(r, i) {
                                    return c;
                                }
                                self.push_scratch(byte);
                                self.args_offset = Some(self.scratch_idx);
                                self.state = State::Uri;
                            }
                            _ => {
                                self.push_scratch(byte);
                                self.state = State::CheckUri;
                            }
                        }
                    }
                }

                State::CheckUri => {
                    if is_uri_allowed(byte) {
                        self.push_scratch(byte);
                    } else {
                        match byte {
                            b' ' => {
                                if let Err(c) = self.emit_uri_tokens(hooks, i) {
                                    return c;
                                }
                                self.scratch_idx = 0;
                                self.state = State::Http09;
                            }
                            b'/' => {
                                self.push_scratch(byte);
                                self.state = State::AfterSlashInUri;
                            }
                            CR => {
                                self.minor = 9;
                                self.scratch_idx = 0;
                                self.state = State::AlmostDone;
                            }
                            LF => {
                                self.minor = 9;
                                self.scratch_idx = 0;
                                self.state = State::HdrlineStart;
                            }
                            b'?' => {
                                let start = self.path_offset.unwrap_or(0);
                                let r = hooks.on_path(self, &self.scratch[start..self.scratch_idx]);
                                if let Err(c) = self.check_hook(r, i) {
                                    return c;
                                }
                                self.push_scratch(byte);
                                self.args_offset = Some(self.scratch_idx);
                                self.state = State::Uri;
                            }
                            _ => {
                                self.push_scratch(byte);
                                self.state = State::Uri;
                            }
                        }
                    }
                }

                State::Uri => {
                    if is_uri_allowed(byte) {
                        self.push_scratch(byte);
                    } else {
                        match byte {
                            b' ' => {
                                if let Err(c) = self.emit_uri_tokens(hooks, i) {
                                    return c;
                                }
                                self.scratch_idx = 0;
                                self.state = State::Http09;
                            }
                            b'?' => {
                                let start = self.path_offset.unwrap_or(0);
                                let r = hooks.on_path(self, &self.scratch[start..self.scratch_idx]);
                                if let Err(c) = self.check_hook(r, i) {
                                    return c;
                                }
                                self.push_scratch(byte);
                                self.args_offset = Some(self.scratch_idx);
                            }
                            CR => {
                                self.minor = 9;
                                self.scratch_idx = 0;
                                self.state = State::AlmostDone;
                            }
                            LF => {
                                self.minor = 9;
                                self.scratch_idx = 0;
                                self.state = State::HdrlineStart;
                            }
                            _ => {
                                self.push_scratch(byte);
                            }
                        }
                    }
                }

                // ===================== VERSION =====================
                State::Http09 => match byte {
                    b' ' => {}
                    CR => {
                        self.minor = 9;
                        self.scratch_idx = 0;
                        self.state = State::AlmostDone;
                    }
                    LF => {
                        self.minor = 9;
                        self.scratch_idx = 0;
                        self.state = State::HdrlineStart;
                    }
                    b'H' => {
                        self.scratch_idx = 0;
                        self.state = State::HttpH;
                    }
                    _ => {
                        self.error = ParseError::InvalidProtocol;
                        return i;
                    }
                },

                State::HttpH => {
                    if byte == b'T' {
                        self.state = State::HttpHt;
                    } else {
                        self.error = ParseError::InvalidProtocol;
                        return i;
                    }
                }
                State::HttpHt => {
                    if byte == b'T' {
                        self.state = State::HttpHtt;
                    } else {
                        self.error = ParseError::InvalidProtocol;
                        return i;
                    }
                }
                State::HttpHtt => {
                    if byte == b'P' {
                        self.state = State::HttpHttp;
                    } else {
                        self.error = ParseError::InvalidProtocol;
                        return i;
                    }
                }
                State::HttpHttp => {
                    if byte == b'/' {
                        self.state = State::FirstMajorDigit;
                    } else {
                        self.error = ParseError::InvalidProtocol;
                        return i;
                    }
                }

                State::FirstMajorDigit => {
                    if byte.is_ascii_digit() && byte != b'0' {
                        self.major = byte - b'0';
                        self.state = State::MajorDigit;
                    } else {
                        self.error = ParseError::InvalidVersion;
                        return i;
                    }
                }
                State::MajorDigit => {
                    if byte == b'.' {
                        self.state = State::FirstMinorDigit;
                    } else if byte.is_ascii_digit() {
                        self.major = self.major.wrapping_mul(10).wrapping_add(byte - b'0');
                    } else {
                        self.error = ParseError::InvalidVersion;
                        return i;
                    }
                }
                State::FirstMinorDigit => {
                    if byte.is_ascii_digit() {
                        self.minor = byte - b'0';
                        self.state = State::MinorDigit;
                    } else {
                        self.error = ParseError::InvalidVersion;
                        return i;
                    }
                }
                State::MinorDigit => match byte {
                    b' ' => {
                        self.state = match self.message_type {
                            MessageType::Request => State::SpacesAfterDigit,
                            MessageType::Response => State::Status,
                        };
                    }
                    CR => self.state = State::AlmostDone,
                    LF => {
                        self.error = ParseError::InvalidRequestLine;
                        return i;
                    }
                    _ if byte.is_ascii_digit() => {
                        self.minor = self.minor.wrapping_mul(10).wrapping_add(byte - b'0');
                    }
                    _ => {
                        self.error = ParseError::InvalidVersion;
                        return i;
                    }
                },

                // ===================== RESPONSE STATUS =====================
                State::Status => {
                    if byte == b' ' {
                        if self.status > 0 {
                            self.state = State::StatusText;
                        }
                    } else if byte.is_ascii_digit() {
                        self.status = self.status.wrapping_mul(10) + (byte - b'0') as u16;
                        self.status_count += 1;
                        if self.status_count == 3 {
                            self.state = State::SpaceAfterStatus;
                        }
                    } else {
                        self.error = ParseError::Generic;
                        return i;
                    }
                }
                State::SpaceAfterStatus => match byte {
                    b' ' => self.state = State::StatusText,
                    CR => self.state = State::AlmostDone,
                    LF => self.state = State::HdrlineStart,
                    _ => {
                        self.error = ParseError::Generic;
                        return i;
                    }
                },
                State::StatusText => match byte {
                    CR => self.state = State::AlmostDone,
                    LF => self.state = State::HdrlineStart,
                    _ => {}
                },

                State::SpacesAfterDigit => match byte {
                    b' ' => {}
                    CR => self.state = State::AlmostDone,
                    LF => self.state = State::HdrlineStart,
                    _ => {
                        self.error = ParseError::InvalidVersion;
                        return i;
                    }
                },

                // ===================== REQUEST/STATUS LINE END =====================
                State::AlmostDone => {
                    if byte != LF {
                        self.error = ParseError::InvalidRequestLine;
                        return i;
                    }

                    if self.message_type == MessageType::Response
                        && self.status >= 100
                        && self.status < 200
                    {
                        self.status = 0;
                        self.status_count = 0;
                        self.state = State::Start;
                    } else {
                        let r = hooks.on_headers_begin(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.state = State::Done;
                    }
                }

                State::Done => match byte {
                    CR => self.state = State::HdrlineBlankAlmostDone,
                    LF => return i,
                    _ => {
                        if let Err(c) = self.hdrline_start(byte) {
                            return c;
                        }
                    }
                },

                // ===================== HEADERS =====================
                State::HdrlineStart => {
                    if let Err(c) = self.hdrline_start(byte) {
                        return c;
                    }
                }

                State::HdrlineHdrKey => match byte {
                    b':' => {
                        let end = self.scratch_idx;
                        let r = hooks.on_header_key(self, &self.scratch[0..end]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        self.heval = HeaderEval::classify(self.scratch_range(0, end));
                        self.scratch_idx = 0;
                        self.state = State::HdrlineHdrSpaceBeforeVal;
                    }
                    CR => self.state = State::HdrlineHdrAlmostDone,
                    LF => self.state = State::HdrlineHdrDone,
                    _ => self.push_scratch(byte),
                },

                State::HdrlineHdrSpaceBeforeVal => match byte {
                    b' ' => {}
                    CR => {
                        self.push_scratch(b' ');
                        self.state = State::HdrlineHdrVal;
                        i -= 1;
                    }
                    LF => {
                        self.error = ParseError::InvalidHeader;
                        return i;
                    }
                    _ => {
                        self.push_scratch(byte);
                        self.state = State::HdrlineHdrVal;
                    }
                },

                State::HdrlineHdrVal => match byte {
                    CR => {
                        if let Err(c) = self.apply_header_value(hooks, i) {
                            return c;
                        }
                        self.state = State::HdrlineHdrAlmostDone;
                    }
                    LF => {
                        self.error = ParseError::InvalidHeader;
                        return i;
                    }
                    _ => self.push_scratch(byte),
                },

                // Terminates exactly one header (or trailer) line; the byte
                // that follows still has to say whether another field
                // starts or the blank line ending the section has arrived,
                // which is HdrlineHdrDone's job.
                State::HdrlineHdrAlmostDone => {
                    if byte != LF {
                        self.error = ParseError::InvalidHeader;
                        return i;
                    }
                    self.state = State::HdrlineHdrDone;
                }

                // Reached when a blank line starts the header (or trailer)
                // section directly, i.e. zero fields were present.
                State::HdrlineBlankAlmostDone => {
                    if byte != LF {
                        self.error = ParseError::InvalidHeader;
                        return i;
                    }
                    self.scratch_idx = 0;

                    if self.flags.has(Flags::TRAILING) {
                        let r = hooks.on_message_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.reset_message_state();
                    } else {
                        let r = hooks.on_headers_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        if self.flags.has(Flags::CHUNKED) {
                            self.state = State::ChunkSizeStart;
                        } else if self.content_len > 0 {
                            self.state = State::BodyRead;
                        } else {
                            let r = hooks.on_message_complete(self);
                            if let Err(c) = self.check_hook(r, i) {
                                return c;
                            }
                            self.reset_message_state();
                        }
                    }
                }

                State::HdrlineHdrDone => match byte {
                    CR => {
                        let end = self.scratch_idx;
                        let r = hooks.on_header_value(self, &self.scratch[0..end]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        self.state = State::HdrlineAlmostDone;
                        let r = hooks.on_headers_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                    }
                    LF => {
                        self.error = ParseError::InvalidHeader;
                        return i;
                    }
                    b'\t' => {
                        // obsolete folded header continuation; the tab
                        // itself is part of the value.
                        self.push_scratch(byte);
                        self.state = State::HdrlineHdrVal;
                    }
                    _ => {
                        let end = self.scratch_idx;
                        let r = hooks.on_header_value(self, &self.scratch[0..end]);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }

                        self.scratch_idx = 0;
                        self.push_scratch(byte);
                        self.state = State::HdrlineHdrKey;
                    }
                },

                State::HdrlineAlmostDone => {
                    if byte != LF {
                        self.error = ParseError::InvalidHeader;
                        return i;
                    }
                    self.scratch_idx = 0;

                    if self.flags.has(Flags::TRAILING) {
                        let r = hooks.on_message_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.reset_message_state();
                    } else if self.flags.has(Flags::CHUNKED) {
                        self.state = State::ChunkSizeStart;
                    } else if self.content_len > 0 {
                        self.state = State::BodyRead;
                    } else {
                        let r = hooks.on_message_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.reset_message_state();
                    }
                }

                // Body/ChunkData are driven by the bulk-copy path above;
                // reaching the per-byte match means content_len was 0 with
                // no bytes consumed yet this call, so loop back around.
                State::BodyRead | State::ChunkData => {}

                // ===================== CHUNKED ENCODING =====================
                State::ChunkSizeStart => match hex_value(byte) {
                    Some(v) => {
                        self.content_len = v as u64;
                        self.state = State::ChunkSize;
                    }
                    None => {
                        self.error = ParseError::InvalidChunkSize;
                        return i;
                    }
                },
                State::ChunkSize => {
                    if byte == CR {
                        self.state = State::ChunkSizeAlmostDone;
                    } else {
                        match hex_value(byte) {
                            Some(v) => {
                                self.content_len = self.content_len * 16 + v as u64;
                            }
                            None => {
                                self.error = ParseError::InvalidChunkSize;
                                return i;
                            }
                        }
                    }
                }
                State::ChunkSizeAlmostDone => {
                    if byte != LF {
                        self.error = ParseError::InvalidChunkSize;
                        return i;
                    }

                    if self.content_len == 0 {
                        let r = hooks.on_chunks_complete(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.flags.set(Flags::TRAILING);
                        self.state = State::HdrlineStart;
                    } else {
                        let r = hooks.on_new_chunk(self);
                        if let Err(c) = self.check_hook(r, i) {
                            return c;
                        }
                        self.state = State::ChunkData;
                    }
                }

                State::ChunkDataAlmostDone => {
                    if byte != CR {
                        self.error = ParseError::InvalidChunk;
                        return i;
                    }
                    self.state = State::ChunkDataDone;
                }
                State::ChunkDataDone => {
                    if byte != LF {
                        self.error = ParseError::InvalidChunk;
                        return i;
                    }
                    self.state = State::ChunkSizeStart;

                    let r = hooks.on_chunk_complete(self);
                    if let Err(c) = self.check_hook(r, i) {
                        return c;
                    }
                }
            }
        }

        i
    }

    /// Shared entry point for `Done`/`HdrlineStart`: reset the header
    /// scratch buffer and classify the current byte as either the start
    /// of a header key or an empty-header-section terminator.
    fn hdrline_start(&mut self, byte: u8) -> Result<(), usize> {
        self.scratch_idx = 0;

        match byte {
            CR => self.state = State::HdrlineBlankAlmostDone,
            LF => self.state = State::HdrlineHdrDone,
            _ => {
                self.push_scratch(byte);
                self.state = State::HdrlineHdrKey;
            }
        }
        Ok(())
    }

    /// Fire the Path-or-Args hook (depending on whether `?` has been seen)
    /// followed by the Uri hook, for a URI-terminating byte.
    fn emit_uri_tokens<H: ParserHooks>(&mut self, hooks: &mut H, i: usize) -> Result<(), usize> {
        if self.uri_token_is_args() {
            let start = self.args_offset.unwrap();
            let end = self.scratch_idx;
            let r = hooks.on_args(self, &self.scratch[start..end]);
            self.check_hook(r, i)?;
        } else {
            let start = self.path_offset.unwrap_or(0);
            let end = self.scratch_idx;
            let r = hooks.on_path(self, &self.scratch[start..end]);
            self.check_hook(r, i)?;
        }

        let end = self.scratch_idx;
        let r = hooks.on_uri(self, &self.scratch[0..end]);
        self.check_hook(r, i)?;
        Ok(())
    }

    /// Interpret the just-completed header value according to `self.heval`
    /// and fire the Hostname hook if applicable.
    fn apply_header_value<H: ParserHooks>(&mut self, hooks: &mut H, i: usize) -> Result<(), usize> {
        match self.heval {
            HeaderEval::None => {}
            HeaderEval::Host => {
                let end = self.scratch_idx;
                let r = hooks.on_hostname(self, &self.scratch[0..end]);
                self.check_hook(r, i)?;
            }
            HeaderEval::ContentLength => {
                let digits = &self.scratch[0..self.scratch_idx];
                match parse_content_length(digits) {
                    Some(v) => self.content_len = v,
                    None => {
                        self.error = ParseError::TooBig;
                        return Err(i);
                    }
                }
            }
            HeaderEval::Connection => {
                let buf = &self.scratch[0..self.scratch_idx];
                match buf.first() {
                    Some(b'K') | Some(b'k') => {
                        if buf.len() == 10 && buf[1..].eq_ignore_ascii_case(b"eep-Alive") {
                            self.flags.set(Flags::CONNECTION_KEEP_ALIVE);
                        }
                    }
                    Some(b'c') | Some(b'C') => {
                        if buf.eq_ignore_ascii_case(b"close") {
                            self.flags.set(Flags::CONNECTION_CLOSE);
                        }
                    }
                    _ => {}
                }
            }
            HeaderEval::TransferEncoding => {
                let buf = &self.scratch[0..self.scratch_idx];
                if buf.eq_ignore_ascii_case(b"chunked") {
                    self.flags.set(Flags::CHUNKED);
                }
            }
            HeaderEval::ContentType => {
                let buf = &self.scratch[0..self.scratch_idx];
                if buf.len() >= 9 && buf[0..9].eq_ignore_ascii_case(b"multipart") {
                    self.multipart = true;
                }
            }
            HeaderEval::ProxyConnection => {}
        }
        Ok(())
    }
}

/// Parse a decimal `Content-Length` value, rejecting more than 20 digits,
/// non-digit bytes, or arithmetic overflow.
fn parse_content_length(digits: &[u8]) -> Option<u64> {
    if digits.is_empty() || digits.len() > 20 {
        return None;
    }

    let mut value: u64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        let digit = (b - b'0') as u64;
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    Some(value)
}
