//! Owned, allocating representation of a parsed message, built by collecting
//! [`ParserHooks`] callbacks. The zero-allocation [`Parser`] itself never
//! produces this type directly — it is a convenience layer for callers (the
//! CLI, tests) that want a complete message rather than a stream of hooks.

use serde::Serialize;

use crate::error::ParseError;
use crate::hooks::ParserHooks;
use crate::parser::Parser;
use crate::types::{serialize_body, Header, HttpMethod, MessageType, Scheme};

/// A fully materialized HTTP/1.x message, assembled by [`CollectingHooks`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedMessage {
    pub message_type: Option<MessageType>,
    pub method: HttpMethod,
    /// Raw method bytes as seen on the wire, kept even when `method` is
    /// [`HttpMethod::Unknown`].
    pub method_raw: String,
    pub scheme: Scheme,
    pub host: Option<String>,
    pub port: Option<String>,
    pub path: Option<String>,
    pub args: Option<String>,
    pub uri: Option<String>,
    pub major: u8,
    pub minor: u8,
    pub status: u16,
    pub hostname: Option<String>,
    pub headers: Vec<Header>,
    #[serde(serialize_with = "serialize_body")]
    pub body: Option<Vec<u8>>,
    pub multipart: bool,
    pub should_keep_alive: bool,
}

impl ParsedMessage {
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn body_as_str(&self) -> Option<std::borrow::Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }
}

/// Collects parser hooks into an owned [`ParsedMessage`].
///
/// Headers are appended to `headers` as the key/value pair completes (the
/// key arrives first and is buffered until the matching value hook fires).
#[derive(Debug, Default)]
pub struct CollectingHooks {
    message: ParsedMessage,
    pending_header_name: Option<String>,
    body: Vec<u8>,
    done: bool,
}

impl CollectingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the collector and returns the assembled message. Only
    /// meaningful once [`ParserHooks::on_message_complete`] has fired.
    pub fn into_message(mut self) -> ParsedMessage {
        if !self.body.is_empty() {
            self.message.body = Some(std::mem::take(&mut self.body));
        }
        self.message
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl ParserHooks for CollectingHooks {
    fn on_message_begin(&mut self, _parser: &Parser) -> i32 {
        0
    }

    fn on_headers_complete(&mut self, parser: &Parser) -> i32 {
        self.message.major = parser.major();
        self.message.minor = parser.minor();
        self.message.status = parser.status();
        self.message.scheme = parser.scheme();
        self.message.should_keep_alive = parser.should_keep_alive();
        self.message.multipart = parser.multipart();
        0
    }

    fn on_message_complete(&mut self, parser: &Parser) -> i32 {
        self.message.major = parser.major();
        self.message.minor = parser.minor();
        self.message.status = parser.status();
        self.message.method = parser.method();
        self.message.scheme = parser.scheme();
        self.message.should_keep_alive = parser.should_keep_alive();
        self.message.multipart = parser.multipart();
        if !self.body.is_empty() {
            self.message.body = Some(std::mem::take(&mut self.body));
        }
        self.done = true;
        0
    }

    fn on_method(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.method_raw = String::from_utf8_lossy(data).into_owned();
        0
    }

    fn on_scheme(&mut self, parser: &Parser, _data: &[u8]) -> i32 {
        self.message.scheme = parser.scheme();
        0
    }

    fn on_host(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.host = Some(String::from_utf8_lossy(data).into_owned());
        0
    }

    fn on_port(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.port = Some(String::from_utf8_lossy(data).into_owned());
        0
    }

    fn on_path(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.path = Some(String::from_utf8_lossy(data).into_owned());
        0
    }

    fn on_args(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.args = Some(String::from_utf8_lossy(data).into_owned());
        0
    }

    fn on_uri(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.uri = Some(String::from_utf8_lossy(data).into_owned());
        0
    }

    fn on_header_key(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.pending_header_name = Some(String::from_utf8_lossy(data).into_owned());
        0
    }

    fn on_header_value(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        let name = self.pending_header_name.take().unwrap_or_default();
        self.message.headers.push(Header {
            name,
            value: String::from_utf8_lossy(data).into_owned(),
        });
        0
    }

    fn on_body(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.body.extend_from_slice(data);
        0
    }

    fn on_hostname(&mut self, _parser: &Parser, data: &[u8]) -> i32 {
        self.message.hostname = Some(String::from_utf8_lossy(data).into_owned());
        0
    }
}

/// Parse a complete, buffered message and return its owned representation.
///
/// This is a convenience wrapper around [`Parser::run`] + [`CollectingHooks`]
/// for callers that have the whole message in memory (the CLI, tests) and
/// don't need the zero-allocation streaming contract.
pub fn parse_message(data: &[u8], message_type: MessageType) -> Result<ParsedMessage, ParseError> {
    let mut parser = Parser::new(message_type);
    let mut hooks = CollectingHooks::new();
    parser.run(&mut hooks, data);

    if parser.error() != ParseError::None {
        return Err(parser.error());
    }

    let mut message = hooks.into_message();
    message.message_type = Some(message_type);
    Ok(message)
}
