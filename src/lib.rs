//! # WireFrame
//!
//! An **incremental, non-buffering HTTP/1.x message parser** implemented
//! as a state machine, designed for use both as a Rust library and as a
//! CLI tool.
//!
//! WireFrame processes HTTP requests and responses byte-by-byte or in
//! arbitrarily-sized chunks with identical externally observable results,
//! never allocating on behalf of the caller: every token is handed to a
//! [`ParserHooks`] implementation as a slice borrowed from the parser's
//! own fixed-capacity scratch buffer.
//!
//! ## Quick start — one-shot parsing into an owned message
//!
//! ```rust
//! use wireframe::{parse_message, MessageType};
//!
//! let raw = b"GET /hello HTTP/1.1\r\nHost: example.com\r\n\r\n";
//! let message = parse_message(raw, MessageType::Request).expect("valid request");
//! assert_eq!(message.method.as_str(), "GET");
//! assert_eq!(message.path.as_deref(), Some("/hello"));
//! ```
//!
//! ## Quick start — driving the parser directly with hooks
//!
//! ```rust
//! use wireframe::{MessageType, NoopHooks, Parser};
//!
//! let mut parser = Parser::new(MessageType::Request);
//! let mut hooks = NoopHooks;
//!
//! let consumed = parser.run(&mut hooks, b"GET / HTTP/1.1\r\n");
//! assert!(consumed > 0);
//!
//! parser.run(&mut hooks, b"Host: example.com\r\n\r\n");
//! assert_eq!(parser.error(), wireframe::ParseError::None);
//! ```

mod classify;
pub mod config;
mod error;
mod hooks;
mod message;
mod output;
mod parser;
mod types;

// Re-export public API.
pub use error::ParseError;
pub use hooks::{NoopHooks, ParserHooks};
pub use message::{parse_message, CollectingHooks, ParsedMessage};
pub use output::{format_debug, format_headers_only, format_json};
pub use parser::{Parser, SCRATCH_CAPACITY};
pub use types::{Header, HttpMethod, MessageType, Scheme};
