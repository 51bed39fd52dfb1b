use wireframe::{
    format_debug, format_headers_only, format_json, parse_message, HttpMethod, MessageType,
    NoopHooks, ParseError, Parser,
};

// =========================================================================
// Request-line parsing
// =========================================================================

#[test]
fn simple_get_request() {
    let raw = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.method, HttpMethod::Get);
    assert_eq!(msg.path.as_deref(), Some("/"));
    assert_eq!(msg.major, 1);
    assert_eq!(msg.minor, 1);
    assert_eq!(msg.headers.len(), 1);
    assert_eq!(msg.headers[0].name, "Host");
    assert_eq!(msg.headers[0].value, "example.com");
    assert!(msg.body.is_none());
    assert!(msg.should_keep_alive);
}

#[test]
fn get_with_query_string() {
    let raw = b"GET /api/users?page=1&limit=10 HTTP/1.1\r\nHost: api.example.com\r\nAccept: application/json\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.method, HttpMethod::Get);
    assert_eq!(msg.path.as_deref(), Some("/api/users"));
    // `args` is the query string with the leading '?' stripped; `uri` keeps
    // the full request target as seen on the wire.
    assert_eq!(msg.args.as_deref(), Some("page=1&limit=10"));
    assert_eq!(msg.uri.as_deref(), Some("/api/users?page=1&limit=10"));
    assert_eq!(msg.header_value("Accept"), Some("application/json"));
}

#[test]
fn http_10_version_defaults_to_close() {
    let raw = b"GET /legacy HTTP/1.0\r\nHost: old.example.com\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.major, 1);
    assert_eq!(msg.minor, 0);
    assert!(!msg.should_keep_alive);
}

#[test]
fn http_09_request_has_no_headers() {
    let raw = b"GET /old\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.major, 0);
    assert_eq!(msg.minor, 9);
}

#[test]
fn all_fourteen_known_methods_classify() {
    let methods = [
        ("GET", HttpMethod::Get),
        ("HEAD", HttpMethod::Head),
        ("POST", HttpMethod::Post),
        ("PUT", HttpMethod::Put),
        ("DELETE", HttpMethod::Delete),
        ("MKCOL", HttpMethod::Mkcol),
        ("COPY", HttpMethod::Copy),
        ("MOVE", HttpMethod::Move),
        ("OPTIONS", HttpMethod::Options),
        ("PROPFIND", HttpMethod::Propfind),
        ("PROPPATCH", HttpMethod::Proppatch),
        ("LOCK", HttpMethod::Lock),
        ("UNLOCK", HttpMethod::Unlock),
        ("TRACE", HttpMethod::Trace),
    ];

    for (name, expected) in methods {
        let raw = format!("{name} / HTTP/1.1\r\nHost: h\r\n\r\n");
        let msg = parse_message(raw.as_bytes(), MessageType::Request)
            .unwrap_or_else(|e| panic!("method {name}: {e}"));
        assert_eq!(msg.method, expected, "mismatch for method {name}");
    }
}

#[test]
fn unrecognized_method_keeps_unknown_but_does_not_error() {
    // Per the documented quirk, a syntactically valid (uppercase) but
    // unrecognized method token does not abort the parse.
    let raw = b"FOOBAR / HTTP/1.1\r\nHost: h\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.method, HttpMethod::Unknown);
    assert_eq!(msg.method_raw, "FOOBAR");
}

// =========================================================================
// Absolute-form request targets
// =========================================================================

#[test]
fn absolute_form_uri_splits_scheme_host_port_path() {
    let raw = b"GET http://example.com:8080/foo HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.scheme, wireframe::Scheme::Http);
    assert_eq!(msg.host.as_deref(), Some("example.com"));
    assert_eq!(msg.port.as_deref(), Some("8080"));
    assert_eq!(msg.path.as_deref(), Some("/foo"));
}

// =========================================================================
// Header parsing
// =========================================================================

#[test]
fn multiple_headers() {
    let raw = b"GET / HTTP/1.1\r\n\
        Host: example.com\r\n\
        Accept: text/html\r\n\
        Accept-Language: en-US\r\n\
        User-Agent: WireFrame/1.0\r\n\
        Connection: keep-alive\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.headers.len(), 5);
    assert_eq!(msg.header_value("Host"), Some("example.com"));
    assert_eq!(msg.header_value("Accept"), Some("text/html"));
    assert_eq!(msg.header_value("User-Agent"), Some("WireFrame/1.0"));
    assert!(msg.should_keep_alive);
}

#[test]
fn empty_header_value() {
    let raw = b"GET / HTTP/1.1\r\nHost: example.com\r\nX-Empty:\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert!(msg.header_value("X-Empty").is_some());
}

#[test]
fn case_insensitive_header_lookup() {
    let raw = b"GET / HTTP/1.1\r\nhost: example.com\r\ncontent-type: text/plain\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.header_value("Host"), Some("example.com"));
    assert_eq!(msg.header_value("CONTENT-TYPE"), Some("text/plain"));
}

#[test]
fn duplicate_header_values() {
    let raw = b"GET / HTTP/1.1\r\nHost: h\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    let cookies: Vec<&str> = msg.header_values("Set-Cookie").collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

#[test]
fn obsolete_folded_header_continuation() {
    let raw = b"GET / HTTP/1.1\r\nHost: h\r\nX-Folded: first\r\n\tsecond\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.header_value("X-Folded"), Some("first\tsecond"));
}

// =========================================================================
// Body parsing (Content-Length)
// =========================================================================

#[test]
fn post_with_content_length_body() {
    let body = "name=John&age=30";
    let raw = format!(
        "POST /submit HTTP/1.1\r\n\
         Host: example.com\r\n\
         Content-Length: {}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\r\n\
         {}",
        body.len(),
        body
    );
    let msg = parse_message(raw.as_bytes(), MessageType::Request).expect("should parse");
    assert_eq!(msg.method, HttpMethod::Post);
    assert_eq!(msg.path.as_deref(), Some("/submit"));
    assert_eq!(msg.body_as_str().as_deref(), Some(body));
}

#[test]
fn content_length_zero_yields_no_body() {
    let raw = b"POST /empty HTTP/1.1\r\nHost: h\r\nContent-Length: 0\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert!(msg.body.is_none());
}

#[test]
fn multipart_content_type_sets_flag() {
    let raw = b"POST /upload HTTP/1.1\r\nHost: h\r\nContent-Type: multipart/form-data; boundary=x\r\nContent-Length: 0\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert!(msg.multipart);
}

// =========================================================================
// Chunked transfer encoding
// =========================================================================

#[test]
fn chunked_body_two_chunks() {
    let raw = b"POST /upload HTTP/1.1\r\n\
        Host: example.com\r\n\
        Transfer-Encoding: chunked\r\n\r\n\
        5\r\nHello\r\n6\r\n World\r\n0\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.body_as_str().as_deref(), Some("Hello World"));
}

#[test]
fn chunked_hex_sizes() {
    let raw = b"POST / HTTP/1.1\r\n\
        Host: h\r\n\
        Transfer-Encoding: chunked\r\n\r\n\
        A\r\n0123456789\r\n5\r\nabcde\r\n0\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.body_as_str().as_deref(), Some("0123456789abcde"));
}

#[test]
fn chunked_with_trailer_fields() {
    let raw = b"POST / HTTP/1.1\r\n\
        Host: h\r\n\
        Transfer-Encoding: chunked\r\n\r\n\
        3\r\nabc\r\n0\r\n\
        Trailer-Field: value\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).expect("should parse");
    assert_eq!(msg.body_as_str().as_deref(), Some("abc"));
}

// =========================================================================
// Responses
// =========================================================================

#[test]
fn simple_response() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK";
    let msg = parse_message(raw, MessageType::Response).expect("should parse");
    assert_eq!(msg.status, 200);
    assert_eq!(msg.body_as_str().as_deref(), Some("OK"));
}

#[test]
fn informational_response_is_skipped_before_final_status() {
    let raw = b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";
    let msg = parse_message(raw, MessageType::Response).expect("should parse");
    assert_eq!(msg.status, 200);
}

// =========================================================================
// Incremental (streaming) parsing
// =========================================================================

#[test]
fn incremental_byte_by_byte_matches_whole_buffer() {
    let raw = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

    let mut whole = Parser::new(MessageType::Request);
    let mut whole_hooks = NoopHooks;
    whole.run(&mut whole_hooks, raw);

    let mut incremental = Parser::new(MessageType::Request);
    let mut inc_hooks = NoopHooks;
    for &byte in raw {
        incremental.run(&mut inc_hooks, &[byte]);
    }

    assert_eq!(whole.error(), incremental.error());
    assert_eq!(whole.method(), incremental.method());
    assert_eq!(whole.major(), incremental.major());
    assert_eq!(whole.minor(), incremental.minor());
}

#[test]
fn incremental_multi_chunk_with_body() {
    let part1 = b"POST /path HTTP/1.1\r\n";
    let part2 = b"Host: example.com\r\n";
    let part3 = b"Content-Length: 5\r\n\r\n";
    let part4 = b"Hello";

    let mut parser = Parser::new(MessageType::Request);
    let mut hooks = wireframe::CollectingHooks::new();

    parser.run(&mut hooks, part1);
    parser.run(&mut hooks, part2);
    parser.run(&mut hooks, part3);
    parser.run(&mut hooks, part4);

    assert_eq!(parser.error(), ParseError::None);
    assert!(hooks.is_done());
    let msg = hooks.into_message();
    assert_eq!(msg.path.as_deref(), Some("/path"));
    assert_eq!(msg.body_as_str().as_deref(), Some("Hello"));
}

// =========================================================================
// Pipelining / consumed-byte accounting
// =========================================================================

// A single `run` call drives the state machine straight through a message
// boundary into whatever follows in the same buffer; hooks, not the return
// value, are what tell a caller where one message ended. A hook that aborts
// lets a caller stop right there and inspect the byte offset.
struct StopAfterMessage;

impl wireframe::ParserHooks for StopAfterMessage {
    fn on_message_complete(&mut self, _parser: &Parser) -> i32 {
        1
    }
}

#[test]
fn pipelined_messages_stop_at_boundary_when_hook_aborts() {
    let raw = b"GET / HTTP/1.1\r\nHost: h\r\n\r\nGET /next HTTP/1.1\r\n";
    let mut parser = Parser::new(MessageType::Request);
    let mut hooks = StopAfterMessage;
    let consumed = parser.run(&mut hooks, raw);
    assert_eq!(parser.error(), ParseError::User);
    assert_eq!(&raw[consumed..consumed + 3], b"GET");
}

// =========================================================================
// Parser reuse across messages
// =========================================================================

#[test]
fn parser_reused_after_message_boundary() {
    let raw1 = b"GET /a HTTP/1.1\r\nHost: h\r\n\r\n";
    let raw2 = b"POST /b HTTP/1.1\r\nHost: h\r\nContent-Length: 2\r\n\r\nOK";

    let mut parser = Parser::new(MessageType::Request);

    let mut hooks1 = wireframe::CollectingHooks::new();
    parser.run(&mut hooks1, raw1);
    let first = hooks1.into_message();
    assert_eq!(first.path.as_deref(), Some("/a"));

    let mut hooks2 = wireframe::CollectingHooks::new();
    parser.run(&mut hooks2, raw2);
    let second = hooks2.into_message();
    assert_eq!(second.method, HttpMethod::Post);
    assert_eq!(second.path.as_deref(), Some("/b"));
    assert_eq!(second.body_as_str().as_deref(), Some("OK"));
}

// =========================================================================
// Error conditions
// =========================================================================

#[test]
fn error_empty_method_is_invalid_request_line() {
    let raw = b" / HTTP/1.1\r\nHost: h\r\n\r\n";
    let err = parse_message(raw, MessageType::Request).unwrap_err();
    assert_eq!(err, ParseError::InvalidRequestLine);
}

#[test]
fn error_invalid_protocol_literal() {
    let raw = b"GET / HXTP/1.1\r\nHost: h\r\n\r\n";
    let err = parse_message(raw, MessageType::Request).unwrap_err();
    assert_eq!(err, ParseError::InvalidProtocol);
}

#[test]
fn error_invalid_version_digits() {
    let raw = b"GET / HTTP/1.x\r\nHost: h\r\n\r\n";
    let err = parse_message(raw, MessageType::Request).unwrap_err();
    assert_eq!(err, ParseError::InvalidVersion);
}

#[test]
fn error_reports_exact_offending_byte_offset() {
    // A leading zero is not a valid first major-version digit.
    let raw = b"GET / HTTP/0.0\r\nHost: h\r\n\r\n";
    let mut parser = Parser::new(MessageType::Request);
    let mut hooks = NoopHooks;
    let consumed = parser.run(&mut hooks, raw);
    assert_eq!(parser.error(), ParseError::InvalidVersion);
    // position of the offending '0' (0-indexed 11) + 1
    assert_eq!(consumed, 12);
}

#[test]
fn error_invalid_chunk_size() {
    let raw = b"POST / HTTP/1.1\r\nHost: h\r\nTransfer-Encoding: chunked\r\n\r\nZZ\r\n";
    let err = parse_message(raw, MessageType::Request).unwrap_err();
    assert_eq!(err, ParseError::InvalidChunkSize);
}

#[test]
fn error_content_length_overflow() {
    let raw = b"POST / HTTP/1.1\r\nHost: h\r\nContent-Length: 999999999999999999999\r\n\r\n";
    let err = parse_message(raw, MessageType::Request).unwrap_err();
    assert_eq!(err, ParseError::TooBig);
}

// =========================================================================
// Scratch buffer bound
// =========================================================================

#[test]
fn oversized_uri_aborts_with_too_big() {
    let mut raw = Vec::new();
    raw.extend_from_slice(b"GET /");
    raw.extend(std::iter::repeat(b'a').take(wireframe::SCRATCH_CAPACITY + 1));
    let err = parse_message(&raw, MessageType::Request).unwrap_err();
    assert_eq!(err, ParseError::TooBig);
}

// =========================================================================
// Output formatting
// =========================================================================

#[test]
fn json_output_contains_expected_fields() {
    let raw = b"GET / HTTP/1.1\r\nHost: h\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).unwrap();
    let json = format_json(&msg, false);
    assert!(json.contains("\"method\":\"Get\""));
    assert!(json.contains("\"path\":\"/\""));
}

#[test]
fn json_output_pretty_has_newlines() {
    let raw = b"GET /pretty HTTP/1.1\r\nHost: h\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).unwrap();
    let json = format_json(&msg, true);
    assert!(json.contains('\n'));
    assert!(json.contains("  "));
}

#[test]
fn debug_output_contains_sections() {
    let raw = b"GET /test HTTP/1.1\r\nHost: h\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).unwrap();
    let dbg = format_debug(&msg);
    assert!(dbg.contains("=== HTTP Request ==="));
    assert!(dbg.contains("Method:  GET"));
    assert!(dbg.contains("--- Headers"));
    assert!(dbg.contains("--- No Body ---"));
}

#[test]
fn headers_only_output() {
    let raw = b"GET /path HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).unwrap();
    let out = format_headers_only(&msg);
    assert!(out.starts_with("GET /path HTTP/1.1\n"));
    assert!(out.contains("Host: example.com\n"));
    assert!(out.contains("Accept: */*\n"));
}

// =========================================================================
// Edge cases
// =========================================================================

#[test]
fn large_body_content_length() {
    let body = "X".repeat(50_000);
    let raw = format!(
        "POST / HTTP/1.1\r\n\
         Host: h\r\n\
         Content-Length: {}\r\n\r\n\
         {}",
        body.len(),
        body
    );
    let msg = parse_message(raw.as_bytes(), MessageType::Request).unwrap();
    assert_eq!(msg.body_as_str().as_deref(), Some(body.as_str()));
}

#[test]
fn many_headers() {
    let mut raw = String::from("GET / HTTP/1.1\r\n");
    for i in 0..50 {
        raw.push_str(&format!("X-Header-{i}: value-{i}\r\n"));
    }
    raw.push_str("\r\n");

    let msg = parse_message(raw.as_bytes(), MessageType::Request).unwrap();
    assert_eq!(msg.headers.len(), 50);
}

#[test]
fn connection_close_overrides_keep_alive_default() {
    let raw = b"GET / HTTP/1.1\r\nHost: h\r\nConnection: close\r\n\r\n";
    let msg = parse_message(raw, MessageType::Request).unwrap();
    assert!(!msg.should_keep_alive);
}
