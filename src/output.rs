use crate::message::ParsedMessage;
use crate::types::MessageType;

/// Serialize a [`ParsedMessage`] to a JSON string.
///
/// When `pretty` is `true` the output is indented for readability.
pub fn format_json(message: &ParsedMessage, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(message).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    } else {
        serde_json::to_string(message).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Render a [`ParsedMessage`] in a human-readable debug format.
pub fn format_debug(message: &ParsedMessage) -> String {
    let mut out = String::with_capacity(256);

    let heading = match message.message_type {
        Some(MessageType::Response) => "=== HTTP Response ===",
        _ => "=== HTTP Request ===",
    };
    out.push_str(heading);
    out.push('\n');

    match message.message_type {
        Some(MessageType::Response) => {
            out.push_str(&format!("Status:  {}\n", message.status));
        }
        _ => {
            let method = if message.method_raw.is_empty() {
                message.method.to_string()
            } else {
                message.method_raw.clone()
            };
            out.push_str(&format!("Method:  {method}\n"));
            out.push_str(&format!("URI:     {}\n", message.uri.as_deref().unwrap_or("")));
            if let Some(host) = &message.host {
                out.push_str(&format!("Host:    {host}\n"));
            }
            if let Some(port) = &message.port {
                out.push_str(&format!("Port:    {port}\n"));
            }
        }
    }
    out.push_str(&format!("Version: HTTP/{}.{}\n", message.major, message.minor));
    out.push_str(&format!("Keep-Alive: {}\n", message.should_keep_alive));
    if message.multipart {
        out.push_str("Multipart: true\n");
    }

    out.push_str(&format!("\n--- Headers ({}) ---\n", message.headers.len()));
    for header in &message.headers {
        out.push_str(&format!("  {}: {}\n", header.name, header.value));
    }

    match &message.body {
        Some(body) => {
            out.push_str(&format!("\n--- Body ({} bytes) ---\n", body.len()));
            match std::str::from_utf8(body) {
                Ok(s) => out.push_str(s),
                Err(_) => {
                    out.push_str(&format!("<binary data: {} bytes>", body.len()));
                }
            }
            out.push('\n');
        }
        None => {
            out.push_str("\n--- No Body ---\n");
        }
    }

    out.push_str("====================\n");
    out
}

/// Render only the request/status line and headers (no body).
pub fn format_headers_only(message: &ParsedMessage) -> String {
    let mut out = String::with_capacity(64 + message.headers.len() * 40);

    match message.message_type {
        Some(MessageType::Response) => {
            out.push_str(&format!(
                "HTTP/{}.{} {}\n",
                message.major, message.minor, message.status
            ));
        }
        _ => {
            let method = if message.method_raw.is_empty() {
                message.method.to_string()
            } else {
                message.method_raw.clone()
            };
            out.push_str(&format!(
                "{} {} HTTP/{}.{}\n",
                method,
                message.uri.as_deref().unwrap_or(""),
                message.major,
                message.minor
            ));
        }
    }

    for header in &message.headers {
        out.push_str(&format!("{}: {}\n", header.name, header.value));
    }

    out
}
