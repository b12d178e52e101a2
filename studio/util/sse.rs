use std::io::Write;

use serde::Serialize;

// ---------------------------------------------------------------------------
// SSE framing helpers
// ---------------------------------------------------------------------------

/// Raw HTTP head for an SSE stream, written straight to the socket because
/// tiny_http has no streaming response body.
pub const SSE_HEAD: &str = "HTTP/1.1 200 OK\r\n\
                            Content-Type: text/event-stream\r\n\
                            Cache-Control: no-cache\r\n\
                            Connection: keep-alive\r\n\
                            X-Accel-Buffering: no\r\n\
                            \r\n";

/// Formats a named SSE event with a JSON data payload.
///
/// Output format (per SSE spec):
/// ```text
/// event: <name>\n
/// data: <json>\n
/// \n
/// ```
pub fn format_sse_event(event_name: &str, json_data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event_name, json_data)
}

/// Serializes `payload` and frames it; `None` if serialization fails.
pub fn sse_json_event<T: Serialize>(event_name: &str, payload: &T) -> Option<String> {
    serde_json::to_string(payload)
        .ok()
        .map(|json| format_sse_event(event_name, &json))
}

/// Keep-alive comment; ignored by EventSource clients.
pub fn format_sse_keepalive() -> &'static str {
    ": ping\n\n"
}

/// Writes a single SSE message to a writer, flushing immediately.
/// Returns `false` if the write failed (client disconnected).
pub fn write_sse<W: Write + ?Sized>(writer: &mut W, msg: &str) -> bool {
    writer.write_all(msg.as_bytes()).is_ok() && writer.flush().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_framing() {
        assert_eq!(format_sse_event("step", "{}"), "event: step\ndata: {}\n\n");
        let framed = sse_json_event("done", &serde_json::json!({"steps": 3})).unwrap();
        assert_eq!(framed, "event: done\ndata: {\"steps\":3}\n\n");
    }

    #[test]
    fn write_sse_reports_success() {
        let mut buf: Vec<u8> = Vec::new();
        assert!(write_sse(&mut buf, format_sse_keepalive()));
        assert_eq!(buf, b": ping\n\n");
    }
}
