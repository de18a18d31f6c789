//! Captured HTTP transaction records.

use serde::{Deserialize, Serialize};

/// One logged HTTP transaction: the request and, when captured, its paired
/// response.
///
/// Records are owned by the log store and handed out behind `Rc`; the
/// payload view treats them as read-only. Once a view resolves a record for
/// a given index, it keeps that same reference for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRecord {
    /// Request method (GET, POST, ...).
    pub method: String,

    /// Request URI as captured on the wire.
    pub uri: String,

    /// Response status code, if a response was captured.
    #[serde(default)]
    pub status: Option<u16>,

    /// Request body bytes.
    #[serde(default)]
    pub request_payload: Vec<u8>,

    /// Response body bytes; `None` when no response was captured.
    #[serde(default)]
    pub reply_payload: Option<Vec<u8>>,
}

impl HttpRecord {
    /// Payload bytes for the requested side.
    ///
    /// An uncaptured reply renders as an empty body.
    pub fn payload(&self, show_reply: bool) -> &[u8] {
        if show_reply {
            self.reply_payload.as_deref().unwrap_or(&[])
        } else {
            &self.request_payload
        }
    }

    /// One-line header describing the requested side.
    pub fn header_line(&self, show_reply: bool) -> String {
        if show_reply {
            match self.status {
                Some(status) => format!("HTTP {status}"),
                None => "HTTP (no response captured)".to_string(),
            }
        } else {
            format!("{} {}", self.method, self.uri)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HttpRecord {
        HttpRecord {
            method: "POST".to_string(),
            uri: "/api/login".to_string(),
            status: Some(403),
            request_payload: b"user=a&pass=b".to_vec(),
            reply_payload: Some(b"denied".to_vec()),
        }
    }

    #[test]
    fn payload_selects_request_side() {
        assert_eq!(record().payload(false), b"user=a&pass=b");
    }

    #[test]
    fn payload_selects_reply_side() {
        assert_eq!(record().payload(true), b"denied");
    }

    #[test]
    fn missing_reply_is_empty() {
        let mut rec = record();
        rec.reply_payload = None;
        assert!(rec.payload(true).is_empty());
    }

    #[test]
    fn header_line_shows_request_line() {
        assert_eq!(record().header_line(false), "POST /api/login");
    }

    #[test]
    fn header_line_shows_status() {
        assert_eq!(record().header_line(true), "HTTP 403");
    }

    #[test]
    fn header_line_marks_missing_response() {
        let mut rec = record();
        rec.status = None;
        assert_eq!(rec.header_line(true), "HTTP (no response captured)");
    }

    #[test]
    fn record_round_trips_through_json() {
        let rec = record();
        let json = serde_json::to_string(&rec).unwrap();
        let back: HttpRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
