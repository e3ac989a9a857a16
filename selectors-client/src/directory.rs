//! Signature directory access
//!
//! `SignatureDirectory` is the seam to the external service. `HttpDirectory` talks to a
//! 4byte-compatible REST API:
//! - `GET  {base}/signatures/?hex_signature=<hex>` returns one page of matches
//! - `POST {base}/signatures/` with `{"text_signature": ...}` creates a mapping
//!
//! Status and body mapping is kept in plain functions so it can be tested without sockets.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::{ClientError, ClientResult},
    types::{SearchResponse, SignatureRecord},
    validation::{HexSignature, TextSignature},
};

pub trait SignatureDirectory {
    /// Read the first page of records whose selector equals `hex`.
    fn search(&self, hex: &HexSignature) -> ClientResult<SearchResponse>;

    /// Register `text`; the service echoes the stored record back.
    fn create(&self, text: &TextSignature) -> ClientResult<SignatureRecord>;
}

/// Blocking HTTP client for the directory REST API.
pub struct HttpDirectory {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("selectors/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn signatures_url(&self) -> String {
        format!("{}/signatures/", self.base_url)
    }
}

impl SignatureDirectory for HttpDirectory {
    fn search(&self, hex: &HexSignature) -> ClientResult<SearchResponse> {
        let url = self.signatures_url();
        debug!(url = %url, hex_signature = %hex, "searching signature directory");

        let resp = self
            .http
            .get(&url)
            .query(&[("hex_signature", hex.as_str())])
            .send()
            .map_err(|e| {
                warn!(error = %e, "signature search failed");
                ClientError::from(e)
            })?;
        let status = resp.status().as_u16();
        let body = resp.text()?;

        parse_search_response(status, &body).inspect_err(|e| {
            warn!(status, error = %e, "signature search rejected");
        })
    }

    fn create(&self, text: &TextSignature) -> ClientResult<SignatureRecord> {
        #[derive(Serialize)]
        struct Body<'a> {
            text_signature: &'a str,
        }

        let url = self.signatures_url();
        debug!(url = %url, text_signature = %text, "registering signature");

        let resp = self
            .http
            .post(&url)
            .json(&Body {
                text_signature: text.as_str(),
            })
            .send()
            .map_err(|e| {
                warn!(error = %e, "signature registration failed");
                ClientError::from(e)
            })?;
        let status = resp.status().as_u16();
        let body = resp.text()?;

        parse_create_response(status, &body).inspect_err(|e| {
            warn!(status, error = %e, "signature registration rejected");
        })
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a search reply. Any non-2xx status is a network failure.
pub fn parse_search_response(status: u16, body: &str) -> ClientResult<SearchResponse> {
    if !is_success(status) {
        return Err(ClientError::network(
            Some(status),
            format!("HTTP error {status}"),
        ));
    }
    serde_json::from_str(body).map_err(|e| {
        ClientError::network(Some(status), format!("unexpected response body: {e}"))
    })
}

/// Map a create reply. Rejections carry the service's field message when it sent one.
pub fn parse_create_response(status: u16, body: &str) -> ClientResult<SignatureRecord> {
    if !is_success(status) {
        let message = rejection_message(body).unwrap_or_else(|| format!("HTTP error {status}"));
        return Err(ClientError::Api { status, message });
    }
    serde_json::from_str(body).map_err(|e| {
        ClientError::network(Some(status), format!("unexpected response body: {e}"))
    })
}

/// Field-level errors for the signature field, e.g. `{"text_signature": ["already exists"]}`.
fn rejection_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Rejection {
        #[serde(default)]
        text_signature: Vec<String>,
    }

    let rejection: Rejection = serde_json::from_str(body).ok()?;
    if rejection.text_signature.is_empty() {
        None
    } else {
        Some(rejection.text_signature.join("; "))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// In-memory directory that answers with canned replies and records every call.
    pub struct RecordingDirectory {
        pub search_reply: ClientResult<SearchResponse>,
        pub create_reply: ClientResult<SignatureRecord>,
        pub searches: RefCell<Vec<String>>,
        pub creates: RefCell<Vec<String>>,
    }

    impl RecordingDirectory {
        pub fn new(
            search_reply: ClientResult<SearchResponse>,
            create_reply: ClientResult<SignatureRecord>,
        ) -> Self {
            Self {
                search_reply,
                create_reply,
                searches: RefCell::new(Vec::new()),
                creates: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.searches.borrow().len() + self.creates.borrow().len()
        }
    }

    impl SignatureDirectory for RecordingDirectory {
        fn search(&self, hex: &HexSignature) -> ClientResult<SearchResponse> {
            self.searches.borrow_mut().push(hex.as_str().to_string());
            self.search_reply.clone()
        }

        fn create(&self, text: &TextSignature) -> ClientResult<SignatureRecord> {
            self.creates.borrow_mut().push(text.as_str().to_string());
            self.create_reply.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{lookup, register};
    use crate::types::Outcome;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };

    const RECORD: &str = r#"{"id": 145, "created_at": "2016-07-09T03:58:28.234977Z",
        "text_signature": "transfer(address,uint256)", "hex_signature": "0xa9059cbb",
        "bytes_signature": "©\u0005\u009c»"}"#;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let dir = HttpDirectory::new("https://example.test/api/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(dir.base_url(), "https://example.test/api/v1");
        assert_eq!(dir.signatures_url(), "https://example.test/api/v1/signatures/");
    }

    #[test]
    fn test_search_success() {
        let body = format!(r#"{{"count": 1, "next": null, "previous": null, "results": [{RECORD}]}}"#);
        let page = parse_search_response(200, &body).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].hex_signature, "0xa9059cbb");
    }

    #[test]
    fn test_search_non_2xx_is_network_error_with_status() {
        let err = parse_search_response(503, "<html>unavailable</html>").unwrap_err();
        assert_eq!(err, ClientError::network(Some(503), "HTTP error 503"));
    }

    #[test]
    fn test_search_non_json_success_is_network_error() {
        let err = parse_search_response(200, "<html></html>").unwrap_err();
        assert!(matches!(err, ClientError::Network { status: Some(200), .. }));
    }

    #[test]
    fn test_create_success_echoes_record() {
        let record = parse_create_response(201, RECORD).unwrap();
        assert_eq!(record.id, 145);
        assert_eq!(record.text_signature, "transfer(address,uint256)");
        assert_eq!(record.hex_signature, "0xa9059cbb");
    }

    #[test]
    fn test_create_rejection_surfaces_field_message() {
        let err = parse_create_response(400, r#"{"text_signature": ["already exists"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "already exists");
        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                message: "already exists".into()
            }
        );
    }

    #[test]
    fn test_create_rejection_joins_multiple_messages() {
        let body = r#"{"text_signature": ["too long", "bad characters"]}"#;
        let err = parse_create_response(400, body).unwrap_err();
        assert_eq!(err.to_string(), "too long; bad characters");
    }

    #[test]
    fn test_create_rejection_without_field_falls_back_to_status() {
        let err = parse_create_response(500, "Internal Server Error").unwrap_err();
        assert_eq!(err.to_string(), "HTTP error 500");

        let err = parse_create_response(429, r#"{"detail": "throttled"}"#).unwrap_err();
        assert_eq!(err.to_string(), "HTTP error 429");
        assert_eq!(err.status(), Some(429));
    }

    /// Accept one connection, answer with `status_line` and `body`, return the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8(buf).unwrap()
        });
        (format!("http://{addr}/api/v1"), handle)
    }

    #[test]
    fn test_search_sends_hex_filter_on_signatures_path() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"count": 0, "next": null, "previous": null, "results": []}"#,
        );
        let dir = HttpDirectory::new(base, Duration::from_secs(5)).unwrap();

        let outcome = lookup(&dir, "0xA9059CBB").unwrap();
        let request = server.join().unwrap();

        assert_eq!(outcome, Outcome::NoMatches);
        assert!(
            request.starts_with("GET /api/v1/signatures/?hex_signature=0xA9059CBB HTTP/1.1\r\n"),
            "{request}"
        );
    }

    #[test]
    fn test_create_posts_json_body_and_maps_rejection() {
        let (base, server) = serve_once(
            "HTTP/1.1 400 Bad Request",
            r#"{"text_signature": ["already exists"]}"#,
        );
        let dir = HttpDirectory::new(base, Duration::from_secs(5)).unwrap();

        let err = register(&dir, "transfer(address,uint256)").unwrap_err();
        let request = server.join().unwrap();

        assert_eq!(err.to_string(), "already exists");
        assert!(request.starts_with("POST /api/v1/signatures/ HTTP/1.1\r\n"), "{request}");
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"text_signature":"transfer(address,uint256)"}"#), "{request}");
    }

    #[test]
    fn test_refused_connection_is_network_error_without_status() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let dir = HttpDirectory::new(format!("http://{addr}/api/v1"), Duration::from_secs(5)).unwrap();

        let err = lookup(&dir, "0xa9059cbb").unwrap_err();
        assert!(matches!(err, ClientError::Network { status: None, .. }), "{err:?}");
    }
}
