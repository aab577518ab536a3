//! HTTP transport seam.
//!
//! [`Transport`] is the only place a request leaves the process. The
//! production implementation is [`UreqTransport`]; status codes are returned
//! as-is and mapped to errors by the dispatcher.

use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use crate::error::NetSuiteError;
use crate::oauth::HttpMethod;

/// Outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Value of the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a request and returns the response, whatever its status.
pub trait Transport {
    /// Send the request.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::Transport`] on network-level failures.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetSuiteError>;
}

/// Sync transport backed by a [`ureq::Agent`].
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with a global request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetSuiteError> {
        let url = request.url.as_str();
        let headers = &request.headers;
        let body = request.body.as_deref().unwrap_or_default();

        let response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call()?,
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call()?,
            HttpMethod::Post => with_headers(self.agent.post(url), headers).send(body)?,
            HttpMethod::Put => with_headers(self.agent.put(url), headers).send(body)?,
            HttpMethod::Patch => with_headers(self.agent.patch(url), headers).send(body)?,
        };

        let status = response.status().as_u16();
        let mut body = response.into_body();
        let body = if status >= 400 {
            body.read_to_string()
                .unwrap_or_else(|_| "(unable to read response body)".to_owned())
        } else {
            body.read_to_string()?
        };

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording transport for tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::{HttpRequest, HttpResponse, Transport};
    use crate::error::NetSuiteError;

    /// Records sent requests and replays queued responses.
    ///
    /// When the queue is empty, responds with `200 {}`.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        sent: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<HttpResponse>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub(crate) fn with_response(self, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(HttpResponse {
                status,
                body: body.to_owned(),
            });
            self
        }

        pub(crate) fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetSuiteError> {
            self.sent.lock().unwrap().push(request.clone());
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(HttpResponse {
                    status: 200,
                    body: "{}".to_owned(),
                });
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_header_lookup_case_insensitive() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "https://example.com".to_owned(),
            headers: vec![("Authorization".to_owned(), "OAuth realm=\"1\"".to_owned())],
            body: None,
        };
        assert_eq!(request.header("authorization"), Some("OAuth realm=\"1\""));
        assert_eq!(request.header("Accept"), None);
    }

    /// Serve one canned HTTP response on a local port and return its URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        url
    }

    fn get(url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn test_ureq_transport_reads_body() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 8\r\nConnection: close\r\n\r\n{\"a\": 1}");
        let transport = UreqTransport::new(Duration::from_secs(5));

        let response = transport.send(&get(url)).unwrap();
        assert_eq!(
            response,
            HttpResponse {
                status: 200,
                body: r#"{"a": 1}"#.to_owned(),
            }
        );
    }

    #[test]
    fn test_truncated_success_body_is_transport_error() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"a\":");
        let transport = UreqTransport::new(Duration::from_secs(5));

        let result = transport.send(&get(url));
        assert!(matches!(result, Err(NetSuiteError::Transport(_))));
    }

    #[test]
    fn test_truncated_error_body_keeps_status() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\n{\"a\":");
        let transport = UreqTransport::new(Duration::from_secs(5));

        let response = transport.send(&get(url)).unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "(unable to read response body)");
    }
}
