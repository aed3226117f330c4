//! Local stand-in for the router, used by HTTP tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// What the stub saw on one request.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Serves canned responses in order; the last one repeats.
pub(crate) struct StubRouter {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubRouter {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        Self::sequence(vec![(status, body.into())]).await
    }

    pub async fn sequence(responses: Vec<(StatusCode, String)>) -> Self {
        assert!(!responses.is_empty());
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let app = {
            let hits = hits.clone();
            let requests = requests.clone();
            Router::new().fallback(
                move |method: axum::http::Method, headers: HeaderMap, body: String| {
                    let hits = hits.clone();
                    let requests = requests.clone();
                    let responses = responses.clone();
                    async move {
                        let n = hits.fetch_add(1, Ordering::SeqCst);
                        requests.lock().unwrap().push(RecordedRequest {
                            method: method.to_string(),
                            authorization: header(&headers, "authorization"),
                            content_type: header(&headers, "content-type"),
                            body,
                        });
                        responses[n.min(responses.len() - 1)].clone()
                    }
                },
            )
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            hits,
            requests,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

/// URL of a port with nothing listening on it.
pub(crate) async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// URL of a server that answers with `status_line` and then hangs up
/// before sending the promised body.
pub(crate) async fn truncated_body_url(status_line: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let head = format!("HTTP/1.1 {status_line}\r\ncontent-length: 100\r\n\r\n");
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(b"partial").await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

// Drain the request so closing the socket sends FIN rather than RST.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n")
            && buf.len() >= end + 4 + content_length(&text[..end])
        {
            return;
        }
    }
}

fn content_length(request_head: &str) -> usize {
    request_head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
