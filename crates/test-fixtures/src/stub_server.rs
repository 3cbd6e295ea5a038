//! Minimal HTTP/1.1 listener for exercising the blocking clients.
//!
//! Every request is read in full and counted before the configured
//! behavior runs, and every response closes the connection so a retry
//! always arrives as a new request.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long a stalled connection is held open.
const STALL: Duration = Duration::from_secs(30);

#[derive(Clone, Copy)]
enum Behavior {
    Status(u16),
    NoResponse,
    StalledBody,
}

pub struct StubServer {
    url: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    /// Answer every request with `status` and an empty JSON object.
    pub fn status(status: u16) -> Self {
        Self::start(Behavior::Status(status))
    }

    /// Read the request and never answer.
    pub fn no_response() -> Self {
        Self::start(Behavior::NoResponse)
    }

    /// Send `200 OK` headers promising a body that never arrives.
    pub fn stalled_body() -> Self {
        Self::start(Behavior::StalledBody)
    }

    /// Base URL, e.g. `http://127.0.0.1:41234/v1`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let counter = counter.clone();
                thread::spawn(move || serve(stream, behavior, &counter));
            }
        });
        Self {
            url: format!("http://{addr}/v1"),
            hits,
        }
    }
}

fn serve(mut stream: TcpStream, behavior: Behavior, hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    if read_request(&mut stream).is_none() {
        return;
    }
    hits.fetch_add(1, Ordering::SeqCst);

    match behavior {
        Behavior::Status(code) => {
            let body = "{}";
            let response = format!(
                "HTTP/1.1 {code} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
        Behavior::NoResponse => thread::sleep(STALL),
        Behavior::StalledBody => {
            let head = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 64\r\n\r\n{\"choi";
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.flush();
            thread::sleep(STALL);
        }
    }
}

/// Consume headers and a `Content-Length` body. `None` if the peer went away.
fn read_request(stream: &mut TcpStream) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut received = buf.len() - header_end;
    while received < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        received += n;
    }
    Some(())
}
