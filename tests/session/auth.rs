//! Authentication Tests
//!
//! Credentials in the connection URI must reach every request to that host
//! and port, including the server-issued links that carry none.

use crate::common::*;
use parking_lot::Mutex;
use serde_json::json;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

// "arthur:excalibur" in base64
const ARTHUR: &str = "Basic YXJ0aHVyOmV4Y2FsaWJ1cg==";

/// Minimal HTTP/1.1 server that answers 401 to unauthenticated requests.
struct GuardedServer {
    base: String,
    seen: Arc<Mutex<Vec<(String, bool)>>>,
}

impl GuardedServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (server_base, server_seen) = (base.clone(), Arc::clone(&seen));
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => serve(stream, &server_base, &server_seen),
                    Err(_) => break,
                }
            }
        });
        Self { base, seen }
    }

    /// Connection URI for the server with embedded credentials.
    fn uri_with_credentials(&self) -> String {
        self.base.replacen("http://", "http://arthur:excalibur@", 1)
    }

    fn seen(&self) -> Vec<(String, bool)> {
        self.seen.lock().clone()
    }
}

fn serve(mut stream: TcpStream, base: &str, seen: &Mutex<Vec<(String, bool)>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut authorized = false;
    let mut length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("authorization") {
                authorized = value.trim() == ARTHUR;
            } else if name.eq_ignore_ascii_case("content-length") {
                length = value.trim().parse().unwrap();
            }
        }
    }
    let mut body = vec![0; length];
    reader.read_exact(&mut body).unwrap();

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    seen.lock().push((format!("{} {}", method, path), authorized));

    let begin = format!("{}/db/data/transaction", base);
    let (status, location, body) = if !authorized {
        ("401 Unauthorized", None, json!({}))
    } else {
        match (method.as_str(), path.as_str()) {
            ("GET", "/") => ("200 OK", None, json!({ "data": format!("{}/db/data/", base) })),
            ("GET", "/db/data/") => ("200 OK", None, json!({ "transaction": begin })),
            ("POST", "/db/data/transaction") => (
                "201 Created",
                Some(format!("{}/1", begin)),
                json!({ "commit": format!("{}/1/commit", begin), "results": [], "errors": [] }),
            ),
            ("POST", "/db/data/transaction/1/commit") | ("POST", "/db/data/transaction/commit") => (
                "200 OK",
                None,
                json!({
                    "results": [{"columns": ["x"], "data": [{"rest": [1]}]}],
                    "errors": [],
                }),
            ),
            _ => ("404 Not Found", None, json!({})),
        }
    };

    let body = body.to_string();
    let location = location
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let _ = write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
        status,
        body.len(),
        location,
        body
    );
}

#[test]
fn credentials_reach_every_request() {
    init_tracing();
    let server = GuardedServer::start();

    let session = Session::open(&server.uri_with_credentials()).unwrap();
    let mut tx = session.create_transaction();
    tx.append("CREATE (a)", None).unwrap();
    tx.execute().unwrap();
    tx.append("RETURN 1 AS x", None).unwrap();
    let results = tx.commit().unwrap();

    assert_eq!(results[0][0].get("x"), Some(&Value::Int(1)));
    assert_eq!(
        server.seen(),
        vec![
            ("GET /".to_string(), true),
            ("GET /db/data/".to_string(), true),
            ("POST /db/data/transaction".to_string(), true),
            ("POST /db/data/transaction/1/commit".to_string(), true),
        ]
    );
}

#[test]
fn one_shot_commit_is_authenticated() {
    init_tracing();
    let server = GuardedServer::start();

    let session = Session::open(&server.uri_with_credentials()).unwrap();
    let records = session.execute_committed("RETURN 1 AS x", None).unwrap();

    assert_eq!(records[0].get("x"), Some(&Value::Int(1)));
    assert_eq!(
        server.seen().last(),
        Some(&("POST /db/data/transaction/commit".to_string(), true))
    );
    assert!(server.seen().iter().all(|(_, authorized)| *authorized));
}

#[test]
fn missing_credentials_are_rejected() {
    init_tracing();
    let server = GuardedServer::start();

    let err = Session::open(&server.base).unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Status { status: 401, .. })
    ));
    assert_eq!(server.seen(), vec![("GET /".to_string(), false)]);
}
