//! Tests for the HTTP probe against a one-shot local server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use cmdtool_types::config::BackendConfig;
use cmdtool_types::error::ShellError;
use cmdtool_types::probe::{BackendProbe, ProbeValue};

use super::*;

/// Helper: serve exactly one HTTP response and hand back the raw request.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    let handle = std::thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let n = conn.read(&mut buf).unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).into_owned();
        let reply = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        conn.write_all(reply.as_bytes()).unwrap();
        request
    });
    (addr, handle)
}

#[test]
fn request_url_shape() {
    let probe = HttpProbe::new(&BackendConfig::new("localhost:5001")).unwrap();
    assert_eq!(
        probe.request_url("commands"),
        "http://localhost:5001/api/v0/commands?flags=true"
    );
    assert_eq!(
        probe.request_url("/bootstrap/list"),
        "http://localhost:5001/api/v0/bootstrap/list?flags=true"
    );
}

#[test]
fn endpoint_reports_address() {
    let probe = HttpProbe::new(&BackendConfig::new("10.0.0.1:5001")).unwrap();
    assert_eq!(probe.endpoint(), "10.0.0.1:5001");
}

#[test]
fn query_decodes_object() {
    let (addr, handle) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"Name":"ipfs","Subcommands":[],"Run":null}"#,
    );
    let probe = HttpProbe::new(&BackendConfig::new(addr)).unwrap();
    let resp = probe.query("commands").unwrap();
    assert_eq!(resp["Name"], ProbeValue::Scalar("ipfs".into()));
    assert_eq!(resp["Subcommands"], ProbeValue::List(Vec::new()));
    assert_eq!(resp["Run"], ProbeValue::Absent);

    let request = handle.join().unwrap();
    assert!(request.starts_with("POST /api/v0/commands?flags=true "));
}

#[test]
fn http_error_status_is_backend_error() {
    let (addr, handle) = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
    let probe = HttpProbe::new(&BackendConfig::new(addr)).unwrap();
    match probe.query("commands") {
        Err(ShellError::Backend(msg)) => assert!(msg.contains("500")),
        other => panic!("expected backend error, got {other:?}"),
    }
    handle.join().unwrap();
}

#[test]
fn non_object_reply_is_backend_error() {
    let (addr, handle) = serve_once("HTTP/1.1 200 OK", "[1,2,3]");
    let probe = HttpProbe::new(&BackendConfig::new(addr)).unwrap();
    assert!(matches!(
        probe.query("commands"),
        Err(ShellError::Backend(_))
    ));
    handle.join().unwrap();
}

#[test]
fn invalid_json_is_json_error() {
    let (addr, handle) = serve_once("HTTP/1.1 200 OK", "not json");
    let probe = HttpProbe::new(&BackendConfig::new(addr)).unwrap();
    assert!(matches!(probe.query("commands"), Err(ShellError::Json(_))));
    handle.join().unwrap();
}

#[test]
fn unreachable_backend_is_backend_error() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let tmp = TcpListener::bind("127.0.0.1:0").unwrap();
        tmp.local_addr().unwrap().port()
    };
    let probe = HttpProbe::new(&BackendConfig::new(format!("127.0.0.1:{port}"))).unwrap();
    assert!(matches!(
        probe.query("commands"),
        Err(ShellError::Backend(_))
    ));
}
