//! Tests for the HTTP fetcher against a one-shot loopback server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::{Read, Write};
use std::net::TcpListener;

use ranger_bootstrap::application::ports::ArtifactFetcher;
use ranger_bootstrap::domain::{FetchError, exit_code};
use ranger_bootstrap::infra::fetch::UreqFetcher;

/// Answer exactly one request with `response` and return a pre-signed style
/// URL pointing at the listener.
fn serve_once(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(&response);
        }
    });
    format!("http://{addr}/credentials.zip?X-Amz-Signature=s3cr3t")
}

fn http_response(status: &str, body: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    out.extend_from_slice(body);
    out
}

#[test]
fn test_http_200_streams_body_to_dest() {
    let url = serve_once(http_response("200 OK", b"PK\x03\x04 credentials"));
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("tmp/credentials.zip");

    let n = UreqFetcher::new(false).fetch(&url, &dest).expect("fetch");

    assert_eq!(n, 16);
    assert_eq!(std::fs::read(&dest).unwrap(), b"PK\x03\x04 credentials");
}

#[test]
fn test_http_404_fails_like_curl_fail_flag() {
    let url = serve_once(http_response("404 Not Found", b"<Error/>"));
    let dir = tempfile::tempdir().expect("tempdir");

    let err = UreqFetcher::new(false)
        .fetch(&url, &dir.path().join("credentials.zip"))
        .unwrap_err();

    assert_eq!(exit_code(&err), 22);
    let fetch_err = err.downcast_ref::<FetchError>().expect("typed error");
    assert!(matches!(fetch_err, FetchError::HttpStatus { status: 404, .. }));
}

#[test]
fn test_http_error_message_does_not_leak_signature() {
    let url = serve_once(http_response("403 Forbidden", b""));
    let dir = tempfile::tempdir().expect("tempdir");

    let err = UreqFetcher::new(false)
        .fetch(&url, &dir.path().join("credentials.zip"))
        .unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("403"), "got: {msg}");
    assert!(!msg.contains("s3cr3t"), "got: {msg}");
}

#[test]
fn test_connection_refused_maps_to_couldnt_connect() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let dir = tempfile::tempdir().expect("tempdir");

    let err = UreqFetcher::new(false)
        .fetch(
            &format!("http://127.0.0.1:{port}/ranger.tar.gz"),
            &dir.path().join("ranger.tar.gz"),
        )
        .unwrap_err();

    assert_eq!(exit_code(&err), 7);
}
