//! Remote console integration tests.
//!
//! The panel transport is exercised against a loopback HTTP double; the
//! RCON transport against a port with no listener.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use craftops::config::{PanelSettings, RconSettings};
use craftops::{CraftopsError, PanelConsole, RconConsole, RemoteConsole};

// ============================================================================
// Loopback HTTP double
// ============================================================================

/// Read one HTTP request (headers plus content-length body) off the stream.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some(pos) = text.find("\r\n\r\n") {
            let content_length = text[..pos]
                .lines()
                .find_map(|line| {
                    line.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|value| value.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Answer one request with the given status line and body, returning the
/// raw request that was received.
async fn serve_one(listener: &TcpListener, status: &str, body: &str) -> String {
    let (mut stream, _) = listener.accept().await.unwrap();
    let request = read_request(&mut stream).await;

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();

    request
}

fn panel_settings(base_url: String, timeout: Duration) -> PanelSettings {
    PanelSettings {
        base_url,
        server_id: "1a2b3c4d".to_string(),
        token: "ptlc_secret".to_string(),
        timeout,
    }
}

// ============================================================================
// Panel transport
// ============================================================================

#[tokio::test]
async fn test_panel_send_returns_exact_payload() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let payload = r#"{"status":"ok","players":[]}"#;
    let server = tokio::spawn(async move { serve_one(&listener, "200 OK", payload).await });

    let mut console =
        PanelConsole::new(&panel_settings(base_url, Duration::from_millis(1000))).unwrap();
    let response = console.send("list").await.unwrap();

    assert_eq!(response, payload);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/client/servers/1a2b3c4d/command HTTP/1.1"));
    // Header name casing is the client's choice
    assert!(request
        .to_ascii_lowercase()
        .contains("authorization: bearer ptlc_secret"));
    assert!(request.contains(r#"{"command":"list"}"#));
}

#[tokio::test]
async fn test_panel_one_response_per_send() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        serve_one(&listener, "200 OK", "first").await;
        serve_one(&listener, "200 OK", "second").await;
    });

    let mut console =
        PanelConsole::new(&panel_settings(base_url, Duration::from_millis(1000))).unwrap();

    assert_eq!(console.send("list").await.unwrap(), "first");
    assert_eq!(console.send("list").await.unwrap(), "second");
    console.close().await.unwrap();

    server.await.unwrap();
}

#[tokio::test]
async fn test_panel_non_2xx_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let server =
        tokio::spawn(async move { serve_one(&listener, "403 Forbidden", "forbidden").await });

    let mut console =
        PanelConsole::new(&panel_settings(base_url, Duration::from_millis(1000))).unwrap();
    let err = console.send("list").await.unwrap_err();

    match err {
        CraftopsError::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected HttpStatus, got: {}", other),
    }

    server.await.unwrap();
}

#[tokio::test]
async fn test_panel_timeout_fails_outright() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    // Accept the connection but never answer
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let mut console =
        PanelConsole::new(&panel_settings(base_url, Duration::from_millis(200))).unwrap();
    let err = console.send("list").await.unwrap_err();

    match err {
        CraftopsError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected Http timeout, got: {}", other),
    }

    server.abort();
}

// ============================================================================
// RCON transport
// ============================================================================

#[tokio::test]
async fn test_rcon_connect_refused() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let settings = RconSettings {
        host: "127.0.0.1".to_string(),
        port,
        password: "hunter2".to_string(),
    };

    // connect() fails, so send() is never reachable
    assert!(RconConsole::connect(&settings).await.is_err());
}
