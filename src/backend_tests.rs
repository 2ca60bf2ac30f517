//! Backend tests against a local HTTP server serving canned responses

use crossbeam_channel::unbounded;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::backend::{run_backend, BackendConfig};
use crate::protocol::{BackendAction, GuiEvent};
use crate::state::{ChatSession, APOLOGIES};

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Accept one connection, answer it with `status` and `body`, and return the raw request.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("write response");
        let _ = stream.flush();
        request
    });

    (format!("http://{}/endpoint", addr), handle)
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).expect("read request");
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

fn spawn_backend(
    reply_endpoint: String,
    feedback_endpoint: String,
) -> (
    crossbeam_channel::Sender<BackendAction>,
    crossbeam_channel::Receiver<GuiEvent>,
    JoinHandle<()>,
) {
    let (action_tx, action_rx) = unbounded::<BackendAction>();
    let (event_tx, event_rx) = unbounded::<GuiEvent>();
    let handle = thread::spawn(move || {
        run_backend(
            action_rx,
            event_tx,
            BackendConfig {
                reply_endpoint,
                feedback_endpoint,
            },
        );
    });
    (action_tx, event_rx, handle)
}

#[test]
fn test_reply_is_delivered_as_event() {
    let (url, server) = serve_once("200 OK", r#"{"response":"Hello! Let's study.","timestamp":"10:05 AM"}"#);
    let (action_tx, event_rx, backend) = spawn_backend(url, "http://127.0.0.1:9/feedback".into());

    action_tx
        .send(BackendAction::SendMessage {
            message: "hi".into(),
            session_id: "session_123".into(),
        })
        .unwrap();

    let event = event_rx.recv_timeout(EVENT_TIMEOUT).expect("reply event");
    assert_eq!(
        event,
        GuiEvent::ReplyReceived {
            text: "Hello! Let's study.".into(),
            timestamp: Some("10:05 AM".into()),
        }
    );

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /endpoint"));
    assert!(request.contains(r#""message":"hi""#));
    assert!(request.contains(r#""session_id":"session_123""#));

    drop(action_tx);
    backend.join().expect("backend exits when the UI goes away");
}

#[test]
fn test_server_error_becomes_one_apology() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
    let (action_tx, event_rx, _backend) = spawn_backend(url, "http://127.0.0.1:9/feedback".into());

    let mut session = ChatSession::seeded("session_123".into(), 1);
    let action = session.submit("Explain entropy").expect("action");
    assert!(!session.input_enabled());
    action_tx.send(action).unwrap();

    let event = event_rx.recv_timeout(EVENT_TIMEOUT).expect("failure event");
    assert!(matches!(&event, GuiEvent::ReplyFailed(reason) if reason.contains("500")));
    session.handle_event(event);

    assert_eq!(session.transcript.len(), 2);
    let last = session.transcript.last().unwrap();
    assert!(APOLOGIES.contains(&last.text.as_str()));
    assert!(session.input_enabled());
    server.join().unwrap();
}

#[test]
fn test_malformed_json_is_a_failure() {
    let (url, server) = serve_once("200 OK", "<html>not json</html>");
    let (action_tx, event_rx, _backend) = spawn_backend(url, "http://127.0.0.1:9/feedback".into());

    action_tx
        .send(BackendAction::SendMessage {
            message: "hi".into(),
            session_id: "s".into(),
        })
        .unwrap();

    let event = event_rx.recv_timeout(EVENT_TIMEOUT).expect("failure event");
    assert!(matches!(event, GuiEvent::ReplyFailed(reason) if reason.contains("malformed")));
    server.join().unwrap();
}

#[test]
fn test_feedback_is_posted() {
    let (url, server) = serve_once("200 OK", "{}");
    let (action_tx, event_rx, _backend) = spawn_backend("http://127.0.0.1:9/reply".into(), url);

    action_tx
        .send(BackendAction::SubmitFeedback {
            rating: 5,
            comment: "clear explanations".into(),
        })
        .unwrap();

    let event = event_rx.recv_timeout(EVENT_TIMEOUT).expect("feedback event");
    assert_eq!(event, GuiEvent::FeedbackSubmitted { rating: 5 });

    let request = server.join().unwrap();
    assert!(request.contains(r#""rating":5"#));
    assert!(request.contains(r#""comment":"clear explanations""#));
}

#[test]
fn test_invalid_endpoint_fails_every_action() {
    let (action_tx, event_rx, backend) =
        spawn_backend("not a url".into(), "http://127.0.0.1:9/feedback".into());

    action_tx
        .send(BackendAction::SendMessage {
            message: "hi".into(),
            session_id: "s".into(),
        })
        .unwrap();
    action_tx
        .send(BackendAction::SubmitFeedback {
            rating: 3,
            comment: String::new(),
        })
        .unwrap();

    assert!(matches!(
        event_rx.recv_timeout(EVENT_TIMEOUT),
        Ok(GuiEvent::ReplyFailed(_))
    ));
    assert!(matches!(
        event_rx.recv_timeout(EVENT_TIMEOUT),
        Ok(GuiEvent::FeedbackFailed(_))
    ));

    drop(action_tx);
    backend.join().unwrap();
}
