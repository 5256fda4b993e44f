// tests/session_lifecycle.rs
//
// End-to-end walkthroughs of the session lifecycle against a
// scripted native transport.

use std::sync::Arc;

use bytes::Bytes;

use quic_session::constants::state::IDX_STATE_STREAM_OPEN_ALLOWED;
use quic_session::test_utils::{MockStream, MockTransport};
use quic_session::{
    Capabilities, CloseKind, CloseNotice, Endpoint, HandshakeInfo, OcspExchange, OpenOptions,
    Session, SessionError, SessionEvent, SessionOptions,
};

fn new_session(options: SessionOptions) -> (Session, MockTransport, Arc<Endpoint>) {
    let transport = MockTransport::new(1);
    let endpoint = Arc::new(Endpoint::new(Capabilities::default()).unwrap());
    let session = Session::new(Box::new(transport.clone()), Arc::clone(&endpoint), options)
        .unwrap();
    (session, transport, endpoint)
}

fn handshake_info(alpn: &str) -> HandshakeInfo {
    HandshakeInfo {
        servername: Some("example.com".to_string()),
        alpn: Some(alpn.to_string()),
        cipher_name: "TLS_AES_128_GCM_SHA256".to_string(),
        cipher_version: "TLSv1.3".to_string(),
        max_packet_length: 1350,
        validation_error_reason: None,
        validation_error_code: None,
        early_data: true,
    }
}

#[test]
fn test_handshake_selects_http3_handler() {
    // Scenario: construct with ALPN "h3", fire handshake completion,
    // and expect the HTTP/3 hooks instead of the default no-op set.
    let (mut session, _transport, _endpoint) =
        new_session(SessionOptions::client().with_alpn("h3"));
    assert_eq!(session.application_protocol().name(), "h3");

    session.on_handshake_complete(handshake_info("h3"));

    assert_eq!(session.alpn(), Some("h3"));
    assert_eq!(session.servername(), Some("example.com"));
    assert_eq!(session.cipher().unwrap().version, "TLSv1.3");
    assert!(session.early_data());
    assert_eq!(session.application_protocol().name(), "h3");
    assert_eq!(session.handshake().try_result(), Some(Ok(())));
}

#[test]
fn test_open_before_streams_allowed_is_rejected() {
    // Scenario: open({unidirectional: true}) on a fresh session before
    // the transport allows stream opening.
    let (mut session, _transport, _endpoint) = new_session(SessionOptions::client());

    let err = session.open(OpenOptions::unidirectional()).unwrap_err();
    assert!(matches!(err, SessionError::InvalidState { .. }));
    assert_eq!(session.stream_count(), 0);

    // The failed call left the session untouched.
    assert!(!session.destroyed());
    assert!(!session.closing());
}

#[test]
fn test_datagram_scenarios() {
    // Scenario: empty string returns false with zero native calls;
    // "hi" is converted to bytes and reaches the native layer.
    let (mut session, transport, _endpoint) = new_session(SessionOptions::client());

    assert_eq!(session.datagram("").unwrap(), false);
    assert!(transport.sent_datagrams().is_empty());

    assert_eq!(session.datagram("hi").unwrap(), true);
    assert_eq!(transport.sent_datagrams(), vec![Bytes::from_static(b"hi")]);
}

#[test]
fn test_application_error_close_rejects_and_destroys_streams() {
    // Scenario: native close with errorCode=42, APPLICATION type.
    let (mut session, transport, endpoint) = new_session(SessionOptions::client());
    session.on_handshake_complete(handshake_info("hq-interop"));

    transport.set_flag(IDX_STATE_STREAM_OPEN_ALLOWED, true);
    let stream = MockStream::new(4);
    transport.push_stream(stream.clone());
    let stream_id = session.open(OpenOptions::bidirectional()).unwrap();

    let closed = session.closed();
    session.on_close(CloseNotice {
        kind: CloseKind::Application {
            code: 42,
            reason: None,
        },
        silent: false,
        stateless_reset: false,
    });

    assert_eq!(
        closed.try_result(),
        Some(Err(SessionError::Application {
            code: 42,
            reason: None
        }))
    );
    assert_eq!(stream.destroy_count(), 1);
    assert_eq!(stream.destroy_code(), Some(Some(42)));
    assert!(session.stream(stream_id).is_none());
    assert!(!endpoint.has_session(session.id()));
}

#[test]
fn test_full_client_lifecycle() {
    let (mut session, transport, endpoint) = new_session(
        SessionOptions::client()
            .with_alpn("h3")
            .with_servername("example.com"),
    );
    assert!(endpoint.has_session(session.id()));

    // Handshake completes; stream opening becomes possible.
    session.on_handshake_complete(handshake_info("h3"));
    transport.set_flag(IDX_STATE_STREAM_OPEN_ALLOWED, true);

    // Local request stream with headers dispatched on the next turn.
    let stream = MockStream::new(0);
    transport.push_stream(stream.clone());
    let stream_id = session
        .open(
            OpenOptions::bidirectional()
                .with_headers(vec![(":method".to_string(), "GET".to_string())]),
        )
        .unwrap();
    assert!(session.stream(stream_id).is_some());
    assert!(session.poll_event().is_none());
    assert_eq!(stream.sent_headers().len(), 1);

    // Peer pushes a stream; under h3 the event waits for headers.
    session.on_stream_created(Box::new(MockStream::new(3)));
    assert!(session.poll_event().is_none());
    session.on_stream_headers(3);
    assert_eq!(session.poll_event(), Some(SessionEvent::Stream { id: 3 }));

    // Datagram traffic in both directions.
    assert!(session.datagram("ping").unwrap());
    session.on_datagram(Bytes::from_static(b"pong"), false);
    assert_eq!(
        session.poll_event(),
        Some(SessionEvent::Datagram {
            payload: Bytes::from_static(b"pong"),
            early: false
        })
    );

    // Session ticket for resumption.
    session.on_session_ticket(Bytes::from_static(b"ticket"), Bytes::from_static(b"tp"));
    assert_eq!(session.poll_event(), Some(SessionEvent::SessionTicket));

    // Graceful close: one native request, settled on native completion.
    let closed = session.close();
    assert_eq!(transport.graceful_close_count(), 1);
    session.close();
    assert_eq!(transport.graceful_close_count(), 1);
    session.on_close(CloseNotice::clean());

    assert_eq!(closed.try_result(), Some(Ok(())));
    assert!(session.destroyed());
    assert_eq!(session.stream_count(), 0);
    assert!(!endpoint.has_session(session.id()));
    // Final stats survive detachment.
    assert!(session.stats().detached());
}

#[test]
fn test_cancel_wins_over_graceful_close() {
    let (mut session, transport, _endpoint) = new_session(SessionOptions::client());

    let closed = session.close();
    assert_eq!(transport.graceful_close_count(), 1);
    assert!(!closed.is_settled());

    session.cancel(SessionError::Internal("operator abort".to_string()));
    assert!(session.destroyed());
    assert_eq!(
        closed.try_result(),
        Some(Err(SessionError::Internal("operator abort".to_string())))
    );
}

#[test]
fn test_server_ocsp_interception_round_trip() {
    let mut options = SessionOptions::server();
    options.ocsp = true;
    let (mut session, _transport, _endpoint) = new_session(options);

    let delivered = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    session.on_ocsp_request(
        Bytes::from_static(b"cert"),
        Bytes::from_static(b"issuer"),
        Box::new(move |response| {
            sink.lock().unwrap().push(response);
        }),
    );

    let exchange = session.ocsp().try_result().unwrap().unwrap();
    match exchange {
        OcspExchange::Request(request) => {
            assert_eq!(request.issuer().as_ref(), b"issuer");
            request
                .respond_with(Some(Bytes::from_static(b"ocsp-response")))
                .unwrap();
            // Second response attempt is rejected.
            assert!(request.respond_with(None).is_err());
        }
        OcspExchange::Response(_) => panic!("server side expects a request"),
    }
    assert_eq!(delivered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_awaiting_handshake_and_close() {
    let (mut session, _transport, _endpoint) =
        new_session(SessionOptions::client().with_alpn("h3"));

    let mut handshake = session.handshake();
    let mut closed = session.closed();

    session.on_handshake_complete(handshake_info("h3"));
    handshake.wait().await.unwrap();

    session.on_close(CloseNotice::clean());
    closed.wait().await.unwrap();
}

#[tokio::test]
async fn test_awaiting_clienthello_interception() {
    let mut options = SessionOptions::server();
    options.client_hello = true;
    let (mut session, _transport, _endpoint) = new_session(options);

    let mut pending = session.clienthello();
    session.on_client_hello(
        Some("h3".to_string()),
        Some("example.com".to_string()),
        Vec::new(),
        Box::new(|_context| {}),
    );

    let hello = pending.wait().await.unwrap();
    assert_eq!(hello.servername(), Some("example.com"));
    hello.done(None).unwrap();
}
