// tests/property_tests.rs
//
// Property tests over the shared-buffer views and datagram payload
// conversion.

use std::sync::Arc;

use proptest::prelude::*;

use quic_session::constants::state::{self, STATE_LEN};
use quic_session::constants::stats::STATS_LEN;
use quic_session::test_utils::MockTransport;
use quic_session::{
    Capabilities, DatagramPayload, Endpoint, Session, SessionOptions, StateBuffer, StatsBuffer,
    TextEncoding,
};

fn new_session() -> (Session, MockTransport) {
    let transport = MockTransport::new(1);
    let endpoint = Arc::new(Endpoint::new(Capabilities::default()).unwrap());
    let session = Session::new(
        Box::new(transport.clone()),
        endpoint,
        SessionOptions::client(),
    )
    .unwrap();
    (session, transport)
}

// Strategy for generating flag subsets of the state block
fn flag_sets() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), STATE_LEN)
}

// Strategy for generating latin1-representable text
fn latin1_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0x01u32..=0xFF, 1..64).prop_map(|codepoints| {
        codepoints
            .into_iter()
            .filter_map(char::from_u32)
            .collect::<String>()
    })
}

// Strategy for generating binary payloads
fn payloads() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..512)
}

proptest! {
    #[test]
    fn test_state_view_reflects_every_flag(flags in flag_sets()) {
        let buffer = Arc::new(StateBuffer::new());
        for (idx, on) in flags.iter().enumerate() {
            buffer.set(idx, *on);
        }
        let view = quic_session::SessionState::new(Arc::clone(&buffer));

        prop_assert_eq!(view.ocsp(), flags[state::IDX_STATE_OCSP]);
        prop_assert_eq!(view.client_hello(), flags[state::IDX_STATE_CLIENT_HELLO]);
        prop_assert_eq!(view.client_hello_done(), flags[state::IDX_STATE_CLIENT_HELLO_DONE]);
        prop_assert_eq!(view.closing(), flags[state::IDX_STATE_CLOSING]);
        prop_assert_eq!(
            view.closing_timer_enabled(),
            flags[state::IDX_STATE_CLOSING_TIMER_ENABLED]
        );
        prop_assert_eq!(view.destroyed(), flags[state::IDX_STATE_DESTROYED]);
        prop_assert_eq!(view.graceful_closing(), flags[state::IDX_STATE_GRACEFUL_CLOSING]);
        prop_assert_eq!(
            view.handshake_confirmed(),
            flags[state::IDX_STATE_HANDSHAKE_CONFIRMED]
        );
        prop_assert_eq!(view.idle_timeout(), flags[state::IDX_STATE_IDLE_TIMEOUT]);
        prop_assert_eq!(view.stateless_reset(), flags[state::IDX_STATE_STATELESS_RESET]);
        prop_assert_eq!(view.silent_close(), flags[state::IDX_STATE_SILENT_CLOSE]);
        prop_assert_eq!(
            view.stream_open_allowed(),
            flags[state::IDX_STATE_STREAM_OPEN_ALLOWED]
        );
        prop_assert_eq!(
            view.using_preferred_address(),
            flags[state::IDX_STATE_USING_PREFERRED_ADDRESS]
        );
        prop_assert_eq!(view.wrapped(), flags[state::IDX_STATE_WRAPPED]);
    }

    #[test]
    fn test_stats_counters_roundtrip(values in prop::collection::vec(any::<u64>(), STATS_LEN / 8)) {
        let buffer = Arc::new(StatsBuffer::new());
        for (slot, value) in values.iter().enumerate() {
            buffer.write_u64(slot * 8, *value);
        }
        for (slot, value) in values.iter().enumerate() {
            prop_assert_eq!(buffer.read_u64(slot * 8), *value);
        }
    }

    #[test]
    fn test_binary_datagrams_pass_through_unchanged(payload in payloads()) {
        let (mut session, transport) = new_session();
        prop_assert!(session.datagram(payload.clone()).unwrap());
        let sent = transport.sent_datagrams();
        prop_assert_eq!(sent.len(), 1);
        prop_assert_eq!(sent[0].as_ref(), &payload[..]);
    }

    #[test]
    fn test_utf8_text_matches_string_bytes(text in "\\PC{1,64}") {
        let (mut session, transport) = new_session();
        let expected = text.as_bytes().to_vec();
        prop_assume!(!expected.is_empty());
        prop_assert!(session.datagram(text.as_str()).unwrap());
        let sent = transport.sent_datagrams();
        prop_assert_eq!(sent[0].as_ref(), &expected[..]);
    }

    #[test]
    fn test_latin1_text_converts_one_byte_per_char(text in latin1_text()) {
        let (mut session, transport) = new_session();
        let char_count = text.chars().count();
        let payload = DatagramPayload::Text {
            data: text,
            encoding: TextEncoding::Latin1,
        };
        prop_assert!(session.datagram(payload).unwrap());
        let sent = transport.sent_datagrams();
        prop_assert_eq!(sent[0].len(), char_count);
    }

    #[test]
    fn test_latin1_rejects_wide_chars(prefix in latin1_text(), wide in 0x100u32..=0x10FFFF) {
        prop_assume!(char::from_u32(wide).is_some());
        let (mut session, transport) = new_session();
        let mut data = prefix;
        data.push(char::from_u32(wide).unwrap());
        let payload = DatagramPayload::Text {
            data,
            encoding: TextEncoding::Latin1,
        };
        prop_assert!(session.datagram(payload).is_err());
        prop_assert!(transport.sent_datagrams().is_empty());
    }

    #[test]
    fn test_repeated_close_requests_native_once(calls in 1usize..16) {
        let (mut session, transport) = new_session();
        for _ in 0..calls {
            session.close();
        }
        prop_assert_eq!(transport.graceful_close_count(), 1);
    }
}
