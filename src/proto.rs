/*!
Application protocol selection.

Maps a negotiated ALPN identifier to the handler that knows how to
shape request/response traffic on the session's streams. The mapping
is total: anything that is not HTTP/3 gets the no-op default handler.
*/

use crate::constants::{ALPN_H3, ALPN_H3_29};
use crate::handle::StreamHandle;

/// Hooks a protocol handler contributes to stream dispatch.
///
/// The default handler leaves every hook as a no-op; HTTP/3 forwards
/// header blocks to the native layer.
pub trait ApplicationProtocol: Send + Sync {
    /// Identifier of this handler, for diagnostics.
    fn name(&self) -> &'static str;

    /// Early hints for a request in flight.
    fn handle_hints(&self, _stream: &mut dyn StreamHandle, _hints: &[(String, String)]) {}

    /// Dispatch request headers on a locally opened stream.
    /// `terminal` is true when no body follows.
    fn handle_request_headers(
        &self,
        _stream: &mut dyn StreamHandle,
        _headers: &[(String, String)],
        _terminal: bool,
        _authority: Option<&str>,
    ) {
    }

    /// Dispatch response headers.
    fn handle_response_headers(
        &self,
        _stream: &mut dyn StreamHandle,
        _headers: &[(String, String)],
        _terminal: bool,
    ) {
    }

    /// Dispatch trailing headers.
    fn handle_trailing_headers(
        &self,
        _stream: &mut dyn StreamHandle,
        _trailers: &[(String, String)],
    ) {
    }
}

/// Handler used before handshake completion and for unrecognized
/// ALPN identifiers.
pub struct DefaultProtocol;

impl ApplicationProtocol for DefaultProtocol {
    fn name(&self) -> &'static str {
        "default"
    }
}

/// HTTP/3 application mapping. Framing itself stays in the native
/// layer; this handler only shapes the header blocks it hands over.
pub struct Http3Protocol;

impl ApplicationProtocol for Http3Protocol {
    fn name(&self) -> &'static str {
        "h3"
    }

    fn handle_hints(&self, stream: &mut dyn StreamHandle, hints: &[(String, String)]) {
        stream.send_headers(hints, false);
    }

    fn handle_request_headers(
        &self,
        stream: &mut dyn StreamHandle,
        headers: &[(String, String)],
        terminal: bool,
        authority: Option<&str>,
    ) {
        match authority {
            Some(authority) if !headers.iter().any(|(name, _)| name == ":authority") => {
                let mut block = Vec::with_capacity(headers.len() + 1);
                block.push((":authority".to_string(), authority.to_string()));
                block.extend_from_slice(headers);
                stream.send_headers(&block, terminal);
            }
            _ => {
                stream.send_headers(headers, terminal);
            }
        }
    }

    fn handle_response_headers(
        &self,
        stream: &mut dyn StreamHandle,
        headers: &[(String, String)],
        terminal: bool,
    ) {
        stream.send_headers(headers, terminal);
    }

    fn handle_trailing_headers(
        &self,
        stream: &mut dyn StreamHandle,
        trailers: &[(String, String)],
    ) {
        stream.send_headers(trailers, true);
    }
}

static DEFAULT_PROTOCOL: DefaultProtocol = DefaultProtocol;
static HTTP3_PROTOCOL: Http3Protocol = Http3Protocol;

/// Select the handler for a negotiated ALPN identifier. Total: an
/// unknown or absent identifier yields the default handler.
pub fn select_protocol(alpn: Option<&str>) -> &'static dyn ApplicationProtocol {
    match alpn {
        Some(ALPN_H3) | Some(ALPN_H3_29) => &HTTP3_PROTOCOL,
        _ => &DEFAULT_PROTOCOL,
    }
}
