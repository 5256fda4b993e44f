/*!
TLS interception objects.

These let embedding code observe and influence in-progress TLS
negotiation decisions raised by the native layer without blocking it.
Each object wraps a native-supplied responder that fires at most
once; they are built only by the session's native callbacks, never by
embedding code.
*/

use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::error::Result;
use crate::invalid_state_err;

/// A negotiated or offered cipher suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cipher {
    /// Cipher suite name, e.g. "TLS_AES_128_GCM_SHA256".
    pub name: String,
    /// Protocol version the suite belongs to, e.g. "TLSv1.3".
    pub version: String,
}

/// Replacement security context handed back through
/// `ClientHello::done`. Opaque to this crate; the native layer
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    der: Bytes,
}

impl SecurityContext {
    pub fn from_der(der: impl Into<Bytes>) -> Self {
        Self { der: der.into() }
    }

    pub fn der(&self) -> &Bytes {
        &self.der
    }
}

/// Native-supplied continuation resolving a suspended ClientHello.
pub type ClientHelloResponder = Box<dyn FnOnce(Option<SecurityContext>) + Send>;
/// Native-supplied continuation resolving a pending OCSP request.
pub type OcspResponder = Box<dyn FnOnce(Option<Bytes>) + Send>;

/// An intercepted TLS ClientHello, delivered through the session's
/// `clienthello` cell on server sessions that enabled interception.
///
/// The handshake stays suspended in the native layer until `done` is
/// invoked; ignoring the object leaves the native layer's own
/// timeout policy in charge.
#[derive(Clone)]
pub struct ClientHello {
    alpn: Option<String>,
    servername: Option<String>,
    ciphers: Vec<Cipher>,
    responder: Arc<Mutex<Option<ClientHelloResponder>>>,
}

impl ClientHello {
    pub(crate) fn new(
        alpn: Option<String>,
        servername: Option<String>,
        ciphers: Vec<Cipher>,
        responder: ClientHelloResponder,
    ) -> Self {
        Self {
            alpn,
            servername,
            ciphers,
            responder: Arc::new(Mutex::new(Some(responder))),
        }
    }

    pub fn alpn(&self) -> Option<&str> {
        self.alpn.as_deref()
    }

    pub fn servername(&self) -> Option<&str> {
        self.servername.as_deref()
    }

    pub fn ciphers(&self) -> &[Cipher] {
        &self.ciphers
    }

    /// Resume the handshake, optionally substituting the security
    /// context the native layer should continue with. Fails if the
    /// exchange was already completed.
    pub fn done(&self, context: Option<SecurityContext>) -> Result<()> {
        let responder = self
            .responder
            .lock()
            .expect("client hello responder poisoned")
            .take();
        match responder {
            Some(responder) => {
                responder(context);
                Ok(())
            }
            None => invalid_state_err!("pending client hello", "already completed"),
        }
    }
}

impl std::fmt::Debug for ClientHello {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHello")
            .field("alpn", &self.alpn)
            .field("servername", &self.servername)
            .field("ciphers", &self.ciphers)
            .finish_non_exhaustive()
    }
}

/// An OCSP request raised during the TLS handshake on a server
/// session. `respond_with` forwards the application's OCSP response;
/// ignoring the request defers to the native layer's default policy.
#[derive(Clone)]
pub struct OcspRequest {
    certificate: Bytes,
    issuer: Bytes,
    responder: Arc<Mutex<Option<OcspResponder>>>,
}

impl OcspRequest {
    pub(crate) fn new(certificate: Bytes, issuer: Bytes, responder: OcspResponder) -> Self {
        Self {
            certificate,
            issuer,
            responder: Arc::new(Mutex::new(Some(responder))),
        }
    }

    /// Raw DER certificate the request concerns.
    pub fn certificate(&self) -> &Bytes {
        &self.certificate
    }

    /// Raw DER issuer certificate.
    pub fn issuer(&self) -> &Bytes {
        &self.issuer
    }

    /// Complete the exchange with the application-supplied response.
    /// Fails if the exchange was already completed.
    pub fn respond_with(&self, response: Option<Bytes>) -> Result<()> {
        let responder = self
            .responder
            .lock()
            .expect("ocsp responder poisoned")
            .take();
        match responder {
            Some(responder) => {
                responder(response);
                Ok(())
            }
            None => invalid_state_err!("pending ocsp request", "already completed"),
        }
    }
}

impl std::fmt::Debug for OcspRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcspRequest")
            .field("certificate", &self.certificate.len())
            .field("issuer", &self.issuer.len())
            .finish_non_exhaustive()
    }
}

/// An OCSP response received from the peer on a client session.
/// Informational only.
#[derive(Debug, Clone)]
pub struct OcspResponse {
    response: Bytes,
}

impl OcspResponse {
    pub(crate) fn new(response: Bytes) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &Bytes {
        &self.response
    }
}

/// The two shapes an OCSP exchange can take, matched exhaustively at
/// the delivery site.
#[derive(Debug, Clone)]
pub enum OcspExchange {
    /// Server side: the peer wants an OCSP response from us.
    Request(OcspRequest),
    /// Client side: the peer's OCSP response arrived.
    Response(OcspResponse),
}
