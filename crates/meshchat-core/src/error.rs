use std::io;

use thiserror::Error;

/// Failures while establishing or driving the gateway link. Everything here
/// is fatal at connect time; after the handshake the link workers downgrade
/// frame-level noise to log lines instead of surfacing it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to gateway at {target}: {source}")]
    Connect {
        target: String,
        source: io::Error,
    },

    #[error("failed to open serial device {path}: {source}")]
    Serial {
        path: String,
        source: tokio_serial::Error,
    },

    #[error("gateway closed the link before completing the hello handshake")]
    HandshakeClosed,

    #[error("malformed hello frame from gateway: {0}")]
    Handshake(#[source] serde_json::Error),

    #[error("gateway sent a non-hello frame during the handshake")]
    HandshakeUnexpected,

    #[error("failed to encode outbound frame: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The CLI target was neither an IPv4 address nor a serial device path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not determine connection method from {0:?}; pass an IPv4 address or a serial device path")]
pub struct TargetParseError(pub String);
