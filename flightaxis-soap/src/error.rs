use flightaxis_core::transport::TransportError;
use thiserror::Error;

/// An error in one SOAP exchange with the simulator.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SoapError {
    /// Opening the per-call connection failed.
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] TransportError),
    /// Nothing was received within the first receive window.
    #[error("no data in reply")]
    NoData,
    /// The reply carries no `Content-Length` header.
    #[error("reply has no Content-Length")]
    NoLength,
    /// The reply carries no header/body separator.
    #[error("reply has no body")]
    NoBody,
    /// The declared reply size exceeds the receive buffer.
    #[error("reply too large ({0} bytes)")]
    ReplyTooLarge(usize),
    /// The reply ended before the declared body length arrived.
    #[error("incomplete reply body ({received} of {expected} bytes)")]
    IncompleteBody {
        /// Bytes accumulated so far.
        received: usize,
        /// Bytes the headers promised.
        expected: usize,
    },
    /// An expected field is absent from the reply body.
    #[error("reply is missing {0}")]
    MissingKey(&'static str),
    /// Sending the request failed.
    #[error("{0}")]
    Transport(#[from] TransportError),
}
