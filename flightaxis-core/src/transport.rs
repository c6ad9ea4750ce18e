use std::{io, net::SocketAddr, time::Duration};

use thiserror::Error;

/// An error raised by a [`Transport`] or [`Connection`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// Opening the connection failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// The unreachable endpoint.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Sending or receiving failed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// An open byte-stream connection to the simulator.
pub trait Connection {
    /// Sends `bytes` in full.
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Receives at most `buf.len()` bytes, waiting up to `timeout`.
    ///
    /// Returns the number of bytes read; `Ok(0)` means the peer closed the
    /// connection or nothing arrived in time.
    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, TransportError>;
}

impl Connection for Box<dyn Connection> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.as_mut().send(bytes)
    }

    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, TransportError> {
        self.as_mut().recv(buf, timeout)
    }
}

/// A factory handing out one [`Connection`] per request/response call.
///
/// The simulator closes its end after every reply, so each call runs over a
/// fresh connection.
pub trait Transport {
    /// The connection type.
    type Conn: Connection;

    /// Opens a fresh connection to the simulator.
    fn connect(&mut self) -> Result<Self::Conn, TransportError>;
}
