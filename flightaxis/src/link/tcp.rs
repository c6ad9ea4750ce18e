use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpStream},
    time::Duration,
};

use flightaxis_core::transport::{Connection, Transport, TransportError};

/// Options for [`Tcp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TcpOption {
    /// Timeout for opening the per-call connection. `None` uses the operating
    /// system default.
    pub connect_timeout: Option<Duration>,
}

/// The live transport: one fresh TCP connection to the simulator per call.
pub struct Tcp {
    addr: SocketAddr,
    option: TcpOption,
}

impl Tcp {
    /// Creates a transport targeting the simulator at `addr`.
    #[must_use]
    pub const fn new(addr: SocketAddr, option: TcpOption) -> Self {
        Self { addr, option }
    }
}

impl Transport for Tcp {
    type Conn = TcpConnection;

    fn connect(&mut self) -> Result<TcpConnection, TransportError> {
        let stream = if let Some(timeout) = self.option.connect_timeout {
            TcpStream::connect_timeout(&self.addr, timeout)
        } else {
            TcpStream::connect(self.addr)
        }
        .map_err(|source| TransportError::Connect {
            addr: self.addr,
            source,
        })?;
        Ok(TcpConnection { stream })
    }
}

/// One open connection handed out by [`Tcp`].
pub struct TcpConnection {
    stream: TcpStream,
}

impl Connection for TcpConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.stream.write_all(bytes)?;
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, TransportError> {
        self.stream.set_read_timeout(Some(timeout))?;
        Ok(self.stream.read(buf)?)
    }
}
