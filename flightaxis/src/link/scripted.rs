use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use flightaxis_core::transport::{Connection, Transport, TransportError};

/// A scripted transport for tests.
///
/// Each connection consumes the next scripted reply and serves it chunk by
/// chunk; every request frame sent through any connection is recorded. An
/// exhausted or empty script yields connections that receive nothing.
#[derive(Default)]
pub struct Scripted {
    replies: VecDeque<Vec<Vec<u8>>>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    broken: bool,
}

impl Scripted {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply delivered in a single chunk.
    pub fn push_reply(&mut self, reply: impl Into<Vec<u8>>) {
        self.replies.push_back(vec![reply.into()]);
    }

    /// Queues a reply delivered across several receives.
    pub fn push_reply_chunks<I, B>(&mut self, chunks: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        self.replies
            .push_back(chunks.into_iter().map(Into::into).collect());
    }

    /// Makes every subsequent connect attempt fail.
    pub fn break_down(&mut self) {
        self.broken = true;
    }

    /// Lets connect attempts succeed again.
    pub fn repair(&mut self) {
        self.broken = false;
    }

    /// The request frames sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of scripted replies not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for Scripted {
    type Conn = ScriptedConnection;

    fn connect(&mut self) -> Result<ScriptedConnection, TransportError> {
        if self.broken {
            return Err(TransportError::Io(io::ErrorKind::ConnectionRefused.into()));
        }
        Ok(ScriptedConnection {
            chunks: self.replies.pop_front().unwrap_or_default().into(),
            sent: Arc::clone(&self.sent),
        })
    }
}

/// A connection handed out by [`Scripted`].
pub struct ScriptedConnection {
    chunks: VecDeque<Vec<u8>>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Connection for ScriptedConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(bytes.to_vec());
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8], _: Duration) -> Result<usize, TransportError> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    // hand back what did not fit for the next receive
                    self.chunks.push_front(chunk[n..].to_vec());
                }
                Ok(n)
            }
            None => Ok(0),
        }
    }
}
