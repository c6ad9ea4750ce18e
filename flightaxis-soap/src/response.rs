use std::time::Duration;

use flightaxis_core::transport::Connection;

use crate::SoapError;

/// Receive buffer size; replies declaring more than fits are rejected.
pub const REPLY_BUF_LEN: usize = 10000;
/// Wait for the first chunk of a reply.
pub const FIRST_RECV_TIMEOUT: Duration = Duration::from_millis(1000);
/// Wait for each continuation chunk while a reply is being assembled.
pub const NEXT_RECV_TIMEOUT: Duration = Duration::from_millis(100);

const CONTENT_LENGTH: &[u8] = b"Content-Length: ";
const HEADER_END: &[u8] = b"\r\n\r\n";

/// Receives one framed HTTP reply on `conn` and returns its body.
///
/// The headers must declare a `Content-Length`; continuation chunks are read
/// until the declared body length has arrived. Bytes received past the
/// declared length are ignored.
pub fn read_response<C: Connection>(conn: &mut C) -> Result<String, SoapError> {
    let mut buf = [0u8; REPLY_BUF_LEN];
    let mut received = match conn.recv(&mut buf, FIRST_RECV_TIMEOUT) {
        Ok(0) | Err(_) => return Err(SoapError::NoData),
        Ok(n) => n,
    };

    let header = find(&buf[..received], CONTENT_LENGTH).ok_or(SoapError::NoLength)?;
    let content_length = decimal_run(&buf[header + CONTENT_LENGTH.len()..received]);

    let separator = find(&buf[header..received], HEADER_END).ok_or(SoapError::NoBody)? + header;
    let body = separator + HEADER_END.len();

    // a declared length past usize::MAX saturates and is rejected here
    let expected = body.saturating_add(content_length);
    if expected >= REPLY_BUF_LEN {
        return Err(SoapError::ReplyTooLarge(expected));
    }
    while received < expected {
        match conn.recv(&mut buf[received..], NEXT_RECV_TIMEOUT) {
            Ok(0) | Err(_) => return Err(SoapError::IncompleteBody { received, expected }),
            Ok(n) => received += n,
        }
    }

    tracing::debug!("received {} bytes, body {}", received, content_length);
    Ok(String::from_utf8_lossy(&buf[body..expected]).into_owned())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// leading decimal digits, saturating; anything else ends the run
fn decimal_run(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0usize, |acc, b| {
            acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
        })
}
