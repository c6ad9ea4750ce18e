#![cfg_attr(docsrs, feature(doc_cfg))]

//! The FlightAxis SOAP wire format.
//!
//! Builds request frames, reads framed replies and decodes reply fields. One
//! [`call`] is one request/response exchange over a fresh connection.

mod decode;
mod error;
mod request;
mod response;

pub use decode::{decode_into, Field, FieldMap, STATE_FIELDS};
pub use error::SoapError;
pub use request::{
    bootstrap_envelope, envelope, exchange_envelope, request_frame, reset_envelope,
    ACTION_EXCHANGE, ACTION_INJECT, ACTION_RESET, ACTION_RESTORE,
};
pub use response::{read_response, FIRST_RECV_TIMEOUT, NEXT_RECV_TIMEOUT, REPLY_BUF_LEN};

use flightaxis_core::transport::{Connection, Transport};

/// Performs one SOAP call and returns the reply body.
pub fn call<T: Transport>(
    transport: &mut T,
    action: &str,
    body: &str,
) -> Result<String, SoapError> {
    let mut conn = transport.connect().map_err(SoapError::ConnectFailed)?;
    conn.send(&request_frame(action, body))?;
    read_response(&mut conn)
}
