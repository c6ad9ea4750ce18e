use flightaxis_core::state::CHANNEL_COUNT;
use itertools::Itertools;

/// Hands control of the aircraft back to the original controller device.
pub const ACTION_RESTORE: &str = "RestoreOriginalControllerDevice";
/// Injects the UAV controller interface, enabling external control.
pub const ACTION_INJECT: &str = "InjectUAVControllerInterface";
/// Exchanges one set of actuator commands for one state snapshot.
pub const ACTION_EXCHANGE: &str = "ExchangeData";
/// Resets the aircraft to its launch state.
pub const ACTION_RESET: &str = "ResetAircraft";

// the administrative actions ignore their argument values
const PLACEHOLDER_ARGS: &str = "<a>1</a><b>2</b>";

/// Wraps `inner` in the SOAP envelope invoking `action`.
#[must_use]
pub fn envelope(action: &str, inner: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
        <soap:Envelope xmlns:soap='http://schemas.xmlsoap.org/soap/envelope/' \
        xmlns:xsd='http://www.w3.org/2001/XMLSchema' \
        xmlns:xsi='http://www.w3.org/2001/XMLSchema-instance'>\
        <soap:Body>\
        <{action}>{inner}</{action}>\
        </soap:Body>\
        </soap:Envelope>"
    )
}

/// Envelope for [`ACTION_RESTORE`] or [`ACTION_INJECT`].
#[must_use]
pub fn bootstrap_envelope(action: &str) -> String {
    envelope(action, PLACEHOLDER_ARGS)
}

/// Envelope for [`ACTION_RESET`].
#[must_use]
pub fn reset_envelope() -> String {
    envelope(ACTION_RESET, "")
}

/// Envelope for [`ACTION_EXCHANGE`] carrying the normalized channel values.
#[must_use]
pub fn exchange_envelope(channels: &[f32; CHANNEL_COUNT]) -> String {
    let items = channels
        .iter()
        .map(|v| format!("<item>{v:.4}</item>"))
        .join("");
    envelope(
        ACTION_EXCHANGE,
        &format!(
            "<pControlInputs><m-selectedChannels>255</m-selectedChannels>\
            <m-channelValues-0to1>{items}</m-channelValues-0to1></pControlInputs>"
        ),
    )
}

/// Assembles the HTTP request frame for `action`.
///
/// The declared content length is the byte length of the final serialized
/// `body`.
#[must_use]
pub fn request_frame(action: &str, body: &str) -> Vec<u8> {
    format!(
        "POST / HTTP/1.1\r\n\
        soapaction: '{action}'\r\n\
        content-length: {len}\r\n\
        content-type: text/xml;charset='UTF-8'\r\n\
        Connection: Keep-Alive\r\n\
        \r\n\
        {body}",
        len = body.len(),
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn frame_declares_exact_body_byte_length() {
        let frame = request_frame(ACTION_EXCHANGE, "abcµ");
        let text = String::from_utf8(frame).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        let declared: usize = head
            .lines()
            .find_map(|l| l.trim_end().strip_prefix("content-length: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, body.len());
        assert_eq!(5, declared);
    }

    #[test]
    fn frame_headers() {
        let frame = request_frame(ACTION_INJECT, "x");
        let text = String::from_utf8(frame).unwrap();
        assert!(text.starts_with("POST / HTTP/1.1\r\n"));
        assert!(text.contains("soapaction: 'InjectUAVControllerInterface'\r\n"));
        assert!(text.contains("content-type: text/xml;charset='UTF-8'\r\n"));
        assert!(text.contains("Connection: Keep-Alive\r\n"));
        assert!(text.ends_with("\r\n\r\nx"));
    }

    #[test]
    fn envelope_declares_namespaces() {
        let body = envelope("Action", "args");
        assert!(body.starts_with("<?xml version='1.0' encoding='UTF-8'?>"));
        assert!(body.contains("xmlns:soap='http://schemas.xmlsoap.org/soap/envelope/'"));
        assert!(body.contains("xmlns:xsd='http://www.w3.org/2001/XMLSchema'"));
        assert!(body.contains("xmlns:xsi='http://www.w3.org/2001/XMLSchema-instance'"));
        assert!(body.contains("<soap:Body><Action>args</Action></soap:Body>"));
        assert!(body.ends_with("</soap:Envelope>"));
    }

    #[rstest]
    #[case::restore(
        bootstrap_envelope(ACTION_RESTORE),
        "<RestoreOriginalControllerDevice><a>1</a><b>2</b></RestoreOriginalControllerDevice>"
    )]
    #[case::inject(
        bootstrap_envelope(ACTION_INJECT),
        "<InjectUAVControllerInterface><a>1</a><b>2</b></InjectUAVControllerInterface>"
    )]
    #[case::reset(reset_envelope(), "<ResetAircraft></ResetAircraft>")]
    fn administrative_envelope_wraps_its_action(#[case] body: String, #[case] element: &str) {
        assert!(body.contains(element));
    }

    #[test]
    fn exchange_envelope_formats_channels() {
        let body = exchange_envelope(&[0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875]);
        assert!(body.contains("<m-selectedChannels>255</m-selectedChannels>"));
        assert!(body.contains(
            "<m-channelValues-0to1>\
            <item>0.0000</item><item>0.1250</item><item>0.2500</item><item>0.3750</item>\
            <item>0.5000</item><item>0.6250</item><item>0.7500</item><item>0.8750</item>\
            </m-channelValues-0to1>"
        ));
    }
}
