use std::collections::HashMap;

use flightaxis_core::state::AircraftState;

use crate::SoapError;

/// Where one reply element lands in [`AircraftState`].
pub struct Field {
    /// Element name in the reply body.
    pub key: &'static str,
    pub(crate) store: fn(&mut AircraftState, f32),
}

/// The reply elements consumed by the bridge, keyed by their wire names.
///
/// The table order mirrors the reply layout of the simulator, but decoding
/// never depends on it.
pub const STATE_FIELDS: &[Field] = &[
    Field { key: "m-airspeed-MPS", store: |s, v| s.airspeed_mps = v },
    Field { key: "m-altitudeASL-MTR", store: |s, v| s.altitude_asl_m = v },
    Field { key: "m-altitudeAGL-MTR", store: |s, v| s.altitude_agl_m = v },
    Field { key: "m-groundspeed-MPS", store: |s, v| s.groundspeed_mps = v },
    Field { key: "m-pitchRate-DEGpSEC", store: |s, v| s.pitch_rate_dps = v },
    Field { key: "m-rollRate-DEGpSEC", store: |s, v| s.roll_rate_dps = v },
    Field { key: "m-yawRate-DEGpSEC", store: |s, v| s.yaw_rate_dps = v },
    Field { key: "m-azimuth-DEG", store: |s, v| s.azimuth_deg = v },
    Field { key: "m-inclination-DEG", store: |s, v| s.inclination_deg = v },
    Field { key: "m-roll-DEG", store: |s, v| s.roll_deg = v },
    Field { key: "m-aircraftPositionX-MTR", store: |s, v| s.position_x_m = v },
    Field { key: "m-aircraftPositionY-MTR", store: |s, v| s.position_y_m = v },
    Field { key: "m-velocityWorldU-MPS", store: |s, v| s.velocity_world_u_mps = v },
    Field { key: "m-velocityWorldV-MPS", store: |s, v| s.velocity_world_v_mps = v },
    Field { key: "m-velocityWorldW-MPS", store: |s, v| s.velocity_world_w_mps = v },
    Field { key: "m-propRPM", store: |s, v| s.prop_rpm = v },
    Field { key: "m-heliMainRotorRPM", store: |s, v| s.heli_main_rotor_rpm = v },
    Field { key: "m-batteryVoltage-VOLTS", store: |s, v| s.battery_voltage_v = v },
    Field { key: "m-batteryCurrentDraw-AMPS", store: |s, v| s.battery_current_a = v },
];

/// Name to value map of every numeric leaf element in a reply body.
///
/// Built in a single pass; container elements and non-numeric leaves are
/// skipped.
#[derive(Debug, Default)]
pub struct FieldMap<'a> {
    values: HashMap<&'a str, f32>,
}

impl<'a> FieldMap<'a> {
    /// Scans `body` and collects every `<name>value</name>` leaf whose value
    /// parses as a float.
    #[must_use]
    pub fn parse(body: &'a str) -> Self {
        let mut values = HashMap::new();
        let bytes = body.as_bytes();
        let mut pos = 0;
        while let Some(open) = next(bytes, pos, b'<') {
            match bytes.get(open + 1).copied() {
                None => break,
                // closing tags, prolog and comments carry no leaf value
                Some(b'/' | b'?' | b'!') => {
                    pos = open + 1;
                    continue;
                }
                Some(_) => {}
            }
            let Some(name_end) = next(bytes, open + 1, b'>') else {
                break;
            };
            let name = &body[open + 1..name_end];
            let value_start = name_end + 1;
            let Some(close) = next(bytes, value_start, b'<') else {
                break;
            };
            if is_closing_tag(&bytes[close..], name) {
                if let Ok(value) = body[value_start..close].trim().parse::<f32>() {
                    values.insert(name, value);
                }
                pos = close + name.len() + 3;
            } else {
                // a nested element follows: descend into the container
                pos = close;
            }
        }
        Self { values }
    }

    /// Returns the value of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    /// Number of numeric leaves found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no numeric leaf was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn next(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == needle).map(|i| from + i)
}

fn is_closing_tag(bytes: &[u8], name: &str) -> bool {
    bytes.len() >= name.len() + 3
        && bytes[1] == b'/'
        && &bytes[2..2 + name.len()] == name.as_bytes()
        && bytes[2 + name.len()] == b'>'
}

/// Decodes an `ExchangeData` reply body into `state`.
///
/// Every field present in `body` is stored. A missing field leaves the
/// previous value in place; the first missing key is reported after the rest
/// of the table has been applied.
pub fn decode_into(body: &str, state: &mut AircraftState) -> Result<(), SoapError> {
    let map = FieldMap::parse(body);
    let mut missing = None;
    for field in STATE_FIELDS {
        match map.get(field.key) {
            Some(value) => (field.store)(state, value),
            None => {
                tracing::warn!("reply is missing {}", field.key);
                missing.get_or_insert(field.key);
            }
        }
    }
    missing.map_or(Ok(()), |key| Err(SoapError::MissingKey(key)))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn leaves(fields: &[(&str, &str)]) -> String {
        fields
            .iter()
            .map(|(k, v)| format!("<{k}>{v}</{k}>"))
            .collect()
    }

    fn full_body(overrides: &[(&str, f32)]) -> String {
        let inner: String = STATE_FIELDS
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let value = overrides
                    .iter()
                    .find(|(k, _)| *k == f.key)
                    .map_or(i as f32, |(_, v)| *v);
                format!("<{}>{}</{}>", f.key, value, f.key)
            })
            .collect();
        format!(
            "<SOAP-ENV:Envelope><SOAP-ENV:Body><ReturnData><m-aircraftState>{inner}\
            </m-aircraftState></ReturnData></SOAP-ENV:Body></SOAP-ENV:Envelope>"
        )
    }

    #[test]
    fn field_map_collects_numeric_leaves() {
        let body = format!(
            "<env><outer>{}</outer></env>",
            leaves(&[("a", "1.5"), ("b", "-2.5"), ("c", "text")])
        );
        let map = FieldMap::parse(&body);
        assert_eq!(Some(1.5), map.get("a"));
        assert_eq!(Some(-2.5), map.get("b"));
        assert_eq!(None, map.get("c"));
        assert_eq!(None, map.get("outer"));
        assert_eq!(2, map.len());
    }

    #[test]
    fn field_map_of_empty_body_is_empty() {
        assert!(FieldMap::parse("").is_empty());
        assert!(FieldMap::parse("no elements here").is_empty());
    }

    #[test]
    fn field_map_skips_prolog_and_closing_tags() {
        let body = "<?xml version='1.0'?><r><v>3.25</v></r>";
        let map = FieldMap::parse(body);
        assert_eq!(Some(3.25), map.get("v"));
        assert_eq!(1, map.len());
    }

    #[test]
    fn decode_applies_every_field() {
        let mut state = AircraftState::default();
        decode_into(&full_body(&[]), &mut state).unwrap();
        assert_abs_diff_eq!(0.0, state.airspeed_mps);
        assert_abs_diff_eq!(7.0, state.azimuth_deg);
        assert_abs_diff_eq!(9.0, state.roll_deg);
        assert_abs_diff_eq!(14.0, state.velocity_world_w_mps);
        assert_abs_diff_eq!(18.0, state.battery_current_a);
    }

    // a positional forward scan would desynchronize on reordered or missing
    // keys; the map-based decoder must not
    #[test]
    fn decode_is_order_independent() {
        let forward: String = STATE_FIELDS
            .iter()
            .enumerate()
            .map(|(i, f)| format!("<{}>{}</{}>", f.key, i as f32 * 0.5, f.key))
            .collect();
        let reversed: String = STATE_FIELDS
            .iter()
            .enumerate()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|(i, f)| format!("<{}>{}</{}>", f.key, i as f32 * 0.5, f.key))
            .collect();

        let mut a = AircraftState::default();
        let mut b = AircraftState::default();
        decode_into(&format!("<r>{forward}</r>"), &mut a).unwrap();
        decode_into(&format!("<r>{reversed}</r>"), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_field_reported_after_applying_the_rest() {
        let body = full_body(&[("m-airspeed-MPS", 25.0)])
            .replace("<m-inclination-DEG>8</m-inclination-DEG>", "");
        let mut state = AircraftState {
            inclination_deg: 7.5,
            ..AircraftState::default()
        };
        let result = decode_into(&body, &mut state);
        assert!(matches!(
            result,
            Err(SoapError::MissingKey("m-inclination-DEG"))
        ));
        assert_abs_diff_eq!(7.5, state.inclination_deg);
        assert_abs_diff_eq!(25.0, state.airspeed_mps);
    }

    #[test]
    fn non_numeric_status_fields_are_ignored() {
        let body = full_body(&[]).replace(
            "<m-aircraftState>",
            "<m-aircraftState><m-currentAircraftStatus>CAS-FLYING</m-currentAircraftStatus>",
        );
        let mut state = AircraftState::default();
        decode_into(&body, &mut state).unwrap();
        assert_abs_diff_eq!(9.0, state.roll_deg);
    }
}
