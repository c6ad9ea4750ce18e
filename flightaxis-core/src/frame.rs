/// Behavior flags derived from the airframe descriptor string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameConfig {
    /// Demix the swashplate servos into roll and pitch rate commands and
    /// report main rotor RPM instead of propeller RPM.
    pub heli_demix: bool,
    /// Swap the first and last four actuator channels.
    pub rev4_servos: bool,
}

impl FrameConfig {
    /// Derives the flags from an airframe descriptor such as
    /// `"heli-blade360"` or `"quadplane-rev4"`.
    #[must_use]
    pub fn from_frame_str(frame: &str) -> Self {
        Self {
            heli_demix: frame.contains("heli"),
            rev4_servos: frame.contains("rev4"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("heli-blade360", true, false)]
    #[case("quadplane-rev4", false, true)]
    #[case("heli-rev4", true, true)]
    #[case("plane", false, false)]
    fn parses_frame_descriptor(#[case] frame: &str, #[case] heli: bool, #[case] rev4: bool) {
        let config = FrameConfig::from_frame_str(frame);
        assert_eq!(heli, config.heli_demix);
        assert_eq!(rev4, config.rev4_servos);
    }

    #[test]
    fn default_has_no_flags() {
        assert_eq!(FrameConfig::default(), FrameConfig::from_frame_str("plane"));
    }
}
