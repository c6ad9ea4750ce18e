/// Number of actuator channels exchanged with the simulator.
pub const CHANNEL_COUNT: usize = 8;

/// Raw actuator pulse widths in µs, 1000-2000 nominal.
pub type ServoPulses = [u16; CHANNEL_COUNT];

/// One aircraft state snapshot as reported by the simulator.
///
/// Units follow the wire fields; angles are in degrees, rates in deg/s. The
/// snapshot keeps the simulator's own axis conventions, conversion into the
/// flight controller's conventions happens in the bridge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AircraftState {
    /// Airspeed in m/s.
    pub airspeed_mps: f32,
    /// Altitude above sea level in m.
    pub altitude_asl_m: f32,
    /// Altitude above ground level in m.
    pub altitude_agl_m: f32,
    /// Groundspeed in m/s.
    pub groundspeed_mps: f32,
    /// Pitch rate in deg/s.
    pub pitch_rate_dps: f32,
    /// Roll rate in deg/s.
    pub roll_rate_dps: f32,
    /// Yaw rate in deg/s.
    pub yaw_rate_dps: f32,
    /// Heading in degrees.
    pub azimuth_deg: f32,
    /// Pitch angle in degrees.
    pub inclination_deg: f32,
    /// Roll angle in degrees.
    pub roll_deg: f32,
    /// World position x in m.
    pub position_x_m: f32,
    /// World position y in m.
    pub position_y_m: f32,
    /// World-frame velocity u in m/s.
    pub velocity_world_u_mps: f32,
    /// World-frame velocity v in m/s.
    pub velocity_world_v_mps: f32,
    /// World-frame velocity w in m/s.
    pub velocity_world_w_mps: f32,
    /// Propeller speed in RPM.
    pub prop_rpm: f32,
    /// Main rotor speed in RPM.
    pub heli_main_rotor_rpm: f32,
    /// Battery voltage in V.
    pub battery_voltage_v: f32,
    /// Battery current draw in A.
    pub battery_current_a: f32,
}
