use nalgebra as na;

/// 3-dimensional column vector.
pub type Vector3 = na::Vector3<f32>;
/// 3-dimensional rotation matrix.
pub type Rotation3 = na::Rotation3<f32>;

/// Standard gravitational acceleration in m/s².
pub const GRAVITY_MPS2: f32 = 9.80665;

/// Largest body-frame acceleration reported on any axis in m/s².
pub const ACCEL_LIMIT_MPS2: f32 = 16.0;

/// Kinematic state of the aircraft in the flight controller's conventions:
/// front-right-down body axes and north-east-down world axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Kinematics {
    /// Rotation from the body frame to the world frame.
    pub dcm: Rotation3,
    /// Body angular rates in rad/s.
    pub gyro: Vector3,
    /// World-frame velocity in m/s.
    pub velocity: Vector3,
    /// Position relative to the captured origin in m.
    pub position: Vector3,
    /// Body-frame acceleration in m/s², gravity included.
    pub accel_body: Vector3,
    /// Airspeed in m/s.
    pub airspeed: f32,
    /// Battery voltage in V.
    pub battery_voltage: f32,
    /// Battery current draw in A.
    pub battery_current: f32,
    /// Motor speed in RPM.
    pub rpm: f32,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            dcm: Rotation3::identity(),
            gyro: Vector3::zeros(),
            velocity: Vector3::zeros(),
            position: Vector3::zeros(),
            accel_body: Vector3::zeros(),
            airspeed: 0.0,
            battery_voltage: 0.0,
            battery_current: 0.0,
            rpm: 0.0,
        }
    }
}

/// Derives body-frame acceleration from two consecutive world-frame velocity
/// samples.
///
/// The acceleration channels reported by the simulator are not usable, so the
/// value is reconstructed from the velocity delta, which adds noise at small
/// `dt_s`. Gravity is folded into the world-frame z axis before rotating into
/// the body frame, and each axis is clamped to [`ACCEL_LIMIT_MPS2`].
#[must_use]
pub fn accel_from_velocity_delta(
    velocity: Vector3,
    last_velocity: Vector3,
    dt_s: f32,
    dcm: &Rotation3,
) -> Vector3 {
    let mut accel = (velocity - last_velocity) / dt_s;
    accel.z -= GRAVITY_MPS2;
    (dcm.inverse() * accel).map(|a| a.clamp(-ACCEL_LIMIT_MPS2, ACCEL_LIMIT_MPS2))
}
