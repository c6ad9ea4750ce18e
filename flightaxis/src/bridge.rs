use derive_more::Display;
use flightaxis_core::{
    clock::{Clock, StdClock},
    frame::FrameConfig,
    kinematics::{accel_from_velocity_delta, Kinematics, Rotation3, Vector3},
    state::{AircraftState, ServoPulses},
    transport::Transport,
};
use flightaxis_soap as soap;

use crate::mapper;

// the simulator occasionally reports wild rates on the first frames
const RATE_LIMIT_DPS: f32 = 2000.0;

/// Options for [`Bridge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BridgeOption {
    /// Multiplier from wall-clock elapsed time to simulated elapsed time.
    pub speedup: f32,
}

impl BridgeOption {
    /// Tick rate in Hz the consumer should drive [`Bridge::update`] at to
    /// keep the simulation paced to real time.
    #[must_use]
    pub fn nominal_rate_hz(&self) -> f32 {
        250.0 / self.speedup
    }
}

impl Default for BridgeOption {
    fn default() -> Self {
        Self { speedup: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
enum Session {
    #[display("not bootstrapped")]
    NotBootstrapped,
    #[display("bootstrapped")]
    Bootstrapped,
}

/// Keeps a simulated aircraft synchronized with the remote simulator, one
/// request/response exchange per tick.
///
/// Driving the loop:
///
/// ```
/// # use flightaxis::prelude::*;
/// let mut bridge = Bridge::new(
///     Scripted::new(),
///     FrameConfig::from_frame_str("plane"),
///     BridgeOption::default(),
/// );
/// bridge.update(&[1500; 8]);
/// let attitude = bridge.kinematics().dcm;
/// ```
pub struct Bridge<T, C = StdClock> {
    transport: T,
    clock: C,
    frame: FrameConfig,
    option: BridgeOption,
    session: Session,
    state: AircraftState,
    kinematics: Kinematics,
    origin: Option<Vector3>,
    last_time_us: u64,
    sim_time_us: u64,
    tick_count: u64,
    last_checkpoint_us: u64,
    post_update: Option<Box<dyn FnMut(&Kinematics)>>,
}

impl<T: Transport> Bridge<T> {
    /// Creates a bridge over `transport` with the standard clock.
    pub fn new(transport: T, frame: FrameConfig, option: BridgeOption) -> Self {
        Self::with_clock(transport, frame, option, StdClock::new())
    }
}

impl<T: Transport, C: Clock> Bridge<T, C> {
    /// Creates a bridge with an explicit time source.
    pub fn with_clock(transport: T, frame: FrameConfig, option: BridgeOption, mut clock: C) -> Self {
        let now = clock.now_us();
        Self {
            transport,
            clock,
            frame,
            option,
            session: Session::NotBootstrapped,
            state: AircraftState::default(),
            kinematics: Kinematics::default(),
            origin: None,
            last_time_us: now,
            sim_time_us: 0,
            tick_count: 0,
            last_checkpoint_us: 0,
            post_update: None,
        }
    }

    /// The kinematic state from the latest successful tick.
    #[must_use]
    pub const fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// The latest raw snapshot from the simulator.
    #[must_use]
    pub const fn state(&self) -> &AircraftState {
        &self.state
    }

    /// Accumulated simulated time in µs.
    #[must_use]
    pub const fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }

    /// Returns a reference to the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the transport.
    #[must_use]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Installs a hook invoked after every tick's state update.
    pub fn set_post_update(&mut self, hook: impl FnMut(&Kinematics) + 'static) {
        self.post_update = Some(Box::new(hook));
    }

    /// Runs one synchronization tick.
    ///
    /// Sends the current actuator commands, receives a state snapshot and
    /// converts it into [`Kinematics`]. On a failed exchange the previous
    /// snapshot stays authoritative and only the time base advances; the
    /// failure is logged, never surfaced.
    pub fn update(&mut self, pulses: &ServoPulses) {
        if self.session == Session::NotBootstrapped {
            self.bootstrap();
        }

        let channels = mapper::scale_servos(pulses, &self.frame);
        let exchanged = self.exchange(&channels);

        let now = self.clock.now_us();
        let dt_us = (now.saturating_sub(self.last_time_us) as f32 * self.option.speedup) as u64;

        if exchanged {
            self.apply_snapshot(dt_us as f32 * 1.0e-6);
        }

        self.sim_time_us += dt_us;
        if let Some(hook) = self.post_update.as_mut() {
            hook(&self.kinematics);
        }
        self.checkpoint();
        self.tick_count += 1;
        self.last_time_us = now;
    }

    /// Asks the simulator to reset the aircraft to its launch state.
    pub fn reset_aircraft(&mut self) -> Result<(), soap::SoapError> {
        soap::call(
            &mut self.transport,
            soap::ACTION_RESET,
            &soap::reset_envelope(),
        )
        .map(drop)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn bootstrap(&mut self) {
        // restore first, so that reconnecting works after the aircraft was
        // changed in the simulator
        for action in [soap::ACTION_RESTORE, soap::ACTION_INJECT] {
            let body = soap::bootstrap_envelope(action);
            if let Err(e) = soap::call(&mut self.transport, action, &body) {
                tracing::warn!("{action}: {e}");
            }
        }
        self.session = Session::Bootstrapped;
        tracing::debug!("session {}", self.session);
    }

    fn exchange(&mut self, channels: &[f32; 8]) -> bool {
        let body = soap::exchange_envelope(channels);
        let reply = match soap::call(&mut self.transport, soap::ACTION_EXCHANGE, &body) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("exchange failed: {e}");
                return false;
            }
        };
        match soap::decode_into(&reply, &mut self.state) {
            Ok(()) => true,
            Err(e) => {
                // fields present in the reply were applied, the rest is stale
                tracing::warn!("{e}");
                true
            }
        }
    }

    fn apply_snapshot(&mut self, dt_s: f32) {
        let s = self.state;

        let dcm = Rotation3::from_euler_angles(
            s.roll_deg.to_radians(),
            s.inclination_deg.to_radians(),
            -s.azimuth_deg.to_radians(),
        );
        let gyro = Vector3::new(
            clamp_rate(s.roll_rate_dps).to_radians(),
            clamp_rate(s.pitch_rate_dps).to_radians(),
            -clamp_rate(s.yaw_rate_dps).to_radians(),
        ) * self.option.speedup;
        let velocity = Vector3::new(
            s.velocity_world_u_mps,
            s.velocity_world_v_mps,
            s.velocity_world_w_mps,
        );

        // the simulator reports x east and y north; altitude becomes down
        let raw = Vector3::new(s.position_y_m, s.position_x_m, -s.altitude_agl_m);
        let origin = *self.origin.get_or_insert(raw);
        let position = raw - origin;

        let accel_body = if dt_s > 0.0 {
            accel_from_velocity_delta(velocity, self.kinematics.velocity, dt_s, &dcm)
        } else {
            self.kinematics.accel_body
        };

        self.kinematics = Kinematics {
            dcm,
            gyro,
            velocity,
            position,
            accel_body,
            airspeed: s.airspeed_mps,
            battery_voltage: s.battery_voltage_v,
            battery_current: s.battery_current_a,
            rpm: if self.frame.heli_demix {
                s.heli_main_rotor_rpm
            } else {
                s.prop_rpm
            },
        };
    }

    fn checkpoint(&mut self) {
        if self.tick_count % 1000 != 0 {
            return;
        }
        if self.last_checkpoint_us == 0 {
            if let Some(origin) = self.origin {
                tracing::info!(
                    "origin {:.2} {:.2} {:.2}",
                    origin.x,
                    origin.y,
                    origin.z
                );
            }
        } else {
            let elapsed_s = (self.sim_time_us - self.last_checkpoint_us) as f32 * 1.0e-6;
            tracing::info!("{:.2} ticks/s", 1000.0 / elapsed_s);
        }
        self.last_checkpoint_us = self.sim_time_us;
    }
}

fn clamp_rate(rate_dps: f32) -> f32 {
    rate_dps.clamp(-RATE_LIMIT_DPS, RATE_LIMIT_DPS)
}
