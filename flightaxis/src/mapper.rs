use flightaxis_core::{frame::FrameConfig, state::ServoPulses};

/// Maps raw actuator pulses onto the channel layout the simulator expects.
///
/// Pulses are normalized from 1000-2000 µs to 0-1. Airframes flagged `rev4`
/// have their first and last four channels swapped before any demixing.
/// Rotary-wing airframes have their three swashplate servos demixed into
/// roll and pitch rate commands on channels 0 and 1.
#[must_use]
pub fn scale_servos(pulses: &ServoPulses, frame: &FrameConfig) -> [f32; 8] {
    let mut channels = [0.0f32; 8];
    for (channel, &pulse) in channels.iter_mut().zip(pulses) {
        *channel = (f32::from(pulse) - 1000.0) / 1000.0;
    }

    if frame.rev4_servos {
        let (front, rear) = channels.split_at_mut(4);
        front.swap_with_slice(rear);
    }

    if frame.heli_demix {
        // the swashplate servos arrive mixed; recover cyclic rate commands
        let (swash1, swash2, swash3) = (channels[0], channels[1], channels[2]);
        let roll_rate = swash1 - swash2;
        let pitch_rate = -((swash1 + swash2) / 2.0 - swash3);
        channels[0] = (roll_rate + 0.5).clamp(0.0, 1.0);
        channels[1] = (pitch_rate + 0.5).clamp(0.0, 1.0);
    }

    channels
}
