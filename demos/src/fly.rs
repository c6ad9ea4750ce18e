use std::time::{Duration, Instant};

use anyhow::Result;

use flightaxis::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.2.48:18083".to_string())
        .parse()?;

    let option = BridgeOption::default();
    let period = Duration::from_secs_f32(1.0 / option.nominal_rate_hz());
    let mut bridge = Bridge::new(
        Tcp::new(
            addr,
            TcpOption {
                connect_timeout: Some(Duration::from_millis(200)),
            },
        ),
        FrameConfig::from_frame_str("plane"),
        option,
    );

    let mut pulses: ServoPulses = [1500; 8];
    for tick in 0u32..2000 {
        // slow aileron sweep
        pulses[0] = (1500 + ((tick as f32 / 50.0).sin() * 400.0) as i32) as u16;

        let start = Instant::now();
        bridge.update(&pulses);
        if tick % 250 == 0 {
            let k = bridge.kinematics();
            tracing::info!(
                "alt {:.1} m, airspeed {:.1} m/s, battery {:.1} V",
                -k.position.z,
                k.airspeed,
                k.battery_voltage
            );
        }
        std::thread::sleep(period.saturating_sub(start.elapsed()));
    }

    Ok(())
}
