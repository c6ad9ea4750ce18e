pub use crate::{
    bridge::{Bridge, BridgeOption},
    link::{Scripted, Tcp, TcpOption},
    mapper::scale_servos,
};

pub use flightaxis_core::{
    clock::{Clock, StdClock},
    frame::FrameConfig,
    kinematics::{Kinematics, Rotation3, Vector3, ACCEL_LIMIT_MPS2, GRAVITY_MPS2},
    state::{AircraftState, ServoPulses, CHANNEL_COUNT},
    transport::{Connection, Transport, TransportError},
};

pub use flightaxis_soap::SoapError;
