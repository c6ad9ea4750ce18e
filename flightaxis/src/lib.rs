pub mod bridge;
pub mod link;
pub mod mapper;
pub mod prelude;

pub use bridge::{Bridge, BridgeOption};
