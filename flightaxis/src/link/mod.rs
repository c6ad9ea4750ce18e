mod scripted;
mod tcp;

pub use scripted::{Scripted, ScriptedConnection};
pub use tcp::{Tcp, TcpConnection, TcpOption};
