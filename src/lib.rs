pub mod client_error;
pub mod constants;
pub mod dns;
pub mod interp;
pub mod rr;
pub mod transport;
pub mod update;

pub use client_error::{ClientError, Result};
pub use dns::DNSPacket;
pub use update::context::UpdateContext;
