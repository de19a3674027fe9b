//! RFC 2136 dynamic update client core: the directive-driven update
//! context, the UPDATE message builder and the TSIG pipeline.

pub mod builder;
pub mod context;
pub mod directive;
pub mod handlers;
pub mod tsig;

pub use builder::build_query;
pub use context::{IpFamily, Protocol, ServerInfo, UpdateContext};
pub use directive::Directive;
pub use tsig::{TsigAlgorithm, TsigKey};
