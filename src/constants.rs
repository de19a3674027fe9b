pub const DNS_PORT: u16 = 53;
pub const MAX_UDP_PACKET_SIZE: usize = 512;
pub const MAX_TCP_PACKET_SIZE: usize = 65535;
pub const MAX_DNAME_WIRE_SIZE: usize = 255;
pub const MAX_LABEL_SIZE: usize = 63;

/// DNS opcode for dynamic updates (RFC 2136)
pub const OPCODE_UPDATE: u8 = 5;

/// TSIG time fudge in seconds (RFC 8945)
pub const TSIG_FUDGE: u16 = 300;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRIES: u32 = 2;
