use std::time::Duration;

use crate::constants::{DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS, DNS_PORT};
use crate::dns::DNSResource;
use crate::dns::enums::DNSResourceClass;
use crate::dns::packet::DNSPacket;
use crate::rr::RecordScanner;
use crate::update::tsig::TsigKey;

/// A remote or local endpoint as host and service strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub host: String,
    pub service: String,
}

impl ServerInfo {
    pub fn new(host: &str, service: &str) -> Self {
        Self {
            host: host.to_string(),
            service: service.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    Any,
    V4,
    V6,
}

/// The mutable state accumulated across directives. One instance lives
/// for the whole run; `reset` clears the pending RR lists after a
/// successful send while server, key and defaults persist.
#[derive(Debug)]
pub struct UpdateContext {
    /// Question owner of the next UPDATE message
    pub zone: String,
    /// Question class
    pub class_num: DNSResourceClass,

    /// Prerequisite RRs (answer section)
    pub prereq_list: Vec<DNSResource>,
    /// Update RRs (authority section)
    pub update_list: Vec<DNSResource>,

    pub server: ServerInfo,
    pub srcif: Option<ServerInfo>,
    pub key: Option<TsigKey>,

    pub protocol: Protocol,
    pub ip: IpFamily,
    pub wait: Duration,
    /// Additional attempts after the first
    pub retries: u32,

    pub scanner: RecordScanner,

    /// Last received response
    pub answer: Option<DNSPacket>,
    pub debug: bool,
}

impl Default for UpdateContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateContext {
    pub fn new() -> Self {
        Self {
            zone: ".".to_string(),
            class_num: DNSResourceClass::IN,
            prereq_list: Vec::new(),
            update_list: Vec::new(),
            server: ServerInfo::new("127.0.0.1", &DNS_PORT.to_string()),
            srcif: None,
            key: None,
            protocol: Protocol::Udp,
            ip: IpFamily::Any,
            wait: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            scanner: RecordScanner::new(),
            answer: None,
            debug: false,
        }
    }

    pub fn origin(&self) -> &str {
        &self.scanner.origin
    }

    pub fn set_origin(&mut self, origin: &str) {
        let mut origin = origin.trim().to_lowercase();
        if !origin.ends_with('.') {
            origin.push('.');
        }
        self.scanner.origin = origin;
    }

    pub fn set_default_ttl(&mut self, ttl: u32) {
        self.scanner.default_ttl = ttl;
    }

    pub fn set_class(&mut self, class: DNSResourceClass) {
        self.class_num = class;
        self.scanner.default_class = class;
    }

    /// Materialize the scanner's current record
    pub fn scanned_record(&self) -> DNSResource {
        DNSResource {
            labels: self.scanner.owner.clone(),
            rtype: self.scanner.rtype,
            rclass: self.scanner.rclass,
            ttl: self.scanner.ttl,
            rdlength: self.scanner.rdata.len() as u16,
            rdata: self.scanner.rdata.clone(),
        }
    }

    pub fn append_update(&mut self) {
        let rr = self.scanned_record();
        self.update_list.push(rr);
    }

    pub fn append_prereq(&mut self) {
        let rr = self.scanned_record();
        self.prereq_list.push(rr);
    }

    /// Drop the pending RR lists; called after a successful send
    pub fn reset(&mut self) {
        self.prereq_list.clear();
        self.update_list.clear();
    }
}
