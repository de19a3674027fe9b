use tracing::trace;

use super::record;
use crate::client_error::{ClientError, Result};
use crate::dns::common::name_to_labels;
use crate::dns::enums::{DNSResourceClass, DNSResourceType};

/// Zonefile-syntax record scanner. One instance lives in the update
/// context; each successful `scan` leaves the parsed record in the
/// `owner`/`rtype`/`rclass`/`ttl`/`rdata` fields.
#[derive(Debug, Clone)]
pub struct RecordScanner {
    pub owner: Vec<String>,
    pub rtype: DNSResourceType,
    pub rclass: DNSResourceClass,
    pub ttl: u32,
    pub rdata: Vec<u8>,

    pub default_class: DNSResourceClass,
    pub default_ttl: u32,
    /// FQDN appended to relative owner names
    pub origin: String,
}

impl Default for RecordScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordScanner {
    pub fn new() -> Self {
        Self {
            owner: Vec::new(),
            rtype: DNSResourceType::ANY,
            rclass: DNSResourceClass::IN,
            ttl: 0,
            rdata: Vec::new(),
            default_class: DNSResourceClass::IN,
            default_ttl: 0,
            origin: ".".to_string(),
        }
    }

    /// Scan a complete resource record line:
    /// `<owner> [ttl] [class] <type> <rdata...>`.
    /// A line starting with whitespace inherits the previous owner.
    pub fn scan(&mut self, line: &str) -> Result<()> {
        trace!("scanning record line: '{}'", line);

        let parts = tokenize(line);
        let mut idx = 0;

        if line.starts_with(' ') || line.starts_with('\t') {
            if self.owner.is_empty() {
                return Err(ClientError::Parse("no previous owner name".to_string()));
            }
        } else {
            let token = parts
                .first()
                .ok_or_else(|| ClientError::Parse("empty record line".to_string()))?;
            self.set_owner(token)?;
            idx += 1;
        }

        let mut ttl = self.default_ttl;
        let mut class = self.default_class;
        let mut rtype = None;

        while idx < parts.len() && rtype.is_none() {
            let field = &parts[idx];

            if let Ok(value) = record::parse_ttl(field) {
                ttl = value;
                idx += 1;
                continue;
            }

            if let Some(parsed) = DNSResourceClass::from_name(field) {
                class = parsed;
                idx += 1;
                continue;
            }

            if let Some(parsed) = DNSResourceType::from_name(field) {
                rtype = Some(parsed);
                idx += 1;
                break;
            }

            return Err(ClientError::Parse(format!("invalid field: {}", field)));
        }

        let rtype = rtype.ok_or_else(|| ClientError::Parse("missing record type".to_string()))?;

        if idx >= parts.len() {
            return Err(ClientError::Parse("missing record data".to_string()));
        }
        let rdata_text = parts[idx..].join(" ");

        self.rdata = record::encode_rdata(rtype, &rdata_text, &self.origin)?;
        self.rtype = rtype;
        self.rclass = class;
        self.ttl = ttl;

        Ok(())
    }

    /// Complete `name` against the origin and store it as the owner.
    pub fn set_owner(&mut self, name: &str) -> Result<()> {
        let full = record::normalize_name(name, &self.origin);
        self.owner = name_to_labels(&full)
            .map_err(|_| ClientError::Parse(format!("failed to parse owner name '{}'", name)))?;
        Ok(())
    }

    pub fn owner_name(&self) -> String {
        crate::dns::common::labels_to_name(&self.owner)
    }
}

/// Split a record line into fields, honoring quoted strings and
/// dropping grouping parentheses.
fn tokenize(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut current = String::new();

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '(' | ')' if !in_quotes => {}
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
}
