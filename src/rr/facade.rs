use tracing::{debug, warn};

use super::scanner::RecordScanner;
use crate::client_error::{ClientError, Result};
use crate::dns::enums::{DNSResourceClass, DNSResourceType};

/// Behavior switches for `parse_partial`
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseFlags {
    /// Leave an unset TTL at zero instead of the scanner default
    pub no_default: bool,
    /// Parse only the owner name; warn about and discard the rest
    pub name_only: bool,
    /// Warn about and discard a TTL if one is present
    pub no_ttl: bool,
}

/// Parse a complete RR in zonefile syntax. The parsed class must match
/// the scanner's default class.
pub fn parse_full(scanner: &mut RecordScanner, line: &str) -> Result<()> {
    scanner.scan(line)?;

    if scanner.rclass != scanner.default_class {
        return Err(ClientError::Parse(format!(
            "class mismatch: '{}'",
            scanner.default_class.name()
        )));
    }

    Ok(())
}

/// Parse an RR whose tail fields may be omitted:
/// `<owner> [ttl] [class] [type [rdata...]]`.
/// A relative owner is completed against the scanner origin.
pub fn parse_partial(scanner: &mut RecordScanner, line: &str, flags: ParseFlags) -> Result<()> {
    // Extract owner
    let line = line.trim_end();
    let (owner, mut rest) = match line.split_once(|c: char| c.is_ascii_whitespace()) {
        Some((owner, rest)) => (owner, rest.trim_start()),
        None => (line, ""),
    };
    if owner.is_empty() {
        return Err(ClientError::Parse(format!(
            "failed to parse owner name '{}'",
            line
        )));
    }
    scanner.set_owner(owner)?;

    scanner.rtype = DNSResourceType::ANY;
    scanner.rclass = scanner.default_class;
    scanner.rdata.clear();
    scanner.ttl = if flags.no_default {
        0
    } else {
        scanner.default_ttl
    };

    if flags.name_only {
        if !rest.is_empty() {
            warn!("ignoring input data: '{}'", rest);
        }
        return Ok(());
    }

    // Now there could be [ttl] [class] [type [rdata...]]
    if let Some(token) = first_token(rest) {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(ttl) = token.parse::<u32>() {
                debug!("parsed ttl={}", ttl);
                if flags.no_ttl {
                    warn!("ignoring TTL value: '{}'", ttl);
                } else {
                    scanner.ttl = ttl;
                }
                rest = rest[token.len()..].trim_start();
            }
        }
    }

    if let Some(token) = first_token(rest) {
        if let Some(class) = DNSResourceClass::from_name(token) {
            if class != scanner.default_class {
                return Err(ClientError::Parse(format!("class mismatch: '{}'", token)));
            }
            scanner.rclass = class;
            debug!("parsed class={}", class.name());
            rest = rest[token.len()..].trim_start();
        }
    }

    let mut rtype = None;
    if let Some(token) = first_token(rest) {
        if let Some(parsed) = DNSResourceType::from_name(token) {
            rtype = Some(parsed);
            scanner.rtype = parsed;
            debug!("parsed type={}", parsed.name());
            rest = rest[token.len()..].trim_start();
        }
    }

    if rest.is_empty() {
        return Ok(());
    }

    // Rdata present; synthesize a normalized full record and re-scan it
    let Some(rtype) = rtype else {
        return Err(ClientError::Parse(format!(
            "failed to parse record type in '{}'",
            line
        )));
    };
    let full = format!(
        "{} {} IN {} {}",
        scanner.owner_name(),
        scanner.ttl,
        rtype.name(),
        rest
    );
    scanner.scan(&full)
}

fn first_token(s: &str) -> Option<&str> {
    let token = s.split_ascii_whitespace().next()?;
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> RecordScanner {
        let mut s = RecordScanner::new();
        s.origin = "example.com.".to_string();
        s
    }

    #[test]
    fn test_parse_full_class_mismatch() {
        let mut s = scanner();
        s.default_class = DNSResourceClass::CH;
        assert!(parse_full(&mut s, "foo.example.com. 60 IN A 192.0.2.1").is_err());
    }

    #[test]
    fn test_parse_partial_name_only() {
        let mut s = scanner();
        parse_partial(
            &mut s,
            "foo trailing junk",
            ParseFlags {
                no_default: true,
                name_only: true,
                no_ttl: false,
            },
        )
        .unwrap();

        assert_eq!(s.owner, vec!["foo", "example", "com"]);
        assert_eq!(s.rtype, DNSResourceType::ANY);
        assert_eq!(s.ttl, 0);
        assert!(s.rdata.is_empty());
    }

    #[test]
    fn test_parse_partial_type_only() {
        let mut s = scanner();
        s.default_ttl = 120;
        parse_partial(&mut s, "foo A", ParseFlags::default()).unwrap();

        assert_eq!(s.rtype, DNSResourceType::A);
        assert_eq!(s.ttl, 120);
        assert!(s.rdata.is_empty());
    }

    #[test]
    fn test_parse_partial_no_ttl_discards() {
        let mut s = scanner();
        parse_partial(
            &mut s,
            "foo 300 A",
            ParseFlags {
                no_ttl: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(s.ttl, 0);
        assert_eq!(s.rtype, DNSResourceType::A);
    }

    #[test]
    fn test_parse_partial_with_rdata() {
        let mut s = scanner();
        parse_partial(
            &mut s,
            "foo 60 IN A 192.0.2.7",
            ParseFlags {
                no_default: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(s.rdata, vec![192, 0, 2, 7]);
        assert_eq!(s.ttl, 60);
    }

    #[test]
    fn test_parse_partial_empty_owner() {
        let mut s = scanner();
        assert!(parse_partial(&mut s, "", ParseFlags::default()).is_err());
    }
}
