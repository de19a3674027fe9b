/// The update-session command language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Add,
    Answer,
    Class,
    Debug,
    Del,
    GssTsig,
    Key,
    Local,
    NxDomain,
    NxRrset,
    OldGssTsig,
    Origin,
    Prereq,
    Realm,
    Send,
    Server,
    Show,
    Ttl,
    Update,
    YxDomain,
    YxRrset,
    Zone,
}

/// Sorted list of commands. This way we can identify a command
/// byte-per-byte and cancel early if the next entry is
/// lexicographically greater.
pub const COMMANDS: &[(&str, Directive)] = &[
    ("add", Directive::Add),
    ("answer", Directive::Answer),
    ("class", Directive::Class),
    ("debug", Directive::Debug),
    ("del", Directive::Del),
    ("delete", Directive::Del),
    ("gsstsig", Directive::GssTsig),
    ("key", Directive::Key),
    ("local", Directive::Local),
    ("nxdomain", Directive::NxDomain),
    ("nxrrset", Directive::NxRrset),
    ("oldgsstsig", Directive::OldGssTsig),
    ("origin", Directive::Origin),
    ("prereq", Directive::Prereq),
    ("realm", Directive::Realm),
    ("send", Directive::Send),
    ("server", Directive::Server),
    ("show", Directive::Show),
    ("ttl", Directive::Ttl),
    ("update", Directive::Update),
    ("yxdomain", Directive::YxDomain),
    ("yxrrset", Directive::YxRrset),
    ("zone", Directive::Zone),
];

/// Prerequisite subcommand table
pub const PREREQ_COMMANDS: &[(&str, Directive)] = &[
    ("nxdomain", Directive::NxDomain),
    ("nxrrset", Directive::NxRrset),
    ("yxdomain", Directive::YxDomain),
    ("yxrrset", Directive::YxRrset),
];

enum KeywordMatch {
    /// Keyword matched and ends at a field boundary
    Hit,
    /// No match; later entries may still match
    Miss,
    /// Entry already lexicographically greater than the input
    Past,
}

fn match_keyword(keyword: &str, line: &str) -> KeywordMatch {
    let line = line.as_bytes();

    for (i, &k) in keyword.as_bytes().iter().enumerate() {
        let Some(&c) = line.get(i) else {
            // Input exhausted; this and all later entries sort after it
            return KeywordMatch::Past;
        };
        let c = c.to_ascii_lowercase();
        if k > c {
            return KeywordMatch::Past;
        }
        if k < c {
            return KeywordMatch::Miss;
        }
    }

    match line.get(keyword.len()) {
        None => KeywordMatch::Hit,
        Some(c) if c.is_ascii_whitespace() => KeywordMatch::Hit,
        Some(_) => KeywordMatch::Miss,
    }
}

/// Find the directive at the head of `line` in a sorted keyword table.
/// Returns the directive and the residual argument text; `None` is a
/// syntax error.
pub fn find<'a>(line: &'a str, table: &[(&str, Directive)]) -> Option<(Directive, &'a str)> {
    for (keyword, directive) in table {
        match match_keyword(keyword, line) {
            KeywordMatch::Hit => {
                let rest = line[keyword.len()..].trim_start();
                return Some((*directive, rest));
            }
            KeywordMatch::Miss => continue,
            KeywordMatch::Past => return None,
        }
    }
    None
}
