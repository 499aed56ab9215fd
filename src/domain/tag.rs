use std::cmp::Ordering;
use std::fmt;

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Extract the version used as the changelog key (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        normalize_version(&self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Strips a single leading `v` from a tag or version string.
pub fn normalize_version(name: &str) -> &str {
    let trimmed = name.trim();
    trimmed.strip_prefix('v').unwrap_or(trimmed)
}

/// Compares two tag names the way `git tag --sort=v:refname` does.
///
/// This is git's `versioncmp`, a port of `strverscmp`: digit runs compare
/// numerically, but a run with leading zeros is read as a fraction and
/// sorts below every plain number (`v1.09` < `v1.0.0` < `v1.1`).
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a == b {
        return Ordering::Equal;
    }

    let at = |s: &[u8], i: usize| s.get(i).copied().unwrap_or(0);
    let mut i = 0;
    let (mut c1, mut c2) = (at(a, 0), at(b, 0));
    let mut state = NORMAL + char_class(c1);

    while c1 == c2 {
        if c1 == 0 {
            // Embedded NUL; fall back to a plain comparison
            return a.cmp(b);
        }
        state = NEXT_STATE[state];
        i += 1;
        c1 = at(a, i);
        c2 = at(b, i);
        state += char_class(c1);
    }

    let diff = c1.cmp(&c2);
    match RESULT[state * 3 + char_class(c2)] {
        Resolve::Diff => diff,
        Resolve::Less => Ordering::Less,
        Resolve::Greater => Ordering::Greater,
        Resolve::Length => {
            let mut k = i + 1;
            while at(a, k).is_ascii_digit() {
                if !at(b, k).is_ascii_digit() {
                    return Ordering::Greater;
                }
                k += 1;
            }
            if at(b, k).is_ascii_digit() {
                Ordering::Less
            } else {
                diff
            }
        }
    }
}

// Scanner states, each followed by three slots for the class of the current byte
const NORMAL: usize = 0;
const INTEGER: usize = 3;
const FRACTION: usize = 6;
const ZEROS: usize = 9;

/// 0 for non-digits, 1 for `1`-`9`, 2 for `0`
fn char_class(c: u8) -> usize {
    match c {
        b'0' => 2,
        b'1'..=b'9' => 1,
        _ => 0,
    }
}

#[rustfmt::skip]
const NEXT_STATE: [usize; 12] = [
    // other    digit     zero
    NORMAL,   INTEGER,  ZEROS,    // NORMAL
    NORMAL,   INTEGER,  INTEGER,  // INTEGER
    NORMAL,   FRACTION, FRACTION, // FRACTION
    NORMAL,   FRACTION, ZEROS,    // ZEROS
];

#[derive(Clone, Copy)]
enum Resolve {
    /// Order of the first differing bytes
    Diff,
    /// Longer digit run wins, then the first differing byte
    Length,
    Less,
    Greater,
}

#[rustfmt::skip]
const RESULT: [Resolve; 36] = {
    use Resolve::*;
    [
        // x/x      x/d      x/0      d/x      d/d      d/0      0/x      0/d      0/0
        Diff,    Diff,    Diff,    Diff,    Length,  Diff,    Diff,    Diff,    Diff,   // NORMAL
        Diff,    Less,    Less,    Greater, Length,  Length,  Greater, Length,  Length, // INTEGER
        Diff,    Diff,    Diff,    Diff,    Diff,    Diff,    Diff,    Diff,    Diff,   // FRACTION
        Diff,    Greater, Greater, Less,    Diff,    Diff,    Less,    Diff,    Diff,   // ZEROS
    ]
};

/// Sorts tag names newest-first by version order.
pub fn sort_descending(tags: &mut [String]) {
    tags.sort_by(|a, b| version_cmp(b, a));
}
