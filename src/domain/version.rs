use crate::error::{ReleaseError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Release lineage a version belongs to, derived from its patch token.
///
/// `Core` sorts before `Knots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    Core,
    Knots,
}

impl Base {
    pub fn as_str(&self) -> &'static str {
        match self {
            Base::Core => "core",
            Base::Knots => "knots",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed release directory name.
///
/// Grammar:
/// `<major>.<minor>[.<patch>][+<fork>-v<fork_major>.<fork_minor>[.<fork_patch>]][rc<n>]`
///
/// The source string is kept verbatim and is what `Display` prints, so a
/// parsed identifier can always be turned back into its directory name.
#[derive(Debug, Clone)]
pub struct VersionIdentifier {
    major: u64,
    minor: u64,
    patch: Option<String>,
    fork: String,
    fork_major: u64,
    fork_minor: u64,
    fork_patch: u64,
    rc: Option<u64>,
    original: String,
}

impl VersionIdentifier {
    /// Parse a version identifier, failing with `MalformedVersion` when the
    /// whole input does not match the grammar.
    ///
    /// # Examples
    /// ```ignore
    /// let v = VersionIdentifier::parse("29.1.knots20250305rc2")?;
    /// assert_eq!(v.patch(), Some("knots20250305"));
    /// assert_eq!(v.rc(), Some(2));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || ReleaseError::malformed(input);
        let mut cursor = Cursor::new(input);

        let major = cursor.number().ok_or_else(malformed)?;
        if !cursor.eat(".") {
            return Err(malformed());
        }
        let minor = cursor.number().ok_or_else(malformed)?;

        let mut patch = None;
        let mut rc = None;
        if cursor.eat(".") {
            let token = cursor.take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
            if token.is_empty() {
                return Err(malformed());
            }
            // An rc marker can only hide inside the token when nothing follows it.
            let (head, marker) = if cursor.is_done() {
                split_rc_suffix(token).ok_or_else(malformed)?
            } else {
                (token, None)
            };
            if knots_number(head).is_some_and(|n| n.is_none()) {
                return Err(malformed());
            }
            patch = Some(head.to_string());
            rc = marker;
        }

        let mut fork = String::new();
        let (mut fork_major, mut fork_minor, mut fork_patch) = (0, 0, 0);
        if cursor.eat("+") {
            let name = cursor.take_while(|b| b != b'-');
            if name.is_empty() || !cursor.eat("-v") {
                return Err(malformed());
            }
            fork = name.to_string();
            fork_major = cursor.number().ok_or_else(malformed)?;
            if !cursor.eat(".") {
                return Err(malformed());
            }
            fork_minor = cursor.number().ok_or_else(malformed)?;
            if cursor.eat(".") {
                fork_patch = cursor.number().ok_or_else(malformed)?;
            }
        }

        if rc.is_none() && cursor.eat("rc") {
            rc = Some(cursor.number().ok_or_else(malformed)?);
        }

        if !cursor.is_done() {
            return Err(malformed());
        }

        Ok(VersionIdentifier {
            major,
            minor,
            patch,
            fork,
            fork_major,
            fork_minor,
            fork_patch,
            rc,
            original: input.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> Option<&str> {
        self.patch.as_deref()
    }

    /// Fork name, empty when this is not a fork.
    pub fn fork(&self) -> &str {
        &self.fork
    }

    pub fn fork_major(&self) -> u64 {
        self.fork_major
    }

    pub fn fork_minor(&self) -> u64 {
        self.fork_minor
    }

    pub fn fork_patch(&self) -> u64 {
        self.fork_patch
    }

    pub fn rc(&self) -> Option<u64> {
        self.rc
    }

    /// The string this identifier was parsed from.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// `Knots` when the patch token starts with `knots`, otherwise `Core`.
    pub fn base(&self) -> Base {
        match &self.patch {
            Some(patch) if patch.starts_with("knots") => Base::Knots,
            _ => Base::Core,
        }
    }

    /// Trailing number of a `knots<digits>` patch token, 0 for anything else.
    pub fn patch_num(&self) -> u64 {
        self.patch
            .as_deref()
            .and_then(knots_number)
            .flatten()
            .unwrap_or(0)
    }

    pub fn is_rc(&self) -> bool {
        self.rc.is_some()
    }

    pub fn is_fork(&self) -> bool {
        !self.fork.is_empty()
    }

    /// `<fork>-v<major>.<minor>[.<patch>]`, empty for non-forks.
    ///
    /// The fork patch is only shown when it is non-zero.
    pub fn fork_label(&self) -> String {
        if !self.is_fork() {
            return String::new();
        }
        let mut label = format!("{}-v{}.{}", self.fork, self.fork_major, self.fork_minor);
        if self.fork_patch != 0 {
            label.push_str(&format!(".{}", self.fork_patch));
        }
        label
    }

    /// Precedence, then the raw patch token. `Equal` only for `==` versions.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
            .then_with(|| patch_key(self.patch.as_deref()).cmp(&patch_key(other.patch.as_deref())))
    }
}

impl FromStr for VersionIdentifier {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        VersionIdentifier::parse(s)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.rc == other.rc
            && self.fork == other.fork
            && self.fork_major == other.fork_major
            && self.fork_minor == other.fork_minor
            && self.fork_patch == other.fork_patch
    }
}

impl Eq for VersionIdentifier {}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Release precedence.
///
/// Patch tokens only take part through `patch_num`, so two versions can rank
/// `Equal` without being `==` (`30.2.1` and `30.2.2` are both core releases
/// of 30.2). Use [`VersionIdentifier::total_cmp`] where a deterministic
/// order of distinct versions is needed.
impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base()
            .cmp(&other.base())
            .then_with(|| self.fork.cmp(&other.fork))
            .then_with(|| {
                (self.major, self.minor, self.patch_num()).cmp(&(
                    other.major,
                    other.minor,
                    other.patch_num(),
                ))
            })
            .then_with(|| {
                (self.fork_major, self.fork_minor, self.fork_patch).cmp(&(
                    other.fork_major,
                    other.fork_minor,
                    other.fork_patch,
                ))
            })
            .then_with(|| compare_rc(self.rc, other.rc))
    }
}

/// A release (no rc) outranks every release candidate.
fn compare_rc(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// Tie-break on the raw patch token: numeric tokens by value first, then
/// everything else by text.
fn patch_key(patch: Option<&str>) -> Option<(u8, u64, &str)> {
    patch.map(|p| {
        if p.bytes().all(|b| b.is_ascii_digit()) {
            (0, p.parse::<u64>().unwrap_or(u64::MAX), p)
        } else {
            (1, 0, p)
        }
    })
}

/// Split `1rc2` into (`1`, Some(2)). The head must stay non-empty, so a bare
/// `rc2` token is a patch named `rc2`. `None` when the rc number overflows.
fn split_rc_suffix(token: &str) -> Option<(&str, Option<u64>)> {
    if let Some(idx) = token.rfind("rc") {
        let digits = &token[idx + 2..];
        if idx > 0 && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits.parse::<u64>().ok().map(|n| (&token[..idx], Some(n)));
        }
    }
    Some((token, None))
}

/// Number of a `knots<digits>` token: `None` for other tokens,
/// `Some(None)` when the digits overflow.
fn knots_number(patch: &str) -> Option<Option<u64>> {
    patch
        .strip_prefix("knots")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .map(|digits| digits.parse::<u64>().ok())
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos == self.src.len()
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    // Predicates only ever stop on ASCII bytes, so `pos` stays on a char boundary.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && pred(bytes[self.pos]) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn number(&mut self) -> Option<u64> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionIdentifier {
        VersionIdentifier::parse(s).unwrap()
    }

    #[test]
    fn test_parse_major_minor() {
        let version = v("30.2");
        assert_eq!(version.major(), 30);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), None);
        assert_eq!(version.rc(), None);
        assert!(!version.is_fork());
        assert_eq!(version.base(), Base::Core);
    }

    #[test]
    fn test_parse_knots_patch() {
        let version = v("29.1.knots20250305");
        assert_eq!(version.patch(), Some("knots20250305"));
        assert_eq!(version.base(), Base::Knots);
        assert_eq!(version.patch_num(), 20250305);
    }

    #[test]
    fn test_parse_rc_without_patch() {
        let version = v("30.2rc1");
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), None);
        assert_eq!(version.rc(), Some(1));
        assert!(version.is_rc());
    }

    #[test]
    fn test_parse_rc_after_patch() {
        let version = v("30.2.1rc3");
        assert_eq!(version.patch(), Some("1"));
        assert_eq!(version.rc(), Some(3));

        let knots = v("29.1.knots20250305rc2");
        assert_eq!(knots.patch(), Some("knots20250305"));
        assert_eq!(knots.rc(), Some(2));
    }

    #[test]
    fn test_parse_bare_rc_token_is_patch() {
        let version = v("30.2.rc1");
        assert_eq!(version.patch(), Some("rc1"));
        assert_eq!(version.rc(), None);
    }

    #[test]
    fn test_parse_fork() {
        let version = v("29.1.knots20250305+bip110-v0.1");
        assert_eq!(version.fork(), "bip110");
        assert_eq!(version.fork_major(), 0);
        assert_eq!(version.fork_minor(), 1);
        assert_eq!(version.fork_patch(), 0);
        assert_eq!(version.fork_label(), "bip110-v0.1");
    }

    #[test]
    fn test_parse_fork_with_patch_and_rc() {
        let version = v("29.1.knots1+bip110-v0.1.2rc4");
        assert_eq!(version.fork_label(), "bip110-v0.1.2");
        assert_eq!(version.rc(), Some(4));
        assert_eq!(version.patch(), Some("knots1"));
    }

    #[test]
    fn test_parse_patch_keeps_rc_before_fork() {
        let version = v("30.2.1rc1+f-v1.0");
        assert_eq!(version.patch(), Some("1rc1"));
        assert_eq!(version.rc(), None);
        assert_eq!(version.fork(), "f");
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "30",
            "30.",
            "30.knots1",
            "30.2.",
            "30.2.Knots1",
            "30.2-1",
            "v30.2",
            "30.2rc",
            "30.2+-v1.0",
            "30.2+fork-1.0",
            "30.2+fork-v1",
            "30.2 ",
            "master",
            "99999999999999999999999.1",
        ] {
            assert!(
                matches!(
                    VersionIdentifier::parse(input),
                    Err(ReleaseError::MalformedVersion(_))
                ),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_display_preserves_original() {
        let version = v("29.1.knots20250305+bip110-v0.1");
        assert_eq!(version.to_string(), "29.1.knots20250305+bip110-v0.1");
        assert_eq!(v(&version.to_string()), version);
    }

    #[test]
    fn test_equality_ignores_source_spelling() {
        assert_eq!(v("30.2+f-v1.0"), v("30.2+f-v1.0.0"));
        assert_eq!(v("30.2+f-v1.0").cmp(&v("30.2+f-v1.0.0")), Ordering::Equal);
    }

    #[test]
    fn test_patch_num_only_for_knots_digits() {
        assert_eq!(v("30.2.1").patch_num(), 0);
        assert_eq!(v("30.2.knots").patch_num(), 0);
        assert_eq!(v("30.2.knotsx1").patch_num(), 0);
        assert_eq!(v("30.2.knots7").patch_num(), 7);
    }

    #[test]
    fn test_core_sorts_before_knots() {
        assert!(v("30.2") < v("29.1.knots1"));
        assert!(v("30.2.1") < v("30.2.knots1"));
    }

    #[test]
    fn test_fork_sorts_after_plain() {
        assert!(v("30.2.knots1") < v("29.1.knots1+bip110-v0.1"));
        assert!(v("29.1.knots1+a-v9.0") < v("29.1.knots1+b-v0.1"));
    }

    #[test]
    fn test_numeric_tiers() {
        assert!(v("29.1") < v("29.2"));
        assert!(v("29.9") < v("30.0"));
        assert!(v("29.1.knots9") < v("29.1.knots10"));
        assert!(v("29.1.knots1+f-v0.1") < v("29.1.knots1+f-v0.1.1"));
        assert!(v("29.1.knots1+f-v0.9") < v("29.1.knots1+f-v1.0"));
    }

    #[test]
    fn test_release_outranks_rc() {
        assert!(v("30.2rc1") < v("30.2"));
        assert!(v("30.2rc9") < v("30.2"));
        assert!(v("30.2rc1") < v("30.2rc2"));
        assert!(v("29.1.knots5rc3") < v("29.1.knots5"));
        assert!(v("30.2") < v("30.3rc1"));
    }

    #[test]
    fn test_non_knots_patches_share_precedence() {
        assert_eq!(v("30.2").cmp(&v("30.2.1")), Ordering::Equal);
        assert_eq!(v("30.2.1").cmp(&v("30.2.2")), Ordering::Equal);
        assert!(v("30.2.1") >= v("30.2.2"));
        assert!(v("30.2.2") >= v("30.2.1"));
        assert_ne!(v("30.2.1"), v("30.2.2"));
        assert!(v("30.2.2rc1") < v("30.2.1"));
    }

    #[test]
    fn test_total_cmp_separates_patch_tokens() {
        assert_eq!(v("30.2").total_cmp(&v("30.2.1")), Ordering::Less);
        assert_eq!(v("30.2.1").total_cmp(&v("30.2.2")), Ordering::Less);
        assert_eq!(v("30.2.9").total_cmp(&v("30.2.10")), Ordering::Less);
        assert_eq!(v("30.2.10").total_cmp(&v("30.2.a")), Ordering::Less);
        assert_eq!(v("30.2+f-v1.0").total_cmp(&v("30.2+f-v1.0.0")), Ordering::Equal);
        assert_eq!(v("29.1.knots1").total_cmp(&v("30.2")), Ordering::Greater);
    }

    #[test]
    fn test_overflowing_numbers_are_rejected() {
        for input in [
            "30.2.1rc99999999999999999999999",
            "30.2rc99999999999999999999999",
            "30.2.knots99999999999999999999999",
            "30.2+f-v1.99999999999999999999999",
        ] {
            assert!(
                matches!(
                    VersionIdentifier::parse(input),
                    Err(ReleaseError::MalformedVersion(_))
                ),
                "expected '{}' to be rejected",
                input
            );
        }
    }
}
