// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Path pattern matching.

Patterns support `*` and `**` wildcards with deliberately loose semantics.
This is a best-effort glob, not a POSIX-compliant one: bracket classes
(`[...]`) and `?` are *not* supported and are compared literally.

The rules, applied to forward-slash normalized strings:

* An empty pattern never matches.
* A pattern equal to the path matches.
* A pattern containing `**` is split around its first `**` into `before` and
  `after`. `before` (one trailing `/` removed) must be a prefix of the path.
  An empty `after` (one leading `/` removed) matches everything below that
  prefix. If `after` contains another `**`, only the text preceding it (one
  trailing `/` removed) must occur somewhere in the path. If `after` has the
  form `*suffix`, the path must end with `suffix`. Otherwise `after` must
  occur somewhere in the path.
* A pattern containing a single `*` (and no `**`) is split into `before` and
  `after` around it. The path must start with `before`, end with `after` and
  be at least as long as both combined. `*` may span `/`.
* Any other pattern only matches by equality.

Existing ignore files depend on these exact semantics, so they should not be
"fixed" into a stricter glob grammar.
*/

use std::borrow::Cow;

fn normalize_separators(s: &str) -> Cow<'_, str> {
    if s.contains('\\') {
        Cow::Owned(s.replace('\\', "/"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Whether `path` matches `pattern`.
///
/// See the module documentation for the supported syntax.
pub fn matches(path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let path = normalize_separators(path);
    let pattern = normalize_separators(pattern);
    let (path, pattern) = (path.as_ref(), pattern.as_ref());

    if path == pattern {
        return true;
    }

    if let Some(pos) = pattern.find("**") {
        let before = &pattern[..pos];
        let before = before.strip_suffix('/').unwrap_or(before);
        let after = &pattern[pos + 2..];
        let after = after.strip_prefix('/').unwrap_or(after);

        if !path.starts_with(before) {
            return false;
        }

        if after.is_empty() {
            return true;
        }

        if let Some(second) = after.find("**") {
            let middle = &after[..second];
            let middle = middle.strip_suffix('/').unwrap_or(middle);

            return middle.is_empty() || path.contains(middle);
        }

        if let Some(star) = after.find('*') {
            let (prefix, suffix) = (&after[..star], &after[star + 1..]);

            if prefix.is_empty() && !suffix.is_empty() {
                return path.ends_with(suffix);
            }
        }

        return path.contains(after) || path.ends_with(after);
    }

    if let Some(star) = pattern.find('*') {
        let (before, after) = (&pattern[..star], &pattern[star + 1..]);

        if path.len() < before.len() + after.len() {
            return false;
        }

        return path.starts_with(before) && path.ends_with(after);
    }

    false
}

/// A single path pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this pattern matches a path.
    pub fn matches(&self, path: &str) -> bool {
        matches(path, &self.0)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An ordered collection of patterns.
///
/// Empty patterns are dropped on insertion since they can never match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pattern: impl Into<Pattern>) {
        let pattern = pattern.into();

        if !pattern.is_empty() {
            self.patterns.push(pattern);
        }
    }

    pub fn extend(&mut self, other: PatternSet) {
        self.patterns.extend(other.patterns);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Obtain the first pattern matching a path.
    pub fn first_match(&self, path: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.matches(path))
    }

    /// Whether any pattern matches a path.
    pub fn matches_any(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }
}

impl<P: Into<Pattern>> FromIterator<P> for PatternSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = Self::new();

        for p in iter {
            set.push(p);
        }

        set
    }
}
