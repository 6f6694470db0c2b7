// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::pattern::{Pattern, PatternSet};

/// Outcome of evaluating a path against a [FileFilter].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterDecision<'a> {
    Accepted,
    /// An include list exists and no pattern in it matched.
    NotIncluded,
    /// The path matched this exclude pattern.
    Excluded(&'a Pattern),
}

impl<'a> FilterDecision<'a> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Include/exclude decision for resource paths.
///
/// A non-empty include set acts as a whitelist gate. The exclude set is
/// consulted afterwards and always wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileFilter {
    include: PatternSet,
    exclude: PatternSet,
}

impl FileFilter {
    pub fn new(include: PatternSet, exclude: PatternSet) -> Self {
        Self { include, exclude }
    }

    pub fn include(&self) -> &PatternSet {
        &self.include
    }

    pub fn exclude(&self) -> &PatternSet {
        &self.exclude
    }

    pub fn add_include(&mut self, pattern: impl Into<Pattern>) {
        self.include.push(pattern);
    }

    pub fn add_exclude(&mut self, pattern: impl Into<Pattern>) {
        self.exclude.push(pattern);
    }

    pub fn extend_exclude(&mut self, patterns: PatternSet) {
        self.exclude.extend(patterns);
    }

    /// Evaluate a normalized relative path.
    pub fn evaluate(&self, path: &str) -> FilterDecision<'_> {
        if !self.include.is_empty() && !self.include.matches_any(path) {
            return FilterDecision::NotIncluded;
        }

        match self.exclude.first_match(path) {
            Some(pattern) => FilterDecision::Excluded(pattern),
            None => FilterDecision::Accepted,
        }
    }

    pub fn accepts(&self, path: &str) -> bool {
        self.evaluate(path).is_accepted()
    }
}
