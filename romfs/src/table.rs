// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! The resource table data model. */

/// A single packaged file: a normalized path and its payload.
///
/// For uncompressed tables the payload is the file content followed by one
/// sentinel byte. For compressed tables it is the compressed form of that same
/// sentinel-terminated sequence.
///
/// Instances are constructible in `const` context so generated code can place
/// whole tables in `static` items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceEntry<'a> {
    path: &'a str,
    payload: &'a [u8],
}

impl<'a> ResourceEntry<'a> {
    pub const fn new(path: &'a str, payload: &'a [u8]) -> Self {
        Self { path, payload }
    }

    /// The forward-slash normalized path relative to the resource root.
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// The raw (possibly compressed) payload bytes.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// An immutable, ordered collection of [ResourceEntry].
///
/// A table is either entirely compressed or entirely raw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceTable<'a> {
    name: &'a str,
    compressed: bool,
    entries: &'a [ResourceEntry<'a>],
}

impl<'a> ResourceTable<'a> {
    pub const fn new(name: &'a str, compressed: bool, entries: &'a [ResourceEntry<'a>]) -> Self {
        Self {
            name,
            compressed,
            entries,
        }
    }

    /// The project identifier this table was generated for.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Whether every payload in this table is compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Entries in packaging order.
    pub fn entries(&self) -> &'a [ResourceEntry<'a>] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entry paths in table order.
    pub fn paths(&self) -> impl Iterator<Item = &'a str> + 'a {
        let entries = self.entries;
        entries.iter().map(|e| e.path)
    }
}
