// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Read-only resource tables embedded in a binary.

This crate defines the runtime half of *romfs*: a way to ship an arbitrary
directory tree of files (templates, icons, schemas, ...) inside a compiled
artifact and read those files back by path without touching the filesystem.

The build-time half lives in the `romfs-generator` crate. It walks a resource
directory, appends a single `0x00` sentinel byte to every file, optionally
deflate-compresses the result, and emits Rust source defining a
[ResourceTable]. That generated module is `include!`d into the consuming crate.

At run time, a [ResourceStore] wraps a [ResourceTable] and hands out
[Resource] instances. Compressed resources are decompressed lazily on first
access and cached for the lifetime of the store. The cache is initialized at
most once, even when multiple threads race on the first access.

# Compression

Whether payloads are compressed is a property of the whole table. The
`compress-resources` cargo feature of this crate declares what this build
expects ([COMPRESSION_ENABLED]). Generated modules assert at compile time that
the table they define agrees with it, and [ResourceStore::new] refuses tables
that disagree with [StoreSettings] with [RomfsError::ConfigMismatch].

# Example

```
use romfs::{ResourceEntry, ResourceStore, ResourceTable, StoreSettings};

static ENTRIES: [ResourceEntry<'static>; 1] =
    [ResourceEntry::new("hello.txt", b"Hello, romfs!\0")];

let table = ResourceTable::new("example", false, &ENTRIES);
let store = ResourceStore::with_settings(table, StoreSettings::raw())?;

assert_eq!(store.get("hello.txt")?.string()?, "Hello, romfs!");
assert_eq!(store.list(""), vec!["hello.txt"]);
# Ok::<(), romfs::RomfsError>(())
```
*/

pub mod compression;
mod error;
pub mod path;
mod resource;
mod store;
mod table;

pub use crate::{
    error::{Result, RomfsError},
    resource::Resource,
    store::{EmbeddedStore, ResourceStore, StoreSettings},
    table::{ResourceEntry, ResourceTable},
};

/// Whether this build of the crate expects compressed resource tables.
///
/// Controlled by the `compress-resources` cargo feature.
pub const COMPRESSION_ENABLED: bool = cfg!(feature = "compress-resources");

/// The byte appended to every resource payload before packaging.
pub const SENTINEL: u8 = 0x00;
