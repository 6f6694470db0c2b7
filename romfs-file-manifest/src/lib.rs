// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Discover and filter the files that make up a romfs resource table.

[FileDiscoverer] walks a resource root and yields [DiscoveredFile] entries
with forward-slash normalized relative paths. Which files are accepted is
decided by a [FileFilter] built from include and exclude [PatternSet]s. The
exclude set is typically seeded from an ignore file in the root (see
[load_ignore_rules]).
*/

mod discovery;
mod error;
mod filter;
mod ignore;
pub mod pattern;

pub use crate::{
    discovery::{
        DiscoveredFile, Discovery, DiscoveryReport, FileDiscoverer, HOUSEKEEPING_FILE_NAMES,
    },
    error::{FileManifestError, Result},
    filter::{FileFilter, FilterDecision},
    ignore::{load_ignore_rules, parse_ignore_rules, DEFAULT_IGNORE_FILE_NAME},
    pattern::{matches, Pattern, PatternSet},
};
