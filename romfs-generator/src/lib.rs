// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Generate Rust modules embedding a directory tree as a romfs resource table.

A [Generator] discovers files under a root directory (see
[romfs_file_manifest]), packages them into sentinel-terminated and optionally
compressed payloads, then writes a Rust module defining a
[romfs::ResourceTable] over them.

The typical consumer is a Cargo build script:

```ignore
fn main() {
    let config = romfs_generator::GeneratorConfig::new("my_project", "resources")
        .compress(std::env::var_os("CARGO_FEATURE_COMPRESS_RESOURCES").is_some())
        .emit_cargo_directives(true);

    romfs_generator::Generator::new(config)
        .and_then(|g| g.run_from_build())
        .expect("failed to generate resources");
}
```

The crate then includes the module:

```ignore
pub mod resources {
    include!(concat!(env!("OUT_DIR"), "/romfs_resources.rs"));
}
```

A `romfs-generator` command line tool writing the same module to an arbitrary
path is also provided.
*/

mod config;
pub mod emit;
mod error;
mod generator;
pub mod packager;

pub use crate::{
    config::GeneratorConfig,
    error::{GeneratorError, Result},
    generator::{Generator, DEFAULT_OUTPUT_FILE_NAME},
    packager::{PackageWarning, PackagedEntry, PackagedTable, Packager},
};
