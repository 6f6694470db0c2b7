// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! A resource table generated by a build script from `resources/`. */

pub mod resources {
    include!(concat!(env!("OUT_DIR"), "/romfs_resources.rs"));
}

/// Directory the embedded resources were read from.
pub fn resource_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}
