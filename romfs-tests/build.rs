// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use romfs_generator::{Generator, GeneratorConfig};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let compress = std::env::var_os("CARGO_FEATURE_COMPRESS_RESOURCES").is_some();

    let config = GeneratorConfig::new(
        "test_project",
        std::path::Path::new(&manifest_dir).join("resources"),
    )
    .compress(compress)
    .strict(true)
    .emit_cargo_directives(true);

    if let Err(e) = Generator::new(config).and_then(|g| g.run_from_build()) {
        panic!("failed to generate resource table: {}", e);
    }
}
