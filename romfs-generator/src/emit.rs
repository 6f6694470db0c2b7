// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Emission of Rust source code defining a resource table.

The emitted module is meant to be `include!`d by a crate that depends on
`romfs`:

```ignore
mod resources {
    include!(concat!(env!("OUT_DIR"), "/romfs_resources.rs"));
}

let readme = resources::get("README.md")?;
```

It defines:

* `NAME` and `COMPRESSED` constants.
* A compile-time assertion that `COMPRESSED` agrees with
  `romfs::COMPRESSION_ENABLED`.
* `get_resources()`, `get_paths()` and `get_name()` returning the table, its
  paths and its name.
* `store()`, `get()`, `list()` and `name()` backed by a process-wide
  `romfs::EmbeddedStore`.
*/

use {crate::packager::PackagedTable, std::io::Write};

const BYTES_PER_LINE: usize = 16;

/// Render a string as a Rust string literal.
fn string_literal(s: &str) -> String {
    format!("{:?}", s)
}

fn write_byte_array<W: Write>(dest: &mut W, ident: &str, data: &[u8]) -> std::io::Result<()> {
    writeln!(dest, "static {}: [u8; {}] = [", ident, data.len())?;

    for chunk in data.chunks(BYTES_PER_LINE) {
        let line = chunk
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(dest, "    {},", line)?;
    }

    writeln!(dest, "];")?;
    writeln!(dest)
}

/// Write a Rust module defining `table` to `dest`.
pub fn write_rust_module<W: Write>(table: &PackagedTable, dest: &mut W) -> std::io::Result<()> {
    let count = table.entries.len();

    writeln!(
        dest,
        "// @generated by romfs-generator {}. Do not edit.",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(dest, "//")?;
    writeln!(
        dest,
        "// Resource table {} with {} entries.",
        string_literal(&table.name),
        count
    )?;
    writeln!(dest)?;

    writeln!(dest, "/// Name of this resource table.")?;
    writeln!(dest, "pub const NAME: &str = {};", string_literal(&table.name))?;
    writeln!(dest)?;
    writeln!(dest, "/// Whether payloads in this table are compressed.")?;
    writeln!(dest, "pub const COMPRESSED: bool = {};", table.compressed)?;
    writeln!(dest)?;
    writeln!(dest, "const _: () = assert!(")?;
    writeln!(dest, "    COMPRESSED == ::romfs::COMPRESSION_ENABLED,")?;
    writeln!(
        dest,
        "    \"Compression mismatch: generated resources and the romfs crate must both be \
         built with or without the compress-resources feature\""
    )?;
    writeln!(dest, ");")?;
    writeln!(dest)?;

    for (i, entry) in table.entries.iter().enumerate() {
        writeln!(dest, "// {}", entry.path.escape_debug())?;
        write_byte_array(dest, &format!("RESOURCE_{}", i), &entry.data)?;
    }

    writeln!(
        dest,
        "static ENTRIES: [::romfs::ResourceEntry<'static>; {}] = [",
        count
    )?;
    for (i, entry) in table.entries.iter().enumerate() {
        writeln!(
            dest,
            "    ::romfs::ResourceEntry::new({}, &RESOURCE_{}),",
            string_literal(&entry.path),
            i
        )?;
    }
    writeln!(dest, "];")?;
    writeln!(dest)?;

    writeln!(dest, "static PATHS: [&str; {}] = [", count)?;
    for entry in &table.entries {
        writeln!(dest, "    {},", string_literal(&entry.path))?;
    }
    writeln!(dest, "];")?;
    writeln!(dest)?;

    dest.write_all(ACCESSORS.as_bytes())
}

const ACCESSORS: &str = r#"static STORE: ::romfs::EmbeddedStore = ::romfs::EmbeddedStore::new(get_resources);

/// Obtain the resource table.
pub fn get_resources() -> ::romfs::ResourceTable<'static> {
    ::romfs::ResourceTable::new(NAME, COMPRESSED, &ENTRIES)
}

/// Obtain the paths of all resources, in table order.
pub fn get_paths() -> &'static [&'static str] {
    &PATHS
}

/// Obtain the name of this resource table.
pub fn get_name() -> &'static str {
    NAME
}

/// Obtain the process-wide store over this table.
///
/// Panics if the table is incompatible with the linked romfs crate.
pub fn store() -> &'static ::romfs::ResourceStore<'static> {
    STORE.get()
}

/// Obtain the resource at a path.
pub fn get(path: &str) -> ::romfs::Result<&'static ::romfs::Resource<'static>> {
    store().get(path)
}

/// Obtain the paths of all resources starting with `prefix`.
pub fn list(prefix: &str) -> ::std::vec::Vec<&'static str> {
    store().list(prefix)
}

/// Obtain the name of this resource table.
pub fn name() -> &'static str {
    NAME
}
"#;

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::packager::{PackagedEntry, PackagedTable},
        std::path::PathBuf,
    };

    fn table(entries: &[(&str, &[u8])], compressed: bool) -> PackagedTable {
        PackagedTable {
            name: "test_project".to_string(),
            compressed,
            entries: entries
                .iter()
                .map(|(path, data)| PackagedEntry {
                    path: path.to_string(),
                    source: PathBuf::from(path),
                    data: data.to_vec(),
                })
                .collect(),
            warnings: vec![],
        }
    }

    fn render(table: &PackagedTable) -> std::io::Result<String> {
        let mut out = Vec::new();
        write_rust_module(table, &mut out)?;

        Ok(String::from_utf8(out).expect("generated code should be UTF-8"))
    }

    #[test]
    fn test_emit_entries() -> std::io::Result<()> {
        let code = render(&table(
            &[("hello.txt", b"Hi\0"), ("subdir/nested.txt", b"n\0")],
            false,
        ))?;

        assert!(code.contains("pub const NAME: &str = \"test_project\";"));
        assert!(code.contains("pub const COMPRESSED: bool = false;"));
        assert!(code.contains("COMPRESSED == ::romfs::COMPRESSION_ENABLED"));
        assert!(code.contains("static RESOURCE_0: [u8; 3] = [\n    72, 105, 0,\n];"));
        assert!(code.contains("static RESOURCE_1: [u8; 2] = [\n    110, 0,\n];"));
        assert!(code.contains("static ENTRIES: [::romfs::ResourceEntry<'static>; 2] = ["));
        assert!(code.contains("    ::romfs::ResourceEntry::new(\"hello.txt\", &RESOURCE_0),"));
        assert!(code
            .contains("    ::romfs::ResourceEntry::new(\"subdir/nested.txt\", &RESOURCE_1),"));
        assert!(code.contains("static PATHS: [&str; 2] = [\n    \"hello.txt\",\n    \"subdir/nested.txt\",\n];"));
        assert!(code.contains("pub fn get_resources()"));
        assert!(code.contains("pub fn get_paths()"));
        assert!(code.contains("pub fn get_name()"));

        Ok(())
    }

    #[test]
    fn test_emit_compressed_flag() -> std::io::Result<()> {
        let code = render(&table(&[("a", b"x")], true))?;
        assert!(code.contains("pub const COMPRESSED: bool = true;"));

        Ok(())
    }

    #[test]
    fn test_emit_wraps_long_arrays() -> std::io::Result<()> {
        let data = (0u8..=40).collect::<Vec<_>>();
        let code = render(&table(&[("long.bin", &data)], false))?;

        assert!(code.contains(
            "static RESOURCE_0: [u8; 41] = [\n    \
             0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,\n    \
             16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,\n    \
             32, 33, 34, 35, 36, 37, 38, 39, 40,\n];"
        ));

        Ok(())
    }

    #[test]
    fn test_emit_escapes_strings() -> std::io::Result<()> {
        let mut t = table(&[("quo\"te\\d.txt", b"\0")], false);
        t.name = "we\"ird".to_string();
        let code = render(&t)?;

        assert!(code.contains(r#"pub const NAME: &str = "we\"ird";"#));
        assert!(code.contains(r#"::romfs::ResourceEntry::new("quo\"te\\d.txt", &RESOURCE_0),"#));
        assert!(code.contains("// quo\\\"te\\\\d.txt\n"));

        Ok(())
    }

    #[test]
    fn test_emit_empty_table() -> std::io::Result<()> {
        let code = render(&table(&[], false))?;

        assert!(code.contains("static ENTRIES: [::romfs::ResourceEntry<'static>; 0] = [\n];"));
        assert!(code.contains("static PATHS: [&str; 0] = [\n];"));

        Ok(())
    }
}
