// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Ignore files.

An ignore file lists one exclude pattern per line. Surrounding whitespace is
trimmed, and blank lines and lines starting with `#` are skipped.
*/

use {
    crate::{error::Result, pattern::PatternSet},
    std::path::Path,
};

/// The default name of the ignore file inside a resource root.
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".romfsignore";

/// Parse the content of an ignore file into an ordered pattern set.
pub fn parse_ignore_rules(content: &str) -> PatternSet {
    content
        .lines()
        .map(|line| line.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n')))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Load the ignore file named `file_name` inside `root`.
///
/// A missing ignore file yields an empty set.
pub fn load_ignore_rules(root: impl AsRef<Path>, file_name: &str) -> Result<PatternSet> {
    let path = root.as_ref().join(file_name);

    if !path.exists() {
        return Ok(PatternSet::new());
    }

    let content = std::fs::read_to_string(&path)?;
    let rules = parse_ignore_rules(&content);

    log::debug!(
        "loaded {} ignore rules from {}",
        rules.len(),
        path.display()
    );

    Ok(rules)
}
