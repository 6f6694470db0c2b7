// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Resource path normalization.

Resource paths are relative to the resource root and always use `/` as the
separator, regardless of the platform the table was generated on.
*/

use std::borrow::Cow;

/// Normalize a resource path for lookup.
///
/// Backslashes are converted to forward slashes and leading `./` components
/// are removed. No other canonicalization (e.g. `..` resolution) is performed.
pub fn normalize(path: &str) -> Cow<'_, str> {
    let path = if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    };

    if !path.starts_with("./") {
        return path;
    }

    match path {
        Cow::Borrowed(s) => Cow::Borrowed(strip_dot_slash(s)),
        Cow::Owned(s) => Cow::Owned(strip_dot_slash(&s).to_string()),
    }
}

fn strip_dot_slash(mut s: &str) -> &str {
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }

    s
}
