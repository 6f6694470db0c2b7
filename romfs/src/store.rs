// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Lookup facade over a resource table. */

use {
    crate::{
        error::{Result, RomfsError},
        path::normalize,
        resource::Resource,
        table::ResourceTable,
        COMPRESSION_ENABLED,
    },
    once_cell::sync::OnceCell,
    std::collections::HashMap,
};

/// Runtime settings applied when constructing a [ResourceStore].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreSettings {
    /// Whether the runtime expects the table to be compressed.
    ///
    /// A table whose flag disagrees is rejected.
    pub compressed: bool,

    /// Decompress every resource while constructing the store.
    ///
    /// Moves the decompression cost (and any corruption error) to load time.
    pub eager: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            compressed: COMPRESSION_ENABLED,
            eager: false,
        }
    }
}

impl StoreSettings {
    /// Settings expecting a compressed table.
    pub fn compressed() -> Self {
        Self {
            compressed: true,
            eager: false,
        }
    }

    /// Settings expecting an uncompressed table.
    pub fn raw() -> Self {
        Self {
            compressed: false,
            eager: false,
        }
    }

    pub fn with_eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }
}

/// Provides path-based access to the resources of one [ResourceTable].
///
/// Each embedded table gets its own store. The store owns one [Resource] per
/// table entry, so decompression caches live as long as the store.
#[derive(Debug)]
pub struct ResourceStore<'a> {
    name: &'a str,
    compressed: bool,
    resources: Vec<Resource<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ResourceStore<'a> {
    /// Construct a store using [StoreSettings::default].
    pub fn new(table: ResourceTable<'a>) -> Result<Self> {
        Self::with_settings(table, StoreSettings::default())
    }

    /// Construct a store with explicit settings.
    ///
    /// Fails if the table's compression flag disagrees with the settings or
    /// if the table contains duplicate paths. With `eager` set, also fails if
    /// any payload cannot be decompressed.
    pub fn with_settings(table: ResourceTable<'a>, settings: StoreSettings) -> Result<Self> {
        if table.is_compressed() != settings.compressed {
            return Err(RomfsError::ConfigMismatch {
                table: table.is_compressed(),
                runtime: settings.compressed,
            });
        }

        let mut resources = Vec::with_capacity(table.len());
        let mut index = HashMap::with_capacity(table.len());

        for (i, entry) in table.entries().iter().enumerate() {
            if index.insert(entry.path(), i).is_some() {
                return Err(RomfsError::DuplicatePath(entry.path().to_string()));
            }

            resources.push(Resource::new(*entry, table.is_compressed()));
        }

        if settings.eager {
            for resource in &resources {
                resource.try_data()?;
            }
        }

        log::debug!(
            "loaded resource table {} ({} entries, compressed={})",
            table.name(),
            resources.len(),
            table.is_compressed()
        );

        Ok(Self {
            name: table.name(),
            compressed: table.is_compressed(),
            resources,
            index,
        })
    }

    /// The project identifier of the underlying table.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Whether the underlying table is compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Obtain the resource stored at a path.
    ///
    /// The path is normalized (see [crate::path::normalize]) and must then
    /// match an entry exactly.
    pub fn get(&self, path: impl AsRef<str>) -> Result<&Resource<'a>> {
        let path = path.as_ref();

        self.index
            .get(&*normalize(path))
            .map(|i| &self.resources[*i])
            .ok_or_else(|| RomfsError::NotFound(path.to_string()))
    }

    /// Whether a resource exists at a path.
    pub fn contains(&self, path: impl AsRef<str>) -> bool {
        self.index.contains_key(&*normalize(path.as_ref()))
    }

    /// Paths of all resources whose path starts with `prefix`.
    ///
    /// The prefix is normalized like lookup paths. An empty prefix returns
    /// every path. Results are in table order.
    pub fn list(&self, prefix: impl AsRef<str>) -> Vec<&'a str> {
        let prefix = normalize(prefix.as_ref());

        self.paths()
            .filter(|path| path.starts_with(&*prefix))
            .collect()
    }

    /// Iterate over all resource paths in table order.
    pub fn paths(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.resources.iter().map(|r| r.path())
    }

    /// Iterate over all resources in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource<'a>> {
        self.resources.iter()
    }
}

/// A lazily constructed [ResourceStore] over a `'static` table.
///
/// This is the type generated modules place in a `static` to give each
/// embedded table one process-wide store. The store is built on first use.
pub struct EmbeddedStore {
    table: fn() -> ResourceTable<'static>,
    store: OnceCell<ResourceStore<'static>>,
}

impl EmbeddedStore {
    pub const fn new(table: fn() -> ResourceTable<'static>) -> Self {
        Self {
            table,
            store: OnceCell::new(),
        }
    }

    /// Obtain the store, constructing it with default settings if needed.
    pub fn try_get(&self) -> Result<&ResourceStore<'static>> {
        self.store.get_or_try_init(|| ResourceStore::new((self.table)()))
    }

    /// Obtain the store.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table is incompatible with this build of the
    /// crate. Serving resources from such a table is never meaningful.
    pub fn get(&self) -> &ResourceStore<'static> {
        self.try_get()
            .unwrap_or_else(|e| panic!("unable to load embedded resources: {}", e))
    }
}
