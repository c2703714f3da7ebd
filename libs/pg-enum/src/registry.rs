use crate::catalog::{ArrayTypeRow, CatalogRows, LabelRow};
use parking_lot::RwLock;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// The labels of one enum type, in the order the catalog returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDescriptor {
    pub type_id: u32,
    pub labels: Vec<String>,
}

/// Pairs an enum type with its one-dimensional array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTypeLink {
    pub element_type_id: u32,
    pub array_type_id: u32,
    /// The enum type's name, for logging.
    pub type_name: String,
}

/// An immutable snapshot of every known enum type.
///
/// A type with no label rows has no descriptor at all, so a descriptor's
/// labels are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumCatalog {
    enums: BTreeMap<u32, EnumDescriptor>,
    array_links: BTreeMap<u32, ArrayTypeLink>,
}

impl EnumCatalog {
    /// Group label rows by type, keeping row order within each type, and key
    /// array links by their element (enum) type.
    pub fn build(labels: Vec<LabelRow>, array_types: Vec<ArrayTypeRow>) -> Self {
        let mut enums: BTreeMap<u32, EnumDescriptor> = BTreeMap::new();

        for LabelRow { type_id, label } in labels {
            enums
                .entry(type_id)
                .or_insert_with(|| EnumDescriptor {
                    type_id,
                    labels: Vec::new(),
                })
                .labels
                .push(label);
        }

        let array_links = array_types
            .into_iter()
            .map(|row| {
                let link = ArrayTypeLink {
                    element_type_id: row.element_type_id,
                    array_type_id: row.array_type_id,
                    type_name: row.type_name,
                };

                (link.element_type_id, link)
            })
            .collect();

        Self { enums, array_links }
    }

    pub fn lookup(&self, type_id: u32) -> Option<&EnumDescriptor> {
        self.enums.get(&type_id)
    }

    pub fn lookup_array_link(&self, type_id: u32) -> Option<&ArrayTypeLink> {
        self.array_links.get(&type_id)
    }

    /// All enum types, ordered by type id.
    pub fn enums(&self) -> impl Iterator<Item = &EnumDescriptor> + '_ {
        self.enums.values()
    }

    /// All array links, ordered by element type id.
    pub fn array_links(&self) -> impl Iterator<Item = &ArrayTypeLink> + '_ {
        self.array_links.values()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

impl From<CatalogRows> for EnumCatalog {
    fn from(rows: CatalogRows) -> Self {
        Self::build(rows.labels, rows.array_types)
    }
}

/// Shared, swappable holder of the current [`EnumCatalog`].
///
/// Readers get an `Arc` to a complete snapshot; a rebuild swaps in a new
/// snapshot under the write lock, so nobody ever sees a half-built mapping.
///
/// Every [`invalidate`](#method.invalidate) bumps a generation counter. A
/// snapshot remembers the generation that was current when its catalog read
/// started, and the registry is stale while that lags behind the counter.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    current: RwLock<Snapshot>,
    generation: AtomicU64,
}

#[derive(Debug, Default)]
struct Snapshot {
    catalog: Arc<EnumCatalog>,
    generation: u64,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a catalog built from `labels` and
    /// `array_types`.
    pub fn build(&self, labels: Vec<LabelRow>, array_types: Vec<ArrayTypeRow>) -> Arc<EnumCatalog> {
        self.replace(EnumCatalog::build(labels, array_types))
    }

    /// Swap in a new snapshot that is current as of now.
    pub fn replace(&self, catalog: EnumCatalog) -> Arc<EnumCatalog> {
        self.commit(catalog, self.generation())
    }

    /// The generation to pass to [`commit`](#method.commit) for a catalog
    /// read that starts now.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Swap in `catalog`, read as of `generation`. If the registry was
    /// invalidated after that, it stays stale.
    pub fn commit(&self, catalog: EnumCatalog, generation: u64) -> Arc<EnumCatalog> {
        let catalog = Arc::new(catalog);
        let mut current = self.current.write();

        current.catalog = Arc::clone(&catalog);
        current.generation = current.generation.max(generation);

        catalog
    }

    /// The current snapshot. Holding on to it does not block rebuilds.
    pub fn snapshot(&self) -> Arc<EnumCatalog> {
        Arc::clone(&self.current.read().catalog)
    }

    pub fn lookup(&self, type_id: u32) -> Option<EnumDescriptor> {
        self.current.read().catalog.lookup(type_id).cloned()
    }

    pub fn lookup_array_link(&self, type_id: u32) -> Option<ArrayTypeLink> {
        self.current.read().catalog.lookup_array_link(type_id).cloned()
    }

    /// Mark the contents as outdated. They stay readable until the owner
    /// rebuilds.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_stale(&self) -> bool {
        self.current.read().generation < self.generation()
    }
}
