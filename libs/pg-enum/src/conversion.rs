use crate::{array::parse_array_literal, EnumCatalog};
use parking_lot::RwLock;
use sql_connection::Value;
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    sync::Arc,
};

/// Decodes a wire-format text literal into a value.
pub type ConversionProc = Arc<dyn Fn(&str) -> crate::Result<Value> + Send + Sync>;

/// Conversion procedures keyed by type oid, shared by everything that decodes
/// values for one connection.
#[derive(Default)]
pub struct ConversionProcs {
    procs: RwLock<HashMap<u32, ConversionProc>>,
}

impl ConversionProcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, oid: u32) -> Option<ConversionProc> {
        self.procs.read().get(&oid).cloned()
    }

    pub fn contains(&self, oid: u32) -> bool {
        self.procs.read().contains_key(&oid)
    }

    /// Register `proc` for `oid`, replacing any existing procedure.
    pub fn insert(&self, oid: u32, proc: ConversionProc) -> Option<ConversionProc> {
        self.procs.write().insert(oid, proc)
    }

    /// Register `proc` for `oid` unless something is registered already.
    /// The presence check and the insert happen under one write lock.
    /// Returns whether `proc` was installed.
    pub fn insert_if_absent(&self, oid: u32, proc: ConversionProc) -> bool {
        match self.procs.write().entry(oid) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(proc);
                true
            }
        }
    }

    /// Decode `text` with the procedure registered for `oid`. `None` if there
    /// is none.
    pub fn decode(&self, oid: u32, text: &str) -> Option<crate::Result<Value>> {
        // Decode without holding the lock.
        let proc = self.get(oid)?;
        Some(proc(text))
    }

    pub fn len(&self) -> usize {
        self.procs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.read().is_empty()
    }
}

impl fmt::Debug for ConversionProcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut oids: Vec<u32> = self.procs.read().keys().copied().collect();
        oids.sort_unstable();

        f.debug_struct("ConversionProcs").field("oids", &oids).finish()
    }
}

/// Decodes an enum array literal into an array of text values. Labels are
/// plain text, so elements are not cast any further.
pub fn enum_array_proc() -> ConversionProc {
    Arc::new(|text: &str| -> crate::Result<Value> {
        let elements = parse_array_literal(text)?;
        Ok(Value::array(elements))
    })
}

/// Install [`enum_array_proc`] under the array oid of every array link in
/// `catalog`, skipping oids that already have a procedure. Returns how many
/// were installed.
pub fn install_enum_array_procs(catalog: &EnumCatalog, procs: &ConversionProcs) -> usize {
    let mut installed = 0;

    for link in catalog.array_links() {
        if procs.insert_if_absent(link.array_type_id, enum_array_proc()) {
            tracing::debug!(
                type_name = %link.type_name,
                oid = link.array_type_id,
                "installed enum array conversion"
            );
            installed += 1;
        } else {
            tracing::trace!(
                type_name = %link.type_name,
                oid = link.array_type_id,
                "conversion already registered, keeping it"
            );
        }
    }

    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArrayTypeRow, LabelRow};
    use pretty_assertions::assert_eq;

    fn catalog() -> EnumCatalog {
        EnumCatalog::build(
            vec![LabelRow {
                type_id: 1,
                label: "a".to_owned(),
            }],
            vec![ArrayTypeRow {
                type_name: "enum1".to_owned(),
                array_type_id: 212389,
                element_type_id: 212388,
            }],
        )
    }

    #[test]
    fn installed_proc_decodes_labels_in_order() {
        let procs = ConversionProcs::new();

        assert_eq!(install_enum_array_procs(&catalog(), &procs), 1);

        let decoded = procs.decode(212389, "{a,b,c}").unwrap().unwrap();
        assert_eq!(decoded, Value::array(["a", "b", "c"]));
    }

    #[test]
    fn existing_procs_win() {
        let procs = ConversionProcs::new();
        let custom: ConversionProc = Arc::new(|_: &str| -> crate::Result<Value> { Ok(Value::text("custom")) });
        procs.insert(212389, Arc::clone(&custom));

        assert_eq!(install_enum_array_procs(&catalog(), &procs), 0);
        assert!(Arc::ptr_eq(&procs.get(212389).unwrap(), &custom));
    }

    #[test]
    fn null_elements_decode_as_typed_nulls() {
        let decoded = enum_array_proc()("{a,NULL}").unwrap();
        assert_eq!(decoded, Value::array([Value::text("a"), Value::Text(None)]));
    }
}
