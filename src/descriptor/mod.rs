//! # Dataset Descriptor
//!
//! This module provides the in-memory schema and layout metadata of a stored
//! dataset: the field tree, the columns backing the leaf fields, and the
//! clusters with their per-column page ranges.
//!
//! The serializer (see [`crate::serializer`]) consumes descriptors through a
//! small, deterministic interface:
//!
//! - [`DatasetDescriptor::fields_of`] yields the direct children of a field
//!   in insertion order
//! - [`DatasetDescriptor::columns_of`] yields the columns attached to a field
//!   in insertion order
//! - [`DatasetDescriptor::cluster`] resolves a cluster by its in-memory id
//!
//! Insertion order is load-bearing: the serializer walks fields breadth-first
//! and assigns physical on-disk identifiers in visit order, so two descriptors
//! built with the same insertion sequence produce identical files.
//!
//! ## Field Zero
//!
//! Every descriptor owns a synthetic root field ("field zero") created by
//! [`DatasetDescriptor::new`]. It anchors the tree and is never written as a
//! field record itself; top-level fields are its children.
//!
//! ## Identifiers
//!
//! Descriptor ids are caller-assigned `u64` values, unique per entity kind.
//! They are in-memory handles only; the on-disk format uses the sequential
//! physical ids assigned during serialization.

pub mod types;

pub use types::{ColumnType, FieldStructure};

use eyre::{bail, Result};
use hashbrown::HashMap;

/// In-memory identifier of a field, column, or cluster.
pub type DescriptorId = u64;

/// Points to a byte range on storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Byte range in the dataset's own storage.
    Inline { bytes_on_storage: u32, position: u64 },
    /// Byte range held by an external resource.
    Url(String),
}

impl Default for Locator {
    fn default() -> Self {
        Locator::Inline {
            bytes_on_storage: 0,
            position: 0,
        }
    }
}

/// A field of the dataset schema tree.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub id: DescriptorId,
    pub parent_id: DescriptorId,
    pub field_version: u32,
    pub type_version: u32,
    pub name: String,
    pub type_name: String,
    pub description: String,
    pub structure: FieldStructure,
    /// Fixed repetition count; 0 means not repetitive.
    pub n_repetitions: u64,
}

impl FieldDescriptor {
    pub fn new(
        id: DescriptorId,
        parent_id: DescriptorId,
        name: impl Into<String>,
        type_name: impl Into<String>,
        structure: FieldStructure,
    ) -> Self {
        Self {
            id,
            parent_id,
            field_version: 0,
            type_version: 0,
            name: name.into(),
            type_name: type_name.into(),
            description: String::new(),
            structure,
            n_repetitions: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_repetitions(mut self, n: u64) -> Self {
        self.n_repetitions = n;
        self
    }

    pub fn with_versions(mut self, field_version: u32, type_version: u32) -> Self {
        self.field_version = field_version;
        self.type_version = type_version;
        self
    }
}

/// A column backing a field.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub id: DescriptorId,
    pub field_id: DescriptorId,
    pub column_type: ColumnType,
    pub is_sorted: bool,
}

impl ColumnDescriptor {
    pub fn new(id: DescriptorId, field_id: DescriptorId, column_type: ColumnType) -> Self {
        Self {
            id,
            field_id,
            column_type,
            is_sorted: false,
        }
    }

    pub fn sorted(mut self) -> Self {
        self.is_sorted = true;
        self
    }
}

/// One on-disk page of column data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub n_elements: u32,
    pub locator: Locator,
}

/// The pages of a single column within a single cluster.
#[derive(Debug, Clone)]
pub struct PageRange {
    pub column_id: DescriptorId,
    pub page_infos: Vec<PageInfo>,
}

/// A contiguous chunk of entries covered by per-column page ranges.
#[derive(Debug, Clone)]
pub struct ClusterDescriptor {
    pub id: DescriptorId,
    pub first_entry: u64,
    pub n_entries: u64,
    page_ranges: Vec<PageRange>,
}

impl ClusterDescriptor {
    pub fn new(id: DescriptorId, first_entry: u64, n_entries: u64) -> Self {
        Self {
            id,
            first_entry,
            n_entries,
            page_ranges: Vec::new(),
        }
    }

    pub fn with_page_range(mut self, range: PageRange) -> Self {
        self.page_ranges.push(range);
        self
    }

    /// Ids of the columns that have pages in this cluster, in insertion order.
    pub fn column_ids(&self) -> impl Iterator<Item = DescriptorId> + '_ {
        self.page_ranges.iter().map(|r| r.column_id)
    }

    pub fn page_range(&self, column_id: DescriptorId) -> Result<&PageRange> {
        match self.page_ranges.iter().find(|r| r.column_id == column_id) {
            Some(range) => Ok(range),
            None => bail!("unknown column id in cluster: {}", column_id),
        }
    }
}

/// Schema and layout metadata of a stored dataset.
#[derive(Debug, Clone)]
pub struct DatasetDescriptor {
    name: String,
    description: String,
    fields: Vec<FieldDescriptor>,
    columns: Vec<ColumnDescriptor>,
    clusters: Vec<ClusterDescriptor>,
    cluster_index: HashMap<DescriptorId, usize>,
}

/// Id of the synthetic root field created by [`DatasetDescriptor::new`].
pub const FIELD_ZERO_ID: DescriptorId = 0;

impl DatasetDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let field_zero = FieldDescriptor::new(
            FIELD_ZERO_ID,
            FIELD_ZERO_ID,
            "",
            "",
            FieldStructure::Record,
        );
        Self {
            name: name.into(),
            description: description.into(),
            fields: vec![field_zero],
            columns: Vec::new(),
            clusters: Vec::new(),
            cluster_index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn field_zero_id(&self) -> DescriptorId {
        FIELD_ZERO_ID
    }

    pub fn add_field(&mut self, field: FieldDescriptor) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn add_column(&mut self, column: ColumnDescriptor) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn add_cluster(&mut self, cluster: ClusterDescriptor) -> &mut Self {
        self.cluster_index.insert(cluster.id, self.clusters.len());
        self.clusters.push(cluster);
        self
    }

    /// Number of fields, excluding the synthetic root.
    pub fn n_fields(&self) -> usize {
        self.fields.len() - 1
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Direct children of `parent_id` in insertion order.
    pub fn fields_of(
        &self,
        parent_id: DescriptorId,
    ) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields
            .iter()
            .filter(move |f| f.parent_id == parent_id && f.id != FIELD_ZERO_ID)
    }

    /// Columns attached to `field_id` in insertion order.
    pub fn columns_of(
        &self,
        field_id: DescriptorId,
    ) -> impl Iterator<Item = &ColumnDescriptor> + '_ {
        self.columns.iter().filter(move |c| c.field_id == field_id)
    }

    pub fn cluster(&self, id: DescriptorId) -> Result<&ClusterDescriptor> {
        match self.cluster_index.get(&id) {
            Some(&idx) => Ok(&self.clusters[idx]),
            None => bail!("unknown cluster id: {}", id),
        }
    }
}
