//! # Serialization Context
//!
//! The one stateful piece of the codec. A document is serialized piecewise —
//! header, then page lists and clusters, then footer — and the context
//! carries what the later passes need from the earlier ones:
//!
//! - the mapping between in-memory descriptor ids and the sequential
//!   physical ids assigned while the header is emitted
//! - the header's emitted size and trailing CRC-32, which the footer embeds
//!   as a forward reference
//! - the cluster groups registered as page-list envelopes are written out
//!
//! Physical ids are assigned in emission order, starting at 0 per entity
//! kind, and never change for the rest of the document. The mem→phys
//! direction is a hash map; phys→mem is a dense vector indexed by the
//! physical id. Both are append-only during a single serialization.
//!
//! The context is single-writer: it is created by the header pass and must
//! be handed to the page-list and footer passes on the same logical thread
//! of execution (or externally synchronized).

use eyre::{bail, Result};
use hashbrown::HashMap;

use crate::descriptor::DescriptorId;

use super::compound::ClusterGroup;

#[derive(Debug, Default)]
pub struct SerializationContext {
    header_size: u32,
    header_crc32: u32,
    cluster_groups: Vec<ClusterGroup>,
    mem_to_phys_fields: HashMap<DescriptorId, DescriptorId>,
    mem_to_phys_columns: HashMap<DescriptorId, DescriptorId>,
    mem_to_phys_clusters: HashMap<DescriptorId, DescriptorId>,
    phys_to_mem_fields: Vec<DescriptorId>,
    phys_to_mem_columns: Vec<DescriptorId>,
    phys_to_mem_clusters: Vec<DescriptorId>,
}

impl SerializationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next physical field id to `mem_id` and returns it.
    pub fn map_field_id(&mut self, mem_id: DescriptorId) -> DescriptorId {
        let phys_id = self.phys_to_mem_fields.len() as DescriptorId;
        self.mem_to_phys_fields.insert(mem_id, phys_id);
        self.phys_to_mem_fields.push(mem_id);
        phys_id
    }

    /// Assigns the next physical column id to `mem_id` and returns it.
    pub fn map_column_id(&mut self, mem_id: DescriptorId) -> DescriptorId {
        let phys_id = self.phys_to_mem_columns.len() as DescriptorId;
        self.mem_to_phys_columns.insert(mem_id, phys_id);
        self.phys_to_mem_columns.push(mem_id);
        phys_id
    }

    /// Assigns the next physical cluster id to `mem_id` and returns it.
    pub fn map_cluster_id(&mut self, mem_id: DescriptorId) -> DescriptorId {
        let phys_id = self.phys_to_mem_clusters.len() as DescriptorId;
        self.mem_to_phys_clusters.insert(mem_id, phys_id);
        self.phys_to_mem_clusters.push(mem_id);
        phys_id
    }

    pub fn phys_field_id(&self, mem_id: DescriptorId) -> Result<DescriptorId> {
        match self.mem_to_phys_fields.get(&mem_id) {
            Some(&phys_id) => Ok(phys_id),
            None => bail!("unknown in-memory field id: {}", mem_id),
        }
    }

    pub fn phys_column_id(&self, mem_id: DescriptorId) -> Result<DescriptorId> {
        match self.mem_to_phys_columns.get(&mem_id) {
            Some(&phys_id) => Ok(phys_id),
            None => bail!("unknown in-memory column id: {}", mem_id),
        }
    }

    pub fn phys_cluster_id(&self, mem_id: DescriptorId) -> Result<DescriptorId> {
        match self.mem_to_phys_clusters.get(&mem_id) {
            Some(&phys_id) => Ok(phys_id),
            None => bail!("unknown in-memory cluster id: {}", mem_id),
        }
    }

    pub fn mem_field_id(&self, phys_id: DescriptorId) -> Result<DescriptorId> {
        match self.phys_to_mem_fields.get(phys_id as usize) {
            Some(&mem_id) => Ok(mem_id),
            None => bail!("unknown physical field id: {}", phys_id),
        }
    }

    pub fn mem_column_id(&self, phys_id: DescriptorId) -> Result<DescriptorId> {
        match self.phys_to_mem_columns.get(phys_id as usize) {
            Some(&mem_id) => Ok(mem_id),
            None => bail!("unknown physical column id: {}", phys_id),
        }
    }

    pub fn mem_cluster_id(&self, phys_id: DescriptorId) -> Result<DescriptorId> {
        match self.phys_to_mem_clusters.get(phys_id as usize) {
            Some(&mem_id) => Ok(mem_id),
            None => bail!("unknown physical cluster id: {}", phys_id),
        }
    }

    /// Physical field ids assigned so far, in assignment order.
    pub fn n_mapped_fields(&self) -> usize {
        self.phys_to_mem_fields.len()
    }

    pub fn n_mapped_columns(&self) -> usize {
        self.phys_to_mem_columns.len()
    }

    pub fn n_mapped_clusters(&self) -> usize {
        self.phys_to_mem_clusters.len()
    }

    pub fn set_header_size(&mut self, size: u32) {
        self.header_size = size;
    }

    pub fn header_size(&self) -> u32 {
        self.header_size
    }

    pub fn set_header_crc32(&mut self, crc32: u32) {
        self.header_crc32 = crc32;
    }

    pub fn header_crc32(&self) -> u32 {
        self.header_crc32
    }

    pub fn add_cluster_group(&mut self, group: ClusterGroup) {
        self.cluster_groups.push(group);
    }

    pub fn cluster_groups(&self) -> &[ClusterGroup] {
        &self.cluster_groups
    }
}
