//! # Offscreen Cache
//!
//! Keyed store of rasterized subtrees.
//!
//! The painter only looks entries up and lazily inserts new ones; eviction
//! and invalidation belong to whoever owns the store.

use crate::errors::PaintError;
use crate::node::{Node, NodeId};
use std::collections::HashMap;
use std::fmt;

/// Identifies one cached subtree.
///
/// Identity-derived and explicit keys live in separate namespaces, so no
/// user-chosen name can alias a node's auto key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Derived from the identity of a [`crate::CacheMode::Auto`] node.
    Auto(NodeId),
    /// An explicit key, shareable between nodes and trees.
    Named(String),
}

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        CacheKey::Named(key.into())
    }

    /// Key for a node cached without an explicit identifier.
    pub fn auto(id: NodeId) -> Self {
        CacheKey::Auto(id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Auto(id) => write!(f, "auto#{}", id),
            CacheKey::Named(name) => f.write_str(name),
        }
    }
}

/// A mapping from cache keys to offscreen surfaces of type `S`.
///
/// Creating an entry is split in two: [`OffscreenCache::allocate`] hands out
/// a fresh surface, the painter rasterizes into it, then
/// [`OffscreenCache::insert`] registers it. Nested cached subtrees can be
/// painted while the outer surface is still owned by the painter.
pub trait OffscreenCache<S> {
    fn contains(&self, key: &CacheKey) -> bool;
    fn get_mut(&mut self, key: &CacheKey) -> Option<&mut S>;
    fn allocate(&mut self, width: u32, height: u32) -> Result<S, PaintError>;
    fn insert(&mut self, key: CacheKey, surface: S);

    /// Deterministic key for [`crate::CacheMode::Auto`] nodes.
    fn auto_key(&self, node: &Node) -> CacheKey {
        CacheKey::auto(node.id())
    }
}

type Allocator<S> = Box<dyn Fn(u32, u32) -> Result<S, PaintError> + Send + Sync>;

/// In-memory [`OffscreenCache`] backed by a `HashMap`.
pub struct MemoryCache<S> {
    entries: HashMap<CacheKey, S>,
    allocator: Allocator<S>,
    allocations: usize,
}

impl<S> MemoryCache<S> {
    pub fn new<F>(allocator: F) -> Self
    where
        F: Fn(u32, u32) -> Result<S, PaintError> + Send + Sync + 'static,
    {
        Self {
            entries: HashMap::new(),
            allocator: Box::new(allocator),
            allocations: 0,
        }
    }

    /// Invalidates one entry; the next paint of that key rasterizes again.
    pub fn remove(&mut self, key: &CacheKey) -> Option<S> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of surfaces allocated over the cache's lifetime.
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}

impl<S> OffscreenCache<S> for MemoryCache<S> {
    fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    fn get_mut(&mut self, key: &CacheKey) -> Option<&mut S> {
        self.entries.get_mut(key)
    }

    fn allocate(&mut self, width: u32, height: u32) -> Result<S, PaintError> {
        let surface = (self.allocator)(width, height)?;
        self.allocations += 1;
        Ok(surface)
    }

    fn insert(&mut self, key: CacheKey, surface: S) {
        self.entries.insert(key, surface);
    }
}

impl<S> fmt::Debug for MemoryCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.entries.len())
            .field("allocations", &self.allocations)
            .finish()
    }
}
