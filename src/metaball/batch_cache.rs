// metaball/batch_cache.rs
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error};

use super::render_data::{MetaBallRenderData, RenderDataTypes};
use crate::collections::{BatchKey, ObjectKey, SlotMap};
use crate::renderer::{surface_vertices, BatchBackend, SurfaceBatch};
use crate::scene::{MetaBall, Scene};
use crate::settings::DrawCacheSettings;

static NEXT_CACHE_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies the [`MetaBallDrawCache`] whose arena a [`BatchKey`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheId(u64);

impl CacheId {
    fn next() -> Self {
        CacheId(NEXT_CACHE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// How much of a datablock's cached geometry an edit invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchDirtyMode {
    All,
}

/// Cache entry stored on the datablock.
///
/// `batch` is only meaningful to the cache named by `owner`; any other cache
/// treats the entry as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBallBatchCache {
    owner: CacheId,
    batch: Option<BatchKey>,
    /// Set when the source geometry changed; the next lookup rebuilds.
    is_dirty: bool,
}

impl MetaBallBatchCache {
    fn new(owner: CacheId) -> Self {
        Self {
            owner,
            batch: None,
            is_dirty: false,
        }
    }

    pub fn owner(&self) -> CacheId {
        self.owner
    }

    pub fn batch(&self) -> Option<BatchKey> {
        self.batch
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub builds: u64,
    pub discards: u64,
    pub frees: u64,
}

/// Lazily built surface batches for metaball objects, one per datablock.
pub struct MetaBallDrawCache<B: BatchBackend> {
    id: CacheId,
    backend: B,
    batches: SlotMap<BatchKey, B::Batch>,
    batch_label: String,
    stats: CacheStats,
}

impl<B: BatchBackend> MetaBallDrawCache<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, &DrawCacheSettings::default())
    }

    pub fn with_settings(backend: B, settings: &DrawCacheSettings) -> Self {
        Self {
            id: CacheId::next(),
            backend,
            batches: SlotMap::with_key(),
            batch_label: settings.batch_label.clone(),
            stats: CacheStats::default(),
        }
    }

    pub fn id(&self) -> CacheId {
        self.id
    }

    /// Triangles with normals for `object`, built on first use or after the
    /// datablock was marked dirty.
    ///
    /// Only the basis object of a metaball family draws the merged surface;
    /// every other member returns `None`. The object's curve cache must have
    /// been filled by the polygonizer beforehand.
    pub fn get_surface_batch(&mut self, scene: &mut Scene, object: ObjectKey) -> Option<BatchKey> {
        let ob = scene.objects.get(object)?;
        if !ob.is_metaball_basis() {
            return None;
        }
        let mb = scene.metaballs.get_mut(ob.data)?;
        self.cache_get(mb);

        if let Some(batch) = mb.batch_cache.as_ref().and_then(|cache| cache.batch) {
            self.stats.hits += 1;
            return Some(batch);
        }

        let label = format!("{}.{}", self.batch_label, mb.name);
        let batch = {
            let rdata = MetaBallRenderData::new(RenderDataTypes::SURFACE, ob.curve_cache.as_ref());
            self.batch_get_pos_and_normals(&rdata, &label)
        };

        if let Some(cache) = mb.batch_cache.as_mut() {
            cache.batch = Some(batch);
        }
        Some(batch)
    }

    /// Flag the datablock's entry for rebuild. Whichever cache owns the entry
    /// discards its batch on the next lookup.
    pub fn mark_dirty(&self, mb: &mut MetaBall, mode: BatchDirtyMode) {
        let Some(cache) = mb.batch_cache.as_mut() else {
            return;
        };
        match mode {
            BatchDirtyMode::All => cache.is_dirty = true,
        }
    }

    /// Release the datablock's batch and its entry. Safe to call repeatedly;
    /// entries owned by another cache are left alone.
    pub fn free(&mut self, mb: &mut MetaBall) {
        if self.entry(mb).is_none() {
            return;
        }
        self.cache_clear(mb);
        mb.batch_cache = None;
        self.stats.frees += 1;
    }

    /// Free every entry owned by datablocks in `scene`, then release batches
    /// whose datablock was since taken over by another cache.
    pub fn free_all(&mut self, scene: &mut Scene) {
        for mb in scene.metaballs.values_mut() {
            self.free(mb);
        }

        if !self.batches.is_empty() {
            debug!("Releasing {} orphaned surface batches", self.batches.len());
        }
        for (_, batch) in self.batches.drain() {
            self.backend.discard(batch);
            self.stats.discards += 1;
        }
    }

    pub fn batch(&self, key: BatchKey) -> Option<&B::Batch> {
        self.batches.get(key)
    }

    /// The datablock's entry, if this cache owns it.
    pub fn entry<'a>(&self, mb: &'a MetaBall) -> Option<&'a MetaBallBatchCache> {
        mb.batch_cache
            .as_ref()
            .filter(|cache| cache.owner == self.id)
    }

    /// Number of live batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn cache_valid(&self, mb: &MetaBall) -> bool {
        self.entry(mb).is_some_and(|cache| !cache.is_dirty)
    }

    fn cache_init(&mut self, mb: &mut MetaBall) {
        if let Some(previous) = &mb.batch_cache {
            if previous.owner != self.id {
                debug!("{:?}: taking over entry from {:?}", mb.name, previous.owner);
            }
        }
        mb.batch_cache = Some(MetaBallBatchCache::new(self.id));
    }

    /// Make sure `mb` holds a clean entry owned by this cache.
    fn cache_get(&mut self, mb: &mut MetaBall) {
        if !self.cache_valid(mb) {
            self.cache_clear(mb);
            self.cache_init(mb);
        }
    }

    fn cache_clear(&mut self, mb: &mut MetaBall) {
        let id = self.id;
        let Some(cache) = mb.batch_cache.as_mut().filter(|cache| cache.owner == id) else {
            return;
        };
        let Some(key) = cache.batch.take() else {
            return;
        };
        let Some(batch) = self.batches.remove(key) else {
            return;
        };

        debug!("Discarding surface batch of {:?} ({} tris)", mb.name, batch.triangle_count());
        self.backend.discard(batch);
        self.stats.discards += 1;
    }

    fn batch_get_pos_and_normals(&mut self, rdata: &MetaBallRenderData<'_>, label: &str) -> BatchKey {
        debug_assert!(rdata.types().contains(RenderDataTypes::SURFACE));

        let view = rdata.display_list();
        debug_assert!(view.is_some(), "{label}: metaball drawn before it was polygonized");

        let vertices = match view {
            Some(view) => surface_vertices(view),
            None => {
                error!("{}: no display list, building an empty surface", label);
                Vec::new()
            }
        };

        let batch = self.backend.create_triangles(label, &vertices);
        debug!("Built {} with {} triangles", label, batch.triangle_count());
        self.stats.builds += 1;
        self.batches.insert(batch)
    }
}

impl<B: BatchBackend + Default> Default for MetaBallDrawCache<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
