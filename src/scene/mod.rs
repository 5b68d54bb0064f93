pub mod family;

use crate::collections::{MetaBallKey, ObjectKey, SlotMap};
use crate::geometry::CurveCache;
use crate::metaball::MetaBallBatchCache;

/// Metaball datablock. Owns the draw cache entry for its merged surface.
#[derive(Debug)]
pub struct MetaBall {
    pub name: String,
    pub(crate) batch_cache: Option<MetaBallBatchCache>,
}

impl MetaBall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch_cache: None,
        }
    }

    pub fn batch_cache(&self) -> Option<&MetaBallBatchCache> {
        self.batch_cache.as_ref()
    }
}

#[derive(Debug)]
pub struct Object {
    pub name: String,
    pub data: MetaBallKey,
    /// Polygonized surface, filled by the polygonizer before drawing.
    pub curve_cache: Option<CurveCache>,
}

impl Object {
    pub fn new(name: impl Into<String>, data: MetaBallKey) -> Self {
        Self {
            name: name.into(),
            data,
            curve_cache: None,
        }
    }

    pub fn with_curve_cache(mut self, curve_cache: CurveCache) -> Self {
        self.curve_cache = Some(curve_cache);
        self
    }

    pub fn is_metaball_basis(&self) -> bool {
        family::is_basis_name(&self.name)
    }
}

#[derive(Default)]
pub struct Scene {
    pub objects: SlotMap<ObjectKey, Object>,
    pub metaballs: SlotMap<MetaBallKey, MetaBall>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_metaball(&mut self, metaball: MetaBall) -> MetaBallKey {
        self.metaballs.insert(metaball)
    }

    pub fn add_object(&mut self, object: Object) -> ObjectKey {
        self.objects.insert(object)
    }

    pub fn object(&self, key: ObjectKey) -> Option<&Object> {
        self.objects.get(key)
    }

    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut Object> {
        self.objects.get_mut(key)
    }

    pub fn metaball(&self, key: MetaBallKey) -> Option<&MetaBall> {
        self.metaballs.get(key)
    }

    pub fn metaball_mut(&mut self, key: MetaBallKey) -> Option<&mut MetaBall> {
        self.metaballs.get_mut(key)
    }

    /// The object that owns the merged surface of `object`'s family.
    pub fn find_basis(&self, object: ObjectKey) -> Option<ObjectKey> {
        let member = self.objects.get(object)?;
        self.objects
            .iter()
            .find(|(_, candidate)| family::is_basis_for(&candidate.name, &member.name))
            .map(|(key, _)| key)
    }
}
