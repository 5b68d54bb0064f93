//! Slot-map keys handed out by the scene and the draw caches.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Scene object.
    pub struct ObjectKey;
    /// Metaball datablock, shared by every object of a family.
    pub struct MetaBallKey;
    /// Surface batch stored in a [`MetaBallDrawCache`](crate::MetaBallDrawCache).
    pub struct BatchKey;
}
