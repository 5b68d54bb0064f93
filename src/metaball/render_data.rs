use bitflags::bitflags;

use crate::geometry::{CurveCache, DisplayListView};

bitflags! {
    /// Geometry kinds a render-data snapshot can be asked for.
    ///
    /// Only the triangulated surface is produced. Wire and shading data have
    /// no flag until something builds them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderDataTypes: u32 {
        const SURFACE = 1 << 0;
    }
}

/// Short-lived view of what a rebuild needs, borrowed from the object.
pub struct MetaBallRenderData<'a> {
    types: RenderDataTypes,
    curve_cache: Option<&'a CurveCache>,
}

impl<'a> MetaBallRenderData<'a> {
    pub fn new(types: RenderDataTypes, curve_cache: Option<&'a CurveCache>) -> Self {
        Self { types, curve_cache }
    }

    pub fn types(&self) -> RenderDataTypes {
        self.types
    }

    pub fn display_list(&self) -> Option<DisplayListView<'a>> {
        self.curve_cache.map(|cache| cache.disp.view())
    }
}
