pub mod batch_cache;
pub mod render_data;

pub use batch_cache::{BatchDirtyMode, CacheId, CacheStats, MetaBallBatchCache, MetaBallDrawCache};
pub use render_data::{MetaBallRenderData, RenderDataTypes};
