pub mod batch;
pub mod gpu;
pub mod vertex;

pub use batch::{surface_vertices, BatchBackend, CpuBackend, CpuTriangleBatch, SurfaceBatch};
pub use gpu::{BackendError, WgpuBackend, WgpuTriangleBatch};
pub use vertex::SurfaceVertex;
