// renderer/batch.rs
use super::vertex::{sv, SurfaceVertex};
use crate::geometry::{DispListKind, DisplayListView};

/// A triangle-list batch ready for draw submission.
pub trait SurfaceBatch {
    fn vertex_count(&self) -> u32;

    fn triangle_count(&self) -> u32 {
        self.vertex_count() / 3
    }
}

/// Creates and releases batch resources on behalf of the draw caches.
pub trait BatchBackend {
    type Batch: SurfaceBatch;

    fn create_triangles(&mut self, label: &str, vertices: &[SurfaceVertex]) -> Self::Batch;

    /// Release everything the batch owns. Called exactly once per batch.
    fn discard(&mut self, batch: Self::Batch);
}

/// Expand a display list into a flat, non-indexed triangle list.
///
/// `Index4` faces are split along the `a-c` diagonal; a face whose last index
/// repeats the third emits a single triangle.
pub fn surface_vertices(view: DisplayListView<'_>) -> Vec<SurfaceVertex> {
    let mut out = Vec::with_capacity(view.triangle_count() * 3);

    for entry in view.entries() {
        let verts = entry.verts();
        let nors = entry.nors();
        let mut emit = |tri: [u32; 3]| {
            for i in tri {
                let i = i as usize;
                out.push(sv(verts[i], nors[i]));
            }
        };

        match entry.kind() {
            DispListKind::Index3 => {
                for tri in entry.index().chunks_exact(3) {
                    emit([tri[0], tri[1], tri[2]]);
                }
            }
            DispListKind::Index4 => {
                for quad in entry.index().chunks_exact(4) {
                    emit([quad[0], quad[1], quad[2]]);
                    if quad[3] != quad[2] {
                        emit([quad[0], quad[2], quad[3]]);
                    }
                }
            }
        }
    }

    out
}

/// Batch kept in system memory.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTriangleBatch {
    pub label: String,
    pub vertices: Vec<SurfaceVertex>,
}

impl SurfaceBatch for CpuTriangleBatch {
    fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// Headless backend. Tracks how many batches are alive so leaks show up.
#[derive(Debug, Default)]
pub struct CpuBackend {
    created: usize,
    discarded: usize,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn live(&self) -> usize {
        self.created - self.discarded
    }
}

impl BatchBackend for CpuBackend {
    type Batch = CpuTriangleBatch;

    fn create_triangles(&mut self, label: &str, vertices: &[SurfaceVertex]) -> CpuTriangleBatch {
        self.created += 1;
        CpuTriangleBatch {
            label: label.to_string(),
            vertices: vertices.to_vec(),
        }
    }

    fn discard(&mut self, _batch: CpuTriangleBatch) {
        self.discarded += 1;
    }
}
