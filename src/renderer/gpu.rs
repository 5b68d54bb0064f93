use wgpu::util::DeviceExt;

use super::batch::{BatchBackend, SurfaceBatch};
use super::vertex::SurfaceVertex;

#[derive(Debug)]
pub enum BackendError {
    NoAdapter(String),
    RequestDevice(wgpu::RequestDeviceError),
}

impl From<wgpu::RequestDeviceError> for BackendError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        BackendError::RequestDevice(e)
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NoAdapter(e) => write!(f, "No suitable GPU adapter: {}", e),
            BackendError::RequestDevice(e) => write!(f, "Device request failed: {}", e),
        }
    }
}

impl std::error::Error for BackendError {}

/// Triangle list living in a GPU vertex buffer.
#[derive(Debug)]
pub struct WgpuTriangleBatch {
    vbuf: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl WgpuTriangleBatch {
    /// `None` for an empty surface; there is nothing to draw.
    pub fn vertex_buffer(&self) -> Option<&wgpu::Buffer> {
        self.vbuf.as_ref()
    }
}

impl SurfaceBatch for WgpuTriangleBatch {
    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

pub struct WgpuBackend {
    device: wgpu::Device,
}

impl WgpuBackend {
    pub fn new(device: wgpu::Device) -> Self {
        Self { device }
    }

    /// Bring up a device without a surface.
    pub async fn headless(power_preference: wgpu::PowerPreference) -> Result<Self, BackendError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| BackendError::NoAdapter(e.to_string()))?;

        log::info!("Using adapter {:?}", adapter.get_info().name);

        // Vertex buffers are filled at creation, so the queue is not needed
        let (device, _queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("MetaBallDrawDevice"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        Ok(Self::new(device))
    }
}

impl BatchBackend for WgpuBackend {
    type Batch = WgpuTriangleBatch;

    fn create_triangles(&mut self, label: &str, vertices: &[SurfaceVertex]) -> WgpuTriangleBatch {
        // wgpu rejects zero-sized vertex buffers
        let vbuf = (!vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        WgpuTriangleBatch {
            vbuf,
            vertex_count: vertices.len() as u32,
        }
    }

    fn discard(&mut self, batch: WgpuTriangleBatch) {
        if let Some(vbuf) = batch.vbuf {
            vbuf.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::sv;

    // Skips silently on machines without any adapter.
    fn headless_backend() -> Option<WgpuBackend> {
        pollster::block_on(WgpuBackend::headless(wgpu::PowerPreference::LowPower)).ok()
    }

    #[test]
    fn empty_surface_creates_no_buffer() {
        let Some(mut backend) = headless_backend() else {
            return;
        };
        let batch = backend.create_triangles("empty", &[]);
        assert!(batch.vertex_buffer().is_none());
        assert_eq!(batch.vertex_count(), 0);
        backend.discard(batch);
    }

    #[test]
    fn vertex_buffer_holds_every_vertex() {
        let Some(mut backend) = headless_backend() else {
            return;
        };
        let vertices = [sv([0.0; 3], [0.0, 0.0, 1.0]); 6];
        let batch = backend.create_triangles("tris", &vertices);
        let vbuf = batch.vertex_buffer().unwrap();
        assert_eq!(vbuf.size(), std::mem::size_of_val(&vertices) as u64);
        assert_eq!(batch.triangle_count(), 2);
        backend.discard(batch);
    }
}
