//! Dynamic vertex buffer
//!
//! A growable CPU-side `f32` staging array mirrored by a GPU vertex buffer.
//! Growth is geometric and the buffer never shrinks, so a scene that
//! fluctuates around a size settles into zero reallocations. The GPU buffer
//! is recreated only when the staging array outgrows it; steady-state
//! frames are a single `write_buffer`.

/// Initial staging capacity in `f32` scalars.
pub const INITIAL_CAPACITY: usize = 200_000;

/// Growable vertex staging buffer with a lazily-recreated GPU mirror.
pub struct DynamicVertexBuffer {
    label: &'static str,
    data: Vec<f32>,
    cursor: usize,
    gpu: Option<wgpu::Buffer>,
    gpu_capacity: usize,
}

impl DynamicVertexBuffer {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self::with_capacity(label, INITIAL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            data: vec![0.0; capacity],
            cursor: 0,
            gpu: None,
            gpu_capacity: 0,
        }
    }

    /// Current staging capacity in scalars.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of scalars written since the last [`Self::reset`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Ensures capacity for `required` scalars total.
    ///
    /// Grows to `max(required * 3 / 2, capacity * 2)` so that both a single
    /// large jump and repeated small increments amortize. Never shrinks.
    pub fn reserve_for(&mut self, required: usize) {
        if required <= self.data.len() {
            return;
        }
        let grown = (required + required / 2).max(self.data.len() * 2);
        log::debug!(
            "{}: growing staging buffer {} -> {grown} scalars",
            self.label,
            self.data.len()
        );
        self.data.resize(grown, 0.0);
    }

    /// Rewinds the write cursor. Capacity is retained.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Appends scalars at the cursor. The caller must have reserved space;
    /// this is the hot path and does not grow.
    #[inline]
    pub fn push(&mut self, values: &[f32]) {
        self.data[self.cursor..self.cursor + values.len()].copy_from_slice(values);
        self.cursor += values.len();
    }

    /// The staged scalars written this frame.
    #[must_use]
    pub fn staged(&self) -> &[f32] {
        &self.data[..self.cursor]
    }

    /// Uploads the staged data, recreating the GPU buffer only if the
    /// staging array has outgrown it.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if self.gpu.is_none() || self.gpu_capacity < self.data.len() {
            self.gpu = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (self.data.len() * 4) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.gpu_capacity = self.data.len();
        }
        if self.cursor > 0
            && let Some(gpu) = &self.gpu
        {
            queue.write_buffer(gpu, 0, bytemuck::cast_slice(&self.data[..self.cursor]));
        }
    }

    /// The GPU buffer, available after the first [`Self::upload`].
    #[must_use]
    pub fn gpu_buffer(&self) -> Option<&wgpu::Buffer> {
        self.gpu.as_ref()
    }
}
