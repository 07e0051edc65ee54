// src/wgpu_utils/buffers.rs
//! Typed wrappers around `wgpu::Buffer` for uniforms and cell storage

use wgpu::util::DeviceExt;

fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    match type_name.rfind(':') {
        Some(pos) => &type_name[(pos + 1)..],
        None => type_name,
    }
}

/// Uniform buffer holding a single `Content` value
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content: Content,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Create a uniform buffer initialised with `content`
    pub fn new_with_data(device: &wgpu::Device, content: Content) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            contents: bytemuck::bytes_of(&content),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self { buffer, content }
    }

    /// Last value written to the buffer
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Storage or staging buffer of `u32` cell words
pub struct CellBuffer {
    buffer: wgpu::Buffer,
    len: usize,
}

impl CellBuffer {
    fn create(device: &wgpu::Device, label: &str, len: usize, usage: wgpu::BufferUsages) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (len * std::mem::size_of::<u32>()) as u64,
            usage,
            mapped_at_creation: false,
        });

        Self { buffer, len }
    }

    /// Storage buffer a compute shader can read and write; also usable as a
    /// copy source and destination
    pub fn new_storage(device: &wgpu::Device, label: &str, len: usize) -> Self {
        Self::create(
            device,
            label,
            len,
            wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::COPY_SRC,
        )
    }

    /// Host-mappable buffer for reading results back
    pub fn new_staging(device: &wgpu::Device, label: &str, len: usize) -> Self {
        Self::create(
            device,
            label,
            len,
            wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        )
    }

    /// Upload `words`, which must not exceed the buffer length
    pub fn write(&self, queue: &wgpu::Queue, words: &[u32]) {
        debug_assert!(words.len() <= self.len, "cell data exceeds buffer length");
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(words));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of `u32` words
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn byte_size(&self) -> u64 {
        self.buffer.size()
    }
}
