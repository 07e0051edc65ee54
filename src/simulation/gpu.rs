//! GPU compute transition engine
//!
//! Ping-pong between two storage buffers on the device. Each generation is
//! one compute pass reading buffer A and writing buffer B (or the reverse);
//! afterwards the roles flip. wgpu orders storage writes between passes, and
//! a blocking device poll precedes every readback, so neither the next pass
//! nor the host ever observes a half-written generation.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::{BindGroup, CommandEncoder, ComputePipeline, Device, Queue};

use super::{
    grid::{cell_count, Grid},
    traits::TransitionEngine,
};
use crate::error::{LifeError, Result};
use crate::wgpu_utils::{binding_types, CellBuffer, UniformBuffer};

/// Threads per workgroup along each axis; must match the shader
pub const WORKGROUP_SIZE: u32 = 8;

/// Grid dimensions as seen by the shader
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct GridParams {
    pub width: u32,
    pub height: u32,
    pub _padding: [u32; 2],
}

/// Bytes one storage buffer needs for a `width` x `height` grid of `u32` words
pub fn buffer_byte_size(width: usize, height: usize) -> Result<u64> {
    cell_count(width, height)?
        .checked_mul(std::mem::size_of::<u32>())
        .map(|bytes| bytes as u64)
        .ok_or(LifeError::InvalidDimensions { width, height })
}

/// Acquire a device capable of running compute shaders
///
/// Prefers a hardware adapter and falls back to a software one.
pub async fn request_compute_device() -> Result<(Device, Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = match instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
    {
        Ok(adapter) => adapter,
        Err(_) => instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: true,
            })
            .await
            .map_err(|e| LifeError::GpuUnavailable(e.to_string()))?,
    };

    let info = adapter.get_info();
    if !adapter
        .get_downlevel_capabilities()
        .flags
        .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS)
    {
        return Err(LifeError::GpuUnavailable(format!(
            "adapter '{}' ({:?}) does not support compute shaders",
            info.name, info.backend
        )));
    }
    log::info!("Using GPU adapter '{}' ({:?})", info.name, info.backend);

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("Life Compute Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .map_err(|e| LifeError::GpuUnavailable(e.to_string()))
}

/// Game of Life stepper running as a wgpu compute shader
pub struct GpuEngine {
    device: Arc<Device>,
    queue: Arc<Queue>,
    width: usize,
    height: usize,
    pipeline: ComputePipeline,
    // buffers[i] is read by bind_groups[i], which writes buffers[1 - i]
    buffers: [CellBuffer; 2],
    bind_groups: [BindGroup; 2],
    params: UniformBuffer<GridParams>,
    staging: CellBuffer,
    current: usize,
}

impl GpuEngine {
    /// Create an engine on a freshly requested device
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let (device, queue) = pollster::block_on(request_compute_device())?;
        Self::from_device(Arc::new(device), Arc::new(queue), width, height)
    }

    /// Create an engine sharing an existing device and queue
    pub fn from_device(
        device: Arc<Device>,
        queue: Arc<Queue>,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let cell_count = cell_count(width, height)?;
        let byte_size = buffer_byte_size(width, height)?;
        let max_binding = device.limits().max_storage_buffer_binding_size as u64;
        if byte_size > max_binding || width > u32::MAX as usize || height > u32::MAX as usize {
            return Err(LifeError::GpuUnavailable(format!(
                "{}x{} grid needs {} bytes per buffer, device allows {}",
                width, height, byte_size, max_binding
            )));
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Life Compute Shader"),
            source: wgpu::ShaderSource::Wgsl(LIFE_COMPUTE_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Life Bind Group Layout"),
            entries: &[
                binding_types::compute_entry(0, binding_types::uniform()),
                binding_types::compute_entry(1, binding_types::storage_buffer(true)),
                binding_types::compute_entry(2, binding_types::storage_buffer(false)),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Life Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Life Compute Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let params = UniformBuffer::new_with_data(
            &device,
            GridParams {
                width: width as u32,
                height: height as u32,
                _padding: [0; 2],
            },
        );

        let buffers = [
            CellBuffer::new_storage(&device, "Life Buffer A", cell_count),
            CellBuffer::new_storage(&device, "Life Buffer B", cell_count),
        ];
        let staging = CellBuffer::new_staging(&device, "Life Staging Buffer", cell_count);

        let make_bind_group = |label: &str, read: &CellBuffer, write: &CellBuffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: params.binding_resource(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: read.binding_resource(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: write.binding_resource(),
                    },
                ],
            })
        };
        let bind_groups = [
            make_bind_group("Life Bind Group A->B", &buffers[0], &buffers[1]),
            make_bind_group("Life Bind Group B->A", &buffers[1], &buffers[0]),
        ];

        log::info!("GPU engine ready for {}x{} grid", width, height);

        Ok(Self {
            device,
            queue,
            width,
            height,
            pipeline,
            buffers,
            bind_groups,
            params,
            staging,
            current: 0,
        })
    }

    /// Parameters uploaded to the shader
    pub fn params(&self) -> &GridParams {
        self.params.content()
    }

    /// Advance `generations` steps without leaving the device, then read back
    ///
    /// The input is uploaded once and only the final generation is copied to
    /// the host. `generations == 0` returns a copy of `input`.
    pub fn step_many(&mut self, input: &Grid, generations: u32) -> Result<Grid> {
        input.ensure_dimensions(self.dimensions())?;
        let mut output = input.clone();
        if generations == 0 {
            return Ok(output);
        }

        self.upload(input);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Life Compute Encoder"),
            });
        for _ in 0..generations {
            self.encode_generation(&mut encoder);
        }
        self.encode_readback(&mut encoder);
        self.queue.submit(std::iter::once(encoder.finish()));

        self.read_staging(&mut output)?;
        Ok(output)
    }

    fn upload(&self, input: &Grid) {
        self.buffers[self.current].write(&self.queue, &input.to_gpu_words());
    }

    /// Record one generation and flip the ping-pong index
    fn encode_generation(&mut self, encoder: &mut CommandEncoder) {
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Life Compute Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_groups[self.current], &[]);
            pass.dispatch_workgroups(
                (self.width as u32).div_ceil(WORKGROUP_SIZE),
                (self.height as u32).div_ceil(WORKGROUP_SIZE),
                1,
            );
        }
        self.current = 1 - self.current;
    }

    fn encode_readback(&self, encoder: &mut CommandEncoder) {
        let source = &self.buffers[self.current];
        encoder.copy_buffer_to_buffer(
            source.buffer(),
            0,
            self.staging.buffer(),
            0,
            source.byte_size(),
        );
    }

    /// Block until the staging copy is complete and decode it into `output`
    fn read_staging(&self, output: &mut Grid) -> Result<()> {
        let slice = self.staging.buffer().slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| LifeError::GpuReadback(e.to_string()))?;

        match futures::executor::block_on(rx) {
            Ok(Ok(())) => {
                {
                    let mapped = slice.get_mapped_range();
                    output.copy_from_gpu_words(bytemuck::cast_slice(&mapped));
                }
                self.staging.buffer().unmap();
                Ok(())
            }
            Ok(Err(e)) => Err(LifeError::GpuReadback(e.to_string())),
            Err(_) => Err(LifeError::GpuReadback(
                "map callback was dropped".to_string(),
            )),
        }
    }
}

impl TransitionEngine for GpuEngine {
    fn name(&self) -> &str {
        "gpu"
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn step_into(&mut self, input: &Grid, output: &mut Grid) -> Result<()> {
        self.check_buffers(input, output)?;

        self.upload(input);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Life Compute Encoder"),
            });
        self.encode_generation(&mut encoder);
        self.encode_readback(&mut encoder);
        self.queue.submit(std::iter::once(encoder.finish()));

        self.read_staging(output)
    }
}

const LIFE_COMPUTE_SHADER: &str = r#"
struct GridParams {
    width: u32,
    height: u32,
    _padding0: u32,
    _padding1: u32,
}

@group(0) @binding(0) var<uniform> params: GridParams;
@group(0) @binding(1) var<storage, read> cells_in: array<u32>;
@group(0) @binding(2) var<storage, read_write> cells_out: array<u32>;

@compute @workgroup_size(8, 8)
fn main(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let x = global_id.x;
    let y = global_id.y;
    if (x >= params.width || y >= params.height) {
        return;
    }

    let width = i32(params.width);
    let height = i32(params.height);

    var live_neighbors = 0u;
    for (var dy: i32 = -1; dy <= 1; dy++) {
        for (var dx: i32 = -1; dx <= 1; dx++) {
            if (dx == 0 && dy == 0) {
                continue;
            }
            let nx = (i32(x) + dx + width) % width;
            let ny = (i32(y) + dy + height) % height;
            if (cells_in[u32(ny) * params.width + u32(nx)] != 0u) {
                live_neighbors++;
            }
        }
    }

    let index = y * params.width + x;
    let alive = cells_in[index] != 0u;

    var next_state = 0u;
    if (live_neighbors == 3u || (alive && live_neighbors == 2u)) {
        next_state = 1u;
    }
    cells_out[index] = next_state;
}
"#;
