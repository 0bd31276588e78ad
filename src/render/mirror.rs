//! 粒子镜像缓冲区
//!
//! 镜像缓冲区是粒子池在 GPU 上的逐字节副本，每帧整块覆盖，从不回读。
//! 上传动作通过 [`MirrorSink`] 抽象，wgpu 路径和宿主内存路径共享同一份
//! 字节契约。

use crate::core::error::{RenderError, RenderResult};
use crate::simulation::Particle;

/// 镜像上传目标
pub trait MirrorSink {
    /// 容量（粒子数）
    fn capacity(&self) -> usize;

    /// 从偏移 0 开始写入原始字节
    ///
    /// 超出镜像容量的部分会被丢弃；完整性检查由 [`MirrorSink::upload`] 负责。
    fn write_bytes(&mut self, bytes: &[u8]);

    /// 用粒子池的当前状态整块覆盖镜像
    fn upload(&mut self, particles: &[Particle]) -> RenderResult<()> {
        if particles.len() != self.capacity() {
            return Err(RenderError::CapacityMismatch {
                expected: self.capacity(),
                actual: particles.len(),
            });
        }
        if !particles.is_empty() {
            self.write_bytes(bytemuck::cast_slice(particles));
        }
        Ok(())
    }
}

/// 镜像缓冲区的顶点布局
///
/// 只绑定 position 和 color 两个属性，velocity 与 lifetime 留在内存中但不被读取。
pub fn particle_vertex_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
    wgpu::VertexBufferLayout {
        array_stride: Particle::STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: Particle::POSITION_OFFSET,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: Particle::COLOR_OFFSET,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    }
}

/// 检查镜像缓冲区是否在设备的单缓冲区上限之内，返回所需字节数
pub fn check_mirror_size(capacity: usize, max_buffer_size: u64) -> RenderResult<u64> {
    let requested = GpuMirror::byte_size(capacity);
    if requested > max_buffer_size {
        return Err(RenderError::BufferTooLarge {
            requested,
            limit: max_buffer_size,
        });
    }
    Ok(requested)
}

/// GPU 端镜像缓冲区
pub struct GpuMirror {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl GpuMirror {
    /// 创建容量为 `capacity` 个粒子的镜像缓冲区
    ///
    /// 超出 `device.limits().max_buffer_size` 时返回 [`RenderError::BufferTooLarge`]，
    /// 不会把请求交给 wgpu。
    pub fn new(device: &wgpu::Device, capacity: usize) -> RenderResult<Self> {
        let size = check_mirror_size(capacity, device.limits().max_buffer_size)?;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Mirror Buffer"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self { buffer, capacity })
    }

    /// 镜像所需的字节数
    pub fn byte_size(capacity: usize) -> wgpu::BufferAddress {
        capacity as wgpu::BufferAddress * Particle::STRIDE
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 绑定到队列，得到可写入的上传目标
    pub fn sink<'a>(&'a self, queue: &'a wgpu::Queue) -> QueueSink<'a> {
        QueueSink {
            queue,
            mirror: self,
        }
    }
}

/// 通过 `Queue::write_buffer` 写入镜像
///
/// 写入在下一次 `submit` 之前生效，与同一帧的绘制命令保持顺序。
pub struct QueueSink<'a> {
    queue: &'a wgpu::Queue,
    mirror: &'a GpuMirror,
}

impl MirrorSink for QueueSink<'_> {
    fn capacity(&self) -> usize {
        self.mirror.capacity
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(GpuMirror::byte_size(self.mirror.capacity) as usize);
        self.queue.write_buffer(&self.mirror.buffer, 0, &bytes[..len]);
    }
}

/// 宿主内存中的镜像
///
/// 用于无 GPU 环境（测试、离线检查）下验证上传契约。
#[derive(Debug, Clone)]
pub struct HostMirror {
    bytes: Vec<u8>,
    capacity: usize,
}

impl HostMirror {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; GpuMirror::byte_size(capacity) as usize],
            capacity,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 读取槽位的 position 字段
    pub fn position(&self, slot: usize) -> [f32; 2] {
        self.read(slot, Particle::POSITION_OFFSET)
    }

    /// 读取槽位的 color 字段
    pub fn color(&self, slot: usize) -> [f32; 4] {
        self.read(slot, Particle::COLOR_OFFSET)
    }

    fn read<T: bytemuck::Pod>(&self, slot: usize, offset: u64) -> T {
        let start = slot * Particle::STRIDE as usize + offset as usize;
        let end = start + std::mem::size_of::<T>();
        bytemuck::pod_read_unaligned(&self.bytes[start..end])
    }
}

impl MirrorSink for HostMirror {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(self.bytes.len());
        self.bytes[..len].copy_from_slice(&bytes[..len]);
    }
}
