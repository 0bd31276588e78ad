//! 渲染桥
//!
//! 把粒子池的当前状态同步到 GPU 镜像缓冲区，并以点图元 + 加法混合绘制。
//! 没有内部状态机：每帧都是对派生缓冲区的一次完整刷新。

use super::mirror::{GpuMirror, MirrorSink};
use super::pipeline::PipelineBuilder;
use super::program::PaintProgram;
use crate::core::error::RenderResult;
use crate::simulation::ParticlePool;

/// 渲染桥
pub struct RenderBridge {
    pipeline: wgpu::RenderPipeline,
    mirror: GpuMirror,
    clear_color: wgpu::Color,
}

impl RenderBridge {
    /// 创建渲染桥
    ///
    /// # 参数
    ///
    /// * `device` - WGPU设备
    /// * `format` - 目标纹理格式
    /// * `program` - 已编译的绘制程序
    /// * `capacity` - 粒子池容量
    /// * `clear_color` - 每帧清屏颜色
    ///
    /// 镜像缓冲区超出设备上限时返回错误。
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        program: &PaintProgram,
        capacity: usize,
        clear_color: [f32; 4],
    ) -> RenderResult<Self> {
        let mirror = GpuMirror::new(device, capacity)?;
        let pipeline = PipelineBuilder::create_particle_pipeline(device, format, program);
        let [r, g, b, a] = clear_color.map(f64::from);

        tracing::debug!(
            target: "render",
            capacity,
            bytes = GpuMirror::byte_size(capacity),
            "Render bridge created"
        );

        Ok(Self {
            pipeline,
            mirror,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// 整块覆盖镜像缓冲区
    pub fn sync(&self, queue: &wgpu::Queue, pool: &ParticlePool) -> RenderResult<()> {
        self.mirror.sink(queue).upload(pool.particles())
    }

    /// 在已开始的渲染通道中绘制全部粒子
    pub fn draw<'p>(&'p self, pass: &mut wgpu::RenderPass<'p>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.mirror.buffer().slice(..));
        pass.draw(0..self.mirror.capacity() as u32, 0..1);
    }

    /// 同步并绘制一帧
    ///
    /// 上传通过 `write_buffer` 排在 `encoder` 的命令之前，调用方负责提交。
    pub fn sync_and_draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        pool: &ParticlePool,
    ) -> RenderResult<()> {
        self.sync(queue, pool)?;

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Particle Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        self.draw(&mut pass);

        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.mirror.capacity()
    }
}
