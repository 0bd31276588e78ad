//! 粒子渲染模块
//!
//! ## 模块结构
//!
//! - `context`: GPU 上下文（surface / device / queue）
//! - `program`: 绘制程序（WGSL 着色器）
//! - `pipeline`: 点图元 + 加法混合管线
//! - `mirror`: 粒子镜像缓冲区及上传契约
//! - `bridge`: 每帧同步并绘制的渲染桥

pub mod bridge;
pub mod context;
pub mod mirror;
pub mod pipeline;
pub mod program;

pub use bridge::RenderBridge;
pub use context::{FrameAcquire, GpuContext};
pub use mirror::{check_mirror_size, particle_vertex_layout, GpuMirror, HostMirror, MirrorSink, QueueSink};
pub use pipeline::{PipelineBuilder, ADDITIVE_BLENDING};
pub use program::{PaintProgram, PARTICLE_SHADER};
