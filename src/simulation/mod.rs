//! 粒子模拟模块
//!
//! ```text
//! ┌──────────────┐  initialize / advance(dt)  ┌──────────────┐
//! │ ParticlePool │ ◄───────────────────────── │ Engine       │
//! │  [Particle]  │                            │ (FrameDriver)│
//! └──────┬───────┘                            └──────────────┘
//!        │ &[Particle]
//!        ▼
//!   RenderBridge::sync_and_draw
//! ```
//!
//! 每个粒子是一个两态机：存活 → 寿命耗尽时在同一步内原地重生。
//! 粒子之间没有任何耦合。

pub mod emitter;
pub mod particle;
pub mod pool;


pub use emitter::ParticleEmitter;
pub use particle::Particle;
pub use pool::{AdvanceStats, ParticlePool, TimeStepPolicy, DEFAULT_CAPACITY, DEFAULT_GRAVITY};
