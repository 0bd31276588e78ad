//! 固定容量粒子池
//!
//! 粒子池是一个固定槽位的 arena：容量在构造时确定，之后不会插入或移除
//! 任何槽位。粒子的"死亡"和"出生"都是对原槽位的原地改写，索引始终稳定。

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::emitter::ParticleEmitter;
use super::particle::Particle;

/// 默认粒子数量
pub const DEFAULT_CAPACITY: usize = 1000;
/// 默认重力加速度（单位/秒²，沿 -y）
pub const DEFAULT_GRAVITY: f32 = 0.98;

/// 时间步长策略
///
/// 决定 `advance` 如何处理负值的 `dt`。非有限的 `dt`（NaN、±∞）在任何策略下
/// 都截断为 0，否则寿命会变成 NaN，粒子再也不会重生。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeStepPolicy {
    /// 负值和非有限值截断为 0
    #[default]
    Clamp,
    /// 有限值原样使用，负 `dt` 会让粒子"回春"
    Passthrough,
}

impl TimeStepPolicy {
    /// 按策略归一化时间步长
    #[inline]
    pub fn apply(self, dt: f32) -> f32 {
        if !dt.is_finite() {
            return 0.0;
        }
        match self {
            Self::Clamp if dt < 0.0 => 0.0,
            _ => dt,
        }
    }
}

/// 单次 `advance` 的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceStats {
    /// 处理的粒子数
    pub processed: usize,
    /// 本步重生的粒子数
    pub respawned: usize,
}

/// 粒子池
pub struct ParticlePool {
    particles: Box<[Particle]>,
    emitter: ParticleEmitter,
    gravity: f32,
    time_step: TimeStepPolicy,
}

impl ParticlePool {
    /// 创建粒子池并立即初始化所有槽位
    pub fn new<R: Rng + ?Sized>(
        capacity: usize,
        gravity: f32,
        emitter: ParticleEmitter,
        rng: &mut R,
    ) -> Self {
        let particles = (0..capacity)
            .map(|_| Particle::spawn(&emitter, rng))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        tracing::debug!(
            target: "simulation",
            capacity,
            gravity,
            "Particle pool created"
        );

        Self {
            particles,
            emitter,
            gravity,
            time_step: TimeStepPolicy::default(),
        }
    }

    /// 使用默认发射器和重力创建
    pub fn with_capacity<R: Rng + ?Sized>(capacity: usize, rng: &mut R) -> Self {
        Self::new(capacity, DEFAULT_GRAVITY, ParticleEmitter::default(), rng)
    }

    /// 从现有粒子构造（槽位数即容量），不做随机初始化
    pub fn from_particles(
        particles: Vec<Particle>,
        gravity: f32,
        emitter: ParticleEmitter,
    ) -> Self {
        Self {
            particles: particles.into_boxed_slice(),
            emitter,
            gravity,
            time_step: TimeStepPolicy::default(),
        }
    }

    /// 设置时间步长策略
    pub fn with_time_step(mut self, policy: TimeStepPolicy) -> Self {
        self.time_step = policy;
        self
    }

    /// 重新随机初始化所有槽位
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for particle in self.particles.iter_mut() {
            *particle = Particle::spawn(&self.emitter, rng);
        }
    }

    /// 推进所有粒子 `dt` 秒
    ///
    /// 每个粒子独立执行 存活 → (寿命耗尽) → 重生 的两态转换，
    /// 重生在同一次调用内完成。
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> AdvanceStats {
        let dt = self.time_step.apply(dt);
        let mut respawned = 0;

        for particle in self.particles.iter_mut() {
            if particle.step(dt, self.gravity, &self.emitter, rng) {
                respawned += 1;
            }
        }

        tracing::trace!(target: "simulation", dt, respawned, "Pool advanced");

        AdvanceStats {
            processed: self.particles.len(),
            respawned,
        }
    }

    /// 粒子只读视图（GPU 上传使用）
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// 粒子的原始字节
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn time_step(&self) -> TimeStepPolicy {
        self.time_step
    }
}
