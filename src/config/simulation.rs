use super::{ConfigError, ConfigResult};
use crate::impl_default;
use crate::simulation::{ParticleEmitter, TimeStepPolicy, DEFAULT_CAPACITY, DEFAULT_GRAVITY};
use serde::{Deserialize, Serialize};

/// 模拟配置
///
/// 容量和重力在进程生命周期内固定，只在启动时读取一次。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 粒子池容量
    pub capacity: usize,

    /// 重力加速度（沿 -y）
    pub gravity: f32,

    /// 时间步长策略
    pub time_step: TimeStepPolicy,

    /// 随机种子（None = 使用系统熵）
    pub seed: Option<u64>,

    /// 发射器参数
    pub emitter: ParticleEmitter,
}

impl_default!(SimulationConfig {
    capacity: DEFAULT_CAPACITY,
    gravity: DEFAULT_GRAVITY,
    time_step: TimeStepPolicy::Clamp,
    seed: None,
    emitter: ParticleEmitter::default(),
});

impl SimulationConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigError::ValidationError(
                "Particle capacity must be greater than zero".to_string(),
            ));
        }
        if u32::try_from(self.capacity).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Particle capacity {} exceeds the draw call limit",
                self.capacity
            )));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::ValidationError(
                "Gravity must be finite".to_string(),
            ));
        }

        let emitter = &self.emitter;
        if !emitter.origin.is_finite() {
            return Err(ConfigError::ValidationError(
                "Emitter origin must be finite".to_string(),
            ));
        }
        if !(emitter.speed_min.is_finite() && emitter.speed_max.is_finite())
            || emitter.speed_min < 0.0
            || emitter.speed_min > emitter.speed_max
        {
            return Err(ConfigError::ValidationError(format!(
                "Invalid speed range [{}, {})",
                emitter.speed_min, emitter.speed_max
            )));
        }
        if !(emitter.lifetime_base.is_finite() && emitter.lifetime_jitter.is_finite())
            || emitter.lifetime_base < 0.0
            || emitter.lifetime_jitter < 0.0
        {
            return Err(ConfigError::ValidationError(format!(
                "Invalid lifetime base {} / jitter {}",
                emitter.lifetime_base, emitter.lifetime_jitter
            )));
        }
        if !emitter.green_jitter.is_finite() || emitter.green_jitter < 0.0 {
            return Err(ConfigError::ValidationError(
                "Green jitter must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
