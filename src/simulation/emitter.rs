//! 粒子发射器
//!
//! 描述粒子出生时的初始状态分布。发射器本身不持有粒子，
//! 只在初始化和重生时被采样。

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::impl_default;

/// 粒子发射器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleEmitter {
    /// 发射原点
    pub origin: Vec2,
    /// 初始速率下限（含）
    pub speed_min: f32,
    /// 初始速率上限（不含）
    pub speed_max: f32,
    /// 基础寿命（秒）
    pub lifetime_base: f32,
    /// 寿命随机增量上限，寿命落在 `[base, base + jitter)`
    pub lifetime_jitter: f32,
    /// 暖色基色 (r, g, b)
    pub base_color: [f32; 3],
    /// 绿色通道随机扰动幅度
    pub green_jitter: f32,
}

impl_default!(ParticleEmitter {
    origin: Vec2::ZERO,
    speed_min: 0.0,
    speed_max: 1.0,
    lifetime_base: 1.0,
    lifetime_jitter: 1.0,
    base_color: [1.0, 0.0, 0.2],
    green_jitter: 1.0,
});

impl ParticleEmitter {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    /// 设置速率范围
    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed_min = min;
        self.speed_max = max;
        self
    }

    /// 设置寿命范围
    pub fn with_lifetime(mut self, base: f32, jitter: f32) -> Self {
        self.lifetime_base = base;
        self.lifetime_jitter = jitter;
        self
    }

    /// 设置基色
    pub fn with_color(mut self, base_color: [f32; 3], green_jitter: f32) -> Self {
        self.base_color = base_color;
        self.green_jitter = green_jitter;
        self
    }

    /// 采样初始速度：方向在 `[0, 2π)` 上均匀，速率在 `[speed_min, speed_max)` 上均匀
    pub fn sample_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let angle = rng.gen_range(0.0..TAU);
        let speed = sample_half_open(rng, self.speed_min, self.speed_max);
        Vec2::from_angle(angle) * speed
    }

    /// 采样寿命
    pub fn sample_lifetime<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        sample_half_open(
            rng,
            self.lifetime_base,
            self.lifetime_base + self.lifetime_jitter,
        )
    }

    /// 采样出生颜色，alpha 为 1
    pub fn sample_color<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 4] {
        let [r, g, b] = self.base_color;
        let green = g + sample_half_open(rng, 0.0, self.green_jitter);
        [r, green, b, 1.0]
    }
}

/// `[low, high)` 上的均匀采样；区间为空时退化为 `low`
fn sample_half_open<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_emitter_default() {
        let emitter = ParticleEmitter::default();
        assert_eq!(emitter.origin, Vec2::ZERO);
        assert_eq!(emitter.speed_max, 1.0);
        assert_eq!(emitter.lifetime_base, 1.0);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let emitter = ParticleEmitter::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = emitter.sample_velocity(&mut rng);
            assert!(v.length() < 1.0 + 1e-6);

            let life = emitter.sample_lifetime(&mut rng);
            assert!((1.0..2.0).contains(&life));

            let color = emitter.sample_color(&mut rng);
            assert!((0.0..1.0).contains(&color[1]));
            assert_eq!(color[0], 1.0);
            assert_eq!(color[2], 0.2);
            assert_eq!(color[3], 1.0);
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        let emitter = ParticleEmitter::new(Vec2::new(2.0, 3.0))
            .with_speed(0.5, 0.5)
            .with_lifetime(3.0, 0.0)
            .with_color([0.1, 0.2, 0.3], 0.0);
        let mut rng = StdRng::seed_from_u64(8);

        assert!((emitter.sample_velocity(&mut rng).length() - 0.5).abs() < 1e-6);
        assert_eq!(emitter.sample_lifetime(&mut rng), 3.0);
        assert_eq!(emitter.sample_color(&mut rng), [0.1, 0.2, 0.3, 1.0]);
    }
}
