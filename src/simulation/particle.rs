//! 粒子数据实体
//!
//! `Particle` 同时是 CPU 端的模拟状态和 GPU 镜像缓冲区的顶点格式，
//! 内存布局固定为 `#[repr(C)]`，整块按字节上传。

use glam::Vec2;
use rand::Rng;

use super::emitter::ParticleEmitter;

/// 单个粒子
///
/// 字节布局（stride = 36）：
///
/// | 字段       | 偏移 | 类型       |
/// |------------|------|------------|
/// | `position` | 0    | `[f32; 2]` |
/// | `velocity` | 8    | `[f32; 2]` |
/// | `color`    | 16   | `[f32; 4]` |
/// | `lifetime` | 32   | `f32`      |
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    /// 位置（发射器局部空间）
    pub position: [f32; 2],
    /// 速度（单位/秒）
    pub velocity: [f32; 2],
    /// 颜色 (r, g, b, a)，alpha 由剩余寿命派生
    pub color: [f32; 4],
    /// 剩余寿命（秒）
    pub lifetime: f32,
}

impl Particle {
    /// `position` 字段的字节偏移
    pub const POSITION_OFFSET: u64 = 0;
    /// `color` 字段的字节偏移
    pub const COLOR_OFFSET: u64 = 16;
    /// 每个粒子的字节跨度
    pub const STRIDE: u64 = std::mem::size_of::<Particle>() as u64;

    /// 由发射器生成一个新粒子（含随机的绿色通道扰动）
    pub fn spawn<R: Rng + ?Sized>(emitter: &ParticleEmitter, rng: &mut R) -> Self {
        let mut particle = Self {
            position: emitter.origin.to_array(),
            velocity: [0.0; 2],
            color: emitter.sample_color(rng),
            lifetime: 0.0,
        };
        particle.respawn(emitter, rng);
        particle
    }

    /// 原地重生
    ///
    /// 位置回到发射器原点，重新抽取速度和寿命，alpha 强制为 1。
    /// RGB 通道保持不变。
    pub fn respawn<R: Rng + ?Sized>(&mut self, emitter: &ParticleEmitter, rng: &mut R) {
        self.position = emitter.origin.to_array();
        self.velocity = emitter.sample_velocity(rng).to_array();
        self.lifetime = emitter.sample_lifetime(rng);
        self.color[3] = 1.0;
    }

    /// 推进单个粒子一步
    ///
    /// 只读写 `self`，不同粒子之间没有共享状态。
    /// 返回 `true` 表示本步触发了重生。
    #[inline]
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        gravity: f32,
        emitter: &ParticleEmitter,
        rng: &mut R,
    ) -> bool {
        self.lifetime -= dt;
        if self.lifetime < 0.0 {
            self.respawn(emitter, rng);
            return true;
        }

        // 先更新速度再积分位置（半隐式欧拉）
        self.velocity[1] -= gravity * dt;
        let position = self.position() + self.velocity() * dt;
        self.position = position.to_array();
        self.color[3] = self.lifetime;
        false
    }

    /// 位置
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    /// 速度
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.color[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_layout_matches_vertex_contract() {
        assert_eq!(std::mem::size_of::<Particle>(), 36);
        assert_eq!(std::mem::offset_of!(Particle, position) as u64, Particle::POSITION_OFFSET);
        assert_eq!(std::mem::offset_of!(Particle, color) as u64, Particle::COLOR_OFFSET);
        assert_eq!(std::mem::offset_of!(Particle, lifetime), 32);
    }

    #[test]
    fn test_step_alive_applies_gravity_then_integrates() {
        let emitter = ParticleEmitter::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle {
            position: [1.0, 2.0],
            velocity: [0.5, 0.25],
            color: [1.0, 0.5, 0.2, 1.0],
            lifetime: 1.5,
        };

        let respawned = p.step(0.5, 0.98, &emitter, &mut rng);

        assert!(!respawned);
        assert_eq!(p.lifetime, 1.0);
        assert_eq!(p.velocity, [0.5, 0.25 - 0.98 * 0.5]);
        assert_eq!(p.position, [1.0 + 0.5 * 0.5, 2.0 + (0.25 - 0.49) * 0.5]);
        assert_eq!(p.alpha(), p.lifetime);
    }

    #[test]
    fn test_step_respawns_in_place() {
        let emitter = ParticleEmitter::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut p = Particle {
            position: [3.0, -4.0],
            velocity: [0.1, 0.1],
            color: [1.0, 0.3, 0.2, 0.1],
            lifetime: 0.1,
        };

        let respawned = p.step(0.2, 0.98, &emitter, &mut rng);

        assert!(respawned);
        assert_eq!(p.position, [0.0, 0.0]);
        assert_eq!(p.alpha(), 1.0);
        assert!((1.0..2.0).contains(&p.lifetime));
        // RGB 不变
        assert_eq!(&p.color[..3], &[1.0, 0.3, 0.2]);
    }

    #[test]
    fn test_alpha_may_exceed_one() {
        let emitter = ParticleEmitter::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::spawn(&emitter, &mut rng);
        p.lifetime = 1.9;
        p.step(0.1, 0.98, &emitter, &mut rng);
        assert!(p.alpha() > 1.0);
    }
}
