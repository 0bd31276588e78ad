use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// 窗口标题
    pub title: String,

    /// 分辨率
    pub resolution: Resolution,

    /// 垂直同步
    pub vsync: bool,

    /// 清屏颜色 (r, g, b, a)
    pub clear_color: [f32; 4],

    /// 着色器文件路径，文件不存在时使用内嵌着色器
    pub shader_path: Option<PathBuf>,
}

impl_default!(GraphicsConfig {
    title: "Particle System".to_string(),
    resolution: Resolution::default(),
    vsync: true,
    clear_color: [0.0, 0.0, 0.0, 1.0],
    shader_path: Some(PathBuf::from("shaders/particle.wgsl")),
});

impl GraphicsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(ConfigError::ValidationError(
                "Invalid resolution".to_string(),
            ));
        }
        if self.clear_color.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::ValidationError(
                "Clear color must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// 分辨率
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// 宽度（像素）
    pub width: u32,
    /// 高度（像素）
    pub height: u32,
}

impl_default!(Resolution {
    width: 800,
    height: 600,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_resolution_rejected() {
        let mut config = GraphicsConfig::new();
        config.resolution.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
