/// 统一配置系统
///
/// 提供TOML/JSON配置文件和环境变量覆盖
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub mod graphics;
pub mod simulation;

pub use graphics::{GraphicsConfig, Resolution};
pub use simulation::SimulationConfig;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 模拟配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// 按键查询覆盖值，无法解析的值被忽略
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(target: "config", key, value = %raw, "Ignoring unparsable override");
                    None
                }
            }
        }

        // 图形配置
        if let Some(width) = parsed(&lookup, "PARTICLES_WIDTH") {
            self.graphics.resolution.width = width;
        }
        if let Some(height) = parsed(&lookup, "PARTICLES_HEIGHT") {
            self.graphics.resolution.height = height;
        }
        if let Some(vsync) = parsed(&lookup, "PARTICLES_VSYNC") {
            self.graphics.vsync = vsync;
        }

        // 模拟配置
        if let Some(capacity) = parsed(&lookup, "PARTICLES_CAPACITY") {
            self.simulation.capacity = capacity;
        }
        if let Some(gravity) = parsed(&lookup, "PARTICLES_GRAVITY") {
            self.simulation.gravity = gravity;
        }
        if let Some(seed) = parsed(&lookup, "PARTICLES_SEED") {
            self.simulation.seed = Some(seed);
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.graphics.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./config.toml
    /// 2. ./config.json
    /// 3. 使用默认配置
    ///
    /// 文件存在但无法解析时返回错误，不静默回退。
    pub fn load_or_default() -> ConfigResult<Self> {
        if Path::new("config.toml").exists() {
            let config = Self::from_toml_file("config.toml")?;
            tracing::info!(target: "config", "Loaded config from config.toml");
            return Ok(config);
        }

        if Path::new("config.json").exists() {
            let config = Self::from_json_file("config.json")?;
            tracing::info!(target: "config", "Loaded config from config.json");
            return Ok(config);
        }

        tracing::info!(target: "config", "Using default configuration");
        Ok(Self::default())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: LogLevel,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// 作为 `EnvFilter` 指令使用的字符串
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::TimeStepPolicy;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.capacity, 1000);
        assert_eq!(config.graphics.resolution.width, 800);
    }

    #[test]
    fn test_toml_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.simulation.capacity, parsed.simulation.capacity);
        assert_eq!(config.simulation.emitter, parsed.simulation.emitter);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [simulation]
            capacity = 5000
            time_step = "Passthrough"

            [simulation.emitter]
            origin = [0.5, -0.5]
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.capacity, 5000);
        assert_eq!(config.simulation.time_step, TimeStepPolicy::Passthrough);
        assert_eq!(config.simulation.emitter.origin, glam::Vec2::new(0.5, -0.5));
        assert_eq!(config.simulation.emitter.speed_max, 1.0);
        assert_eq!(config.graphics.title, "Particle System");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_json_parse() {
        let config =
            EngineConfig::from_json_str(r#"{ "simulation": { "gravity": 9.81, "seed": 7 } }"#)
                .unwrap();
        assert_eq!(config.simulation.gravity, 9.81);
        assert_eq!(config.simulation.seed, Some(7));
    }

    #[test]
    fn test_parse_error() {
        let err = EngineConfig::from_toml_str("simulation = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PARTICLES_CAPACITY", "250"),
            ("PARTICLES_SEED", "99"),
            ("PARTICLES_VSYNC", "false"),
            ("PARTICLES_GRAVITY", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.simulation.capacity, 250);
        assert_eq!(config.simulation.seed, Some(99));
        assert!(!config.graphics.vsync);
        assert_eq!(config.simulation.gravity, 0.98);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = EngineConfig::default();
        config.simulation.capacity = 42;
        config.save_toml(&path).unwrap();

        let loaded = EngineConfig::from_toml_file(&path).unwrap();
        assert_eq!(loaded.simulation.capacity, 42);
    }
}
