//! 统一错误处理模块
//!
//! 模拟本身不会失败，错误只来自启动阶段的资源获取（窗口、GPU、着色器、配置）
//! 以及运行时 surface 的不可恢复错误。

use thiserror::Error;

use crate::config::ConfigError;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Event loop error: {0}")]
    EventLoop(String),
}

/// 渲染系统错误
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),

    #[error("Failed to request adapter: no compatible GPU found")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    DeviceRequest(String),

    #[error("Failed to read shader source: {0}")]
    ShaderSource(String),

    #[error("Failed to create shader: {0}")]
    ShaderCompilation(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Mirror capacity mismatch: expected {expected} particles, got {actual}")]
    CapacityMismatch { expected: usize, actual: usize },

    #[error("Mirror buffer too large: {requested} bytes exceeds device limit of {limit} bytes")]
    BufferTooLarge { requested: u64, limit: u64 },
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let render_err = RenderError::NoAdapter;
        let engine_err: EngineError = render_err.into();
        assert!(matches!(engine_err, EngineError::Render(_)));

        let config_err = ConfigError::ValidationError("capacity".to_string());
        let engine_err: EngineError = config_err.into();
        assert!(matches!(engine_err, EngineError::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = RenderError::NoAdapter;
        assert_eq!(
            err.to_string(),
            "Failed to request adapter: no compatible GPU found"
        );

        let err = RenderError::CapacityMismatch { expected: 1000, actual: 10 };
        assert_eq!(
            err.to_string(),
            "Mirror capacity mismatch: expected 1000 particles, got 10"
        );

        let err = RenderError::BufferTooLarge { requested: 720, limit: 256 };
        assert_eq!(
            err.to_string(),
            "Mirror buffer too large: 720 bytes exceeds device limit of 256 bytes"
        );
    }
}
