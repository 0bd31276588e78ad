//! 核心模块
//!
//! 包含引擎的核心功能：
//! - `engine` - 主引擎入口和帧驱动循环
//! - `clock` - 帧时钟
//! - `error` - 错误类型定义

pub mod clock;
pub mod engine;
pub mod error;
#[macro_use]
pub mod macros;

// 重新导出错误类型
pub use error::{EngineError, EngineResult, RenderError, RenderResult};

// 重新导出主要类型
pub use clock::{FrameClock, FrameSummary};
pub use engine::{Engine, FrameDriver};
