//! 平台抽象层
//!
//! 目前只有桌面 winit 后端。

pub mod winit;

pub use self::winit::WinitWindow;
