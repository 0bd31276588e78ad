use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window as WinitWindowRaw, WindowBuilder};

use crate::config::GraphicsConfig;
use crate::core::error::{EngineError, EngineResult};

/// winit 窗口包装
///
/// 窗口以 `Arc` 共享，GPU surface 持有其中一份引用从而获得 `'static` 生命周期。
#[derive(Clone)]
pub struct WinitWindow {
    window: Arc<WinitWindowRaw>,
}

impl WinitWindow {
    /// 按图形配置创建窗口
    pub fn try_new(event_loop: &EventLoop<()>, config: &GraphicsConfig) -> EngineResult<Self> {
        let win = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(
                config.resolution.width,
                config.resolution.height,
            ))
            .build(event_loop)
            .map_err(|e| EngineError::Window(e.to_string()))?;
        Ok(Self {
            window: Arc::new(win),
        })
    }

    /// 共享句柄（用于创建 surface）
    pub fn handle(&self) -> Arc<WinitWindowRaw> {
        Arc::clone(&self.window)
    }

    pub fn id(&self) -> winit::window::WindowId {
        self.window.id()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
