//! 引擎主入口
//!
//! 定义Engine结构和逐帧驱动循环

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{Key, NamedKey};

use crate::config::{EngineConfig, LogLevel};
use crate::platform::WinitWindow;
use crate::render::{FrameAcquire, GpuContext, PaintProgram, RenderBridge};
use crate::simulation::ParticlePool;

use super::clock::FrameClock;
use super::error::{EngineError, EngineResult};

/// 粒子引擎主结构
///
/// `Engine` 负责：
/// - 加载配置并初始化日志
/// - 创建窗口、GPU 上下文、绘制程序和渲染桥
/// - 构造粒子池并把它交给 [`FrameDriver`] 逐帧推进
///
/// # 示例
///
/// ```no_run
/// use particle_fountain::core::Engine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Engine::run()?;
///     Ok(())
/// }
/// ```
pub struct Engine;

impl Engine {
    /// 加载配置并运行引擎主循环
    pub fn run() -> EngineResult<()> {
        let mut config = EngineConfig::load_or_default()?;
        config.apply_env_overrides();
        Self::run_with_config(config)
    }

    /// 使用给定配置运行
    pub fn run_with_config(config: EngineConfig) -> EngineResult<()> {
        Self::initialize_logging(config.logging.level);
        config.validate()?;

        let event_loop = EventLoop::new()
            .map_err(|e| EngineError::EventLoop(format!("Failed to create event loop: {}", e)))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut driver = FrameDriver::new(&event_loop, &config)?;

        let result = event_loop.run(|event, elwt| driver.handle_event(event, elwt));

        tracing::info!(
            target: "engine",
            frames = driver.clock.frame_count(),
            seconds = driver.clock.elapsed_seconds(),
            "Engine shutting down"
        );

        if let Some(err) = driver.error.take() {
            return Err(err);
        }
        result.map_err(|e| EngineError::EventLoop(format!("Event loop error: {}", e)))
    }

    /// 初始化日志系统
    ///
    /// 日志级别可以通过`RUST_LOG`环境变量覆盖配置值。
    fn initialize_logging(level: LogLevel) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_directive()));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        tracing::info!(target: "engine", "Engine starting");
    }
}

/// 帧驱动器
///
/// 持有粒子池、渲染桥和随机数生成器，每帧先 `advance` 再 `sync_and_draw`。
/// 渲染不会反馈到模拟。
pub struct FrameDriver {
    window: WinitWindow,
    context: GpuContext,
    bridge: RenderBridge,
    pool: ParticlePool,
    rng: StdRng,
    clock: FrameClock,
    respawned_since_summary: usize,
    error: Option<EngineError>,
}

impl FrameDriver {
    /// 创建窗口和所有 GPU 资源；任何获取失败都直接返回错误
    pub fn new(event_loop: &EventLoop<()>, config: &EngineConfig) -> EngineResult<Self> {
        let window = WinitWindow::try_new(event_loop, &config.graphics)?;
        let context = pollster::block_on(GpuContext::new(window.handle(), config.graphics.vsync))?;

        let program = PaintProgram::load(context.device(), config.graphics.shader_path.as_deref())?;

        let sim = &config.simulation;
        let bridge = RenderBridge::new(
            context.device(),
            context.format(),
            &program,
            sim.capacity,
            config.graphics.clear_color,
        )?;

        let mut rng = match sim.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = ParticlePool::new(sim.capacity, sim.gravity, sim.emitter.clone(), &mut rng)
            .with_time_step(sim.time_step);

        tracing::info!(
            target: "engine",
            capacity = sim.capacity,
            gravity = sim.gravity,
            seed = ?sim.seed,
            "Simulation ready"
        );

        Ok(Self {
            window,
            context,
            bridge,
            pool,
            rng,
            clock: FrameClock::new(),
            respawned_since_summary: 0,
            error: None,
        })
    }

    fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { window_id, event } if window_id == self.window.id() => {
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key: Key::Named(NamedKey::Escape),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    } => elwt.exit(),
                    WindowEvent::Resized(size) => self.context.resize(size),
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = self.frame() {
                            tracing::error!(target: "engine", error = %err, "Frame failed");
                            self.error = Some(err);
                            elwt.exit();
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => self.window.request_redraw(),
            _ => {}
        }
    }

    /// 执行一帧：推进模拟，然后同步并绘制
    fn frame(&mut self) -> EngineResult<()> {
        let dt = self.clock.tick();
        let stats = self.pool.advance(dt, &mut self.rng);
        self.respawned_since_summary += stats.respawned;

        if let FrameAcquire::Ready(frame) = self.context.acquire_frame()? {
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            let mut encoder =
                self.context
                    .device()
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Particle Frame Encoder"),
                    });

            self.bridge
                .sync_and_draw(self.context.queue(), &mut encoder, &view, &self.pool)?;

            self.context.queue().submit(std::iter::once(encoder.finish()));
            frame.present();
        }

        tracing::trace!(target: "engine", dt, respawned = stats.respawned, "Frame");

        if let Some(summary) = self.clock.take_summary() {
            tracing::debug!(
                target: "engine",
                fps = summary.fps,
                frames = summary.frames,
                respawned = self.respawned_since_summary,
                particles = self.pool.len(),
                "Frame summary"
            );
            self.respawned_since_summary = 0;
        }

        Ok(())
    }
}
