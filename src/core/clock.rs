//! 帧时钟
//!
//! 基于单调时钟计算每帧的 `dt`，并维护用于周期性日志的帧计数。

use std::time::{Duration, Instant};

/// 帧时钟
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_count: u64,
    window_start: Instant,
    window_frames: u32,
}

/// 一个统计窗口内的帧率汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub frames: u32,
    pub fps: f32,
}

impl FrameClock {
    /// 统计窗口长度
    pub const SUMMARY_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
            frame_count: 0,
            window_start: now,
            window_frames: 0,
        }
    }

    /// 记录一帧，返回距上一帧的秒数
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        self.frame_count += 1;
        self.window_frames += 1;
        dt
    }

    /// 统计窗口到期时返回汇总并开启新窗口
    pub fn take_summary(&mut self) -> Option<FrameSummary> {
        self.take_summary_at(Instant::now())
    }

    pub fn take_summary_at(&mut self, now: Instant) -> Option<FrameSummary> {
        let span = now.saturating_duration_since(self.window_start);
        if span < Self::SUMMARY_INTERVAL {
            return None;
        }

        let summary = FrameSummary {
            frames: self.window_frames,
            fps: self.window_frames as f32 / span.as_secs_f32(),
        };
        self.window_start = now;
        self.window_frames = 0;
        Some(summary)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// 自创建以来的秒数
    pub fn elapsed_seconds(&self) -> f64 {
        self.last.saturating_duration_since(self.start).as_secs_f64()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
