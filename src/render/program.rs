//! 绘制程序（着色器模块）
//!
//! 从磁盘加载 WGSL 源码，找不到文件时回退到内嵌副本。编译失败直接返回错误，
//! 由启动流程终止进程。

use std::borrow::Cow;
use std::path::Path;

use crate::core::error::{RenderError, RenderResult};

/// 内嵌的粒子着色器
pub const PARTICLE_SHADER: &str = include_str!("../../shaders/particle.wgsl");

/// 已编译的绘制程序
pub struct PaintProgram {
    module: wgpu::ShaderModule,
}

impl PaintProgram {
    /// 顶点入口
    pub const VERTEX_ENTRY: &'static str = "vs_main";
    /// 片元入口
    pub const FRAGMENT_ENTRY: &'static str = "fs_main";

    /// 按路径加载并编译；`None` 或文件不存在时使用内嵌源码
    pub fn load(device: &wgpu::Device, path: Option<&Path>) -> RenderResult<Self> {
        let source = resolve_source(path)?;
        Self::from_wgsl(device, &source)
    }

    /// 编译 WGSL 源码
    pub fn from_wgsl(device: &wgpu::Device, source: &str) -> RenderResult<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderCompilation(err.to_string()));
        }

        Ok(Self { module })
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}

/// 解析着色器源码来源
pub fn resolve_source(path: Option<&Path>) -> RenderResult<Cow<'static, str>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(PARTICLE_SHADER));
    };

    match std::fs::read_to_string(path) {
        Ok(source) => {
            tracing::info!(target: "render", path = %path.display(), "Loaded particle shader");
            Ok(Cow::Owned(source))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                target: "render",
                path = %path.display(),
                "Shader file not found, using embedded source"
            );
            Ok(Cow::Borrowed(PARTICLE_SHADER))
        }
        Err(e) => Err(RenderError::ShaderSource(format!("{}: {}", path.display(), e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_shader_exposes_entries() {
        assert!(PARTICLE_SHADER.contains(PaintProgram::VERTEX_ENTRY));
        assert!(PARTICLE_SHADER.contains(PaintProgram::FRAGMENT_ENTRY));
        assert!(PARTICLE_SHADER.contains("@location(0) position: vec2<f32>"));
        assert!(PARTICLE_SHADER.contains("@location(1) color: vec4<f32>"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let source = resolve_source(Some(Path::new("does/not/exist.wgsl"))).unwrap();
        assert_eq!(source, PARTICLE_SHADER);
        assert_eq!(resolve_source(None).unwrap(), PARTICLE_SHADER);
    }

    #[test]
    fn test_file_source_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.wgsl");
        std::fs::write(&path, "// custom").unwrap();

        let source = resolve_source(Some(&path)).unwrap();
        assert_eq!(source, "// custom");
    }

    #[test]
    fn test_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_source(Some(dir.path())).unwrap_err();
        assert!(matches!(err, RenderError::ShaderSource(_)));
    }
}
