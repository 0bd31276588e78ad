//! # Particle Fountain
//!
//! A real-time particle fountain: a fixed pool of point particles advanced on
//! the CPU every frame and streamed to a GPU vertex buffer for additive point
//! rendering with wgpu.
//!
//! ## Frame flow
//!
//! ```text
//! FrameClock::tick ─► ParticlePool::advance(dt) ─► RenderBridge::sync_and_draw(&pool)
//! ```
//!
//! The pool is a fixed-slot arena: particles are never added or removed, a dead
//! particle is respawned in place at the emitter origin. The render bridge
//! overwrites the whole mirror buffer each frame and binds only the position
//! and color fields.
//!
//! ### Example
//!
//! ```
//! use particle_fountain::render::{HostMirror, MirrorSink};
//! use particle_fountain::simulation::ParticlePool;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut pool = ParticlePool::with_capacity(1000, &mut rng);
//! pool.advance(1.0 / 60.0, &mut rng);
//!
//! let mut mirror = HostMirror::new(pool.len());
//! mirror.upload(pool.particles()).unwrap();
//! assert_eq!(mirror.bytes(), pool.as_bytes());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Engine entry point, frame driver, clock and errors
//! - [`simulation`]: Particle state, emitter and pool
//! - [`render`]: GPU context, paint program and render bridge
//! - [`config`]: TOML/JSON configuration
//! - [`platform`]: Window creation

/// Core engine functionality including the frame loop and error types
#[macro_use]
pub mod core;
/// Configuration system
pub mod config;
/// Platform abstraction layer
pub mod platform;
/// Rendering of the particle pool
pub mod render;
/// Particle simulation
pub mod simulation;
