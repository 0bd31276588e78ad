use particle_fountain::config::EngineConfig;
use particle_fountain::render::{HostMirror, MirrorSink};
use particle_fountain::simulation::{ParticlePool, TimeStepPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pool_from_config(config: &EngineConfig) -> (ParticlePool, StdRng) {
    let sim = &config.simulation;
    let mut rng = StdRng::seed_from_u64(sim.seed.unwrap_or(0));
    let pool = ParticlePool::new(sim.capacity, sim.gravity, sim.emitter.clone(), &mut rng)
        .with_time_step(sim.time_step);
    (pool, rng)
}

#[test]
fn test_headless_frame_loop() {
    let config = EngineConfig::default();
    config.validate().unwrap();

    let (mut pool, mut rng) = pool_from_config(&config);
    let mut mirror = HostMirror::new(config.simulation.capacity);

    // 约 5 秒的 60 FPS 帧，每帧先推进再同步
    let mut respawned = 0;
    for _ in 0..300 {
        let stats = pool.advance(1.0 / 60.0, &mut rng);
        respawned += stats.respawned;
        mirror.upload(pool.particles()).unwrap();

        assert_eq!(pool.len(), 1000);
        assert_eq!(mirror.bytes(), pool.as_bytes());
    }

    // 寿命 < 2 秒，5 秒内每个槽位至少重生两次
    assert!(respawned >= 2 * 1000);

    for (slot, p) in pool.particles().iter().enumerate() {
        assert!(p.lifetime >= 0.0 && p.lifetime < 2.0);
        assert_eq!(mirror.position(slot), p.position);
        assert_eq!(mirror.color(slot), p.color);
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut config = EngineConfig::default();
    config.simulation.seed = Some(1234);
    config.simulation.capacity = 128;

    let (mut a, mut rng_a) = pool_from_config(&config);
    let (mut b, mut rng_b) = pool_from_config(&config);

    for frame in 0..120 {
        let dt = if frame % 7 == 0 { 0.05 } else { 1.0 / 60.0 };
        a.advance(dt, &mut rng_a);
        b.advance(dt, &mut rng_b);
    }

    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_config_drives_pool() {
    let config = EngineConfig::from_toml_str(
        r#"
        [simulation]
        capacity = 64
        gravity = 0.0
        time_step = "Passthrough"
        seed = 5

        [simulation.emitter]
        origin = [0.25, 0.75]
        speed_min = 0.0
        speed_max = 0.5
        "#,
    )
    .unwrap();
    config.validate().unwrap();

    let (pool, _) = pool_from_config(&config);

    assert_eq!(pool.len(), 64);
    assert_eq!(pool.gravity(), 0.0);
    assert_eq!(pool.time_step(), TimeStepPolicy::Passthrough);
    for p in pool.particles() {
        assert_eq!(p.position, [0.25, 0.75]);
        assert!(p.velocity().length() < 0.5 + 1e-6);
    }
}
