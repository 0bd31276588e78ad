fn main() {
    if let Err(e) = particle_fountain::core::Engine::run() {
        eprintln!("Engine failed to start: {}", e);
        std::process::exit(1);
    }
}
