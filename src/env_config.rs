//! Environment configuration shared by the binary and benchmarks.
//!
//! Reads `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`) for the worker pool
//! and `RUST_LOG` for the logger.

/// Thread count from `RAYON_NUM_THREADS`, then `OMP_NUM_THREADS`, else the
/// hardware parallelism.
pub fn configured_threads() -> usize {
    std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
}

/// Build the rayon global pool with [`configured_threads`] workers.
/// Tolerates an already-initialized pool. Returns the pool's thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = configured_threads();
    if rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .is_err()
    {
        log::debug!("rayon global pool already initialized");
    }
    let actual = rayon::current_num_threads();
    log::info!("rayon threads: {}", actual);
    actual
}

/// Initialize `env_logger` with `info` as the default filter.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
