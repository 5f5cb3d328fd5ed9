//! Runtime setup for the CLI: the rayon thread pool.

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        tracing::debug!("Thread pool already configured: {}", e);
    }
    tracing::debug!(workers = rayon::current_num_threads(), "thread pool ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_configuration_keeps_a_usable_pool() {
        configure_thread_pool(0);
        configure_thread_pool(2);
        assert!(rayon::current_num_threads() >= 1);
    }
}
