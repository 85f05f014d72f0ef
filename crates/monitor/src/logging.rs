//! Tracing subscriber setup

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops. `debug` widens
/// the max level, mirroring the config's `debug` switch.
pub fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_init_is_harmless() {
        init_logging(true);
        init_logging(false);
    }
}
