/// Intercept messages using the `log` crate and print them to STDERR, defaulting to `info`. Set
/// `RUST_LOG` to override, like `RUST_LOG=restriction_editor=debug`.
///
/// Calling this twice is harmless; the second call just logs that a logger already exists.
pub fn setup() {
    use env_logger::{Builder, Env};

    if let Err(err) = Builder::from_env(Env::default().default_filter_or("info")).try_init() {
        debug!("Logger already initialized: {}", err);
    }
}
