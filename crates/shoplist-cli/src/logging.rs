//! Logging setup
//!
//! Logging is opt-in: nothing is recorded unless SHOPLIST_LOG is set to a
//! level (`debug`, `info`, ...). Output goes to `config.log_file` when
//! configured, otherwise to stderr.

use std::fs::File;

use shoplist_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "SHOPLIST_LOG";

/// Tracing target root of this binary (the bin name, not the package name)
const CLI_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Initialize logging if SHOPLIST_LOG is set
pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let env_filter = env_filter(&log_level);

    match &config.log_file {
        Some(log_path) => {
            let log_file = match File::create(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_file)
                .try_init();

            info!("Logging initialized to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Filter limiting output to this workspace's crates
fn filter_directives(level: &str) -> String {
    let level = level.trim();
    format!("shoplist_core={},{}={}", level, CLI_TARGET, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Output, OutputFormat};
    use crate::session::Session;
    use shoplist_core::ItemStore;
    use std::io::{self, Cursor, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(CLI_TARGET, "shoplist");
        assert_eq!(
            filter_directives(" debug "),
            "shoplist_core=debug,shoplist=debug"
        );
        assert!(EnvFilter::try_new(filter_directives("info")).is_ok());
    }

    #[test]
    fn test_filter_passes_session_and_store_events() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter("debug"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut session = Session::new(ItemStore::new(), Output::new(OutputFormat::Quiet));
            session
                .run(Cursor::new("add Oatmilk\nlist\n"), false)
                .unwrap();
        });

        let logs = captured.contents();
        assert!(logs.contains("shoplist_core::store"), "{}", logs);
        assert!(logs.contains("Added item"), "{}", logs);
        assert!(logs.contains("shoplist::session"), "{}", logs);
        assert!(logs.contains("Session ended"), "{}", logs);
    }

    #[test]
    fn test_filter_respects_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter("info"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut session = Session::new(ItemStore::new(), Output::new(OutputFormat::Quiet));
            session.run(Cursor::new("add Oatmilk\n"), false).unwrap();
        });

        let logs = captured.contents();
        assert!(!logs.contains("Added item"), "{}", logs);
        assert!(logs.contains("Session ended"), "{}", logs);
    }
}
