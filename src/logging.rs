//! Log output setup.
//!
//! The client only emits `tracing` events. Applications that already install a
//! subscriber need nothing from here; others can call [`init`] with the configured
//! [`LogTarget`].

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogTarget;
use crate::error::AkismetError;

const DEFAULT_FILTER: &str = "akismet_client=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber writing to `target`.
///
/// Returns `Ok(false)` when nothing was installed, either because the target is
/// [`LogTarget::Off`] or because another subscriber is already set.
pub fn init(target: &LogTarget) -> Result<bool, AkismetError> {
    let fmt = tracing_subscriber::fmt::layer()
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let installed = match target {
        LogTarget::Off => return Ok(false),
        LogTarget::Stdout => tracing_subscriber::registry()
            .with(filter())
            .with(fmt.with_writer(io::stdout))
            .try_init()
            .is_ok(),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter())
            .with(fmt.with_writer(io::stderr))
            .try_init()
            .is_ok(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter())
                .with(fmt.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .is_ok()
        }
    };
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_installs_nothing() {
        assert!(!init(&LogTarget::Off).unwrap());
    }

    #[test]
    fn file_target_must_be_writable() {
        let dir = tempfile::tempdir().unwrap();
        let target = LogTarget::File(dir.path().join("missing").join("akismet.log"));
        assert!(matches!(init(&target), Err(AkismetError::IOError(_))));
    }

    #[test]
    fn file_target_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("akismet.log");
        // Another test may already own the global subscriber
        init(&LogTarget::File(path.clone())).unwrap();
        assert!(path.exists());
    }
}
