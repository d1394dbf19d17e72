use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the output directory exists, creating missing parents.
///
/// Fails when the path exists but is not a directory.
pub fn ensure_output_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.exists() && !dir.is_dir() {
        anyhow::bail!("output path {} is not a directory", dir.display());
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map level names such as `WARNING` or `CRITICAL` onto `tracing` filter directives.
/// Unknown names pass through unchanged (lowercased).
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber on stderr.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_output_dir ────────────────────────────────────────────────

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("charts").join("2024");

        ensure_output_dir(&out).expect("ensure_output_dir should succeed");

        assert!(out.is_dir(), "output dir must exist");
    }

    #[test]
    fn test_ensure_output_dir_existing_is_ok() {
        let tmp = TempDir::new().expect("tempdir");
        ensure_output_dir(tmp.path()).expect("existing dir is fine");
    }

    #[test]
    fn test_ensure_output_dir_rejects_file() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("data.csv");
        std::fs::write(&file, "Fecha\n").expect("write file");

        assert!(ensure_output_dir(&file).is_err());
    }

    // ── test_level_directive ──────────────────────────────────────────────────

    #[test]
    fn test_level_directive_named_levels() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
    }

    #[test]
    fn test_level_directive_passthrough() {
        assert_eq!(level_directive("sismo_data=TRACE"), "sismo_data=trace");
    }
}
