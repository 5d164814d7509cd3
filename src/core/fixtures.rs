//! Recording helper for persisting fetched pages as test fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("FINVIZ_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Writes `body` to `<fixture dir>/<endpoint>_<symbol>.<ext>`.
pub(crate) fn record_fixture(
    endpoint: &str,
    symbol: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let path = dir.join(format!("{endpoint}_{symbol}.{ext}"));

    let mut file = fs::File::create(&path)?;
    file.write_all(body.as_bytes())?;

    if super::net::debug_enabled() {
        eprintln!("FINVIZ_RECORD: wrote fixture to {}", path.display());
    }
    Ok(())
}
