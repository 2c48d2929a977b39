//! Tally - counter demo page host
//!
//! Renders the configured page to static HTML, serves it live with hot
//! reload, or drives it from a command script.

pub mod config;
pub mod hot_reload;
pub mod script;
pub mod server;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub use config::{ConfigError, TallyConfig, DEFAULT_CONFIG_FILE};
pub use script::ScriptError;
pub use server::ServerError;

/// Terminal colors for the CLI and dev server banner
pub mod ansi {
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Static HTML snapshot of the configured page
pub fn render(config_path: &Path) -> Result<String, Error> {
    let config = TallyConfig::load(config_path)?;
    Ok(config.build_page().to_html())
}

/// Render and write to `out`, or stdout when no path is given
pub fn render_to(config_path: &Path, out: Option<&Path>) -> Result<(), Error> {
    let html = render(config_path)?;
    match out {
        Some(path) => {
            fs::write(path, &html).map_err(|source| Error::Write { path: path.to_path_buf(), source })?;
            info!(path = %path.display(), bytes = html.len(), "page written");
        }
        None => io::stdout()
            .write_all(html.as_bytes())
            .map_err(|source| Error::Write { path: PathBuf::from("<stdout>"), source })?,
    }
    Ok(())
}

/// Run a command script from a file, or stdin when no path is given
pub fn play(config_path: &Path, script_path: Option<&Path>, out: &mut impl Write) -> Result<(), Error> {
    let source = match script_path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| Error::Read { path: PathBuf::from("<stdin>"), source })?;
            source
        }
    };

    let mut page = TallyConfig::load(config_path)?.build_page();
    script::run(&mut page, &source, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_page() {
        let dir = tempfile::tempdir().unwrap();
        let html = render(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(html.contains("<h1>Framework Design - 2025</h1>"));
        assert_eq!(html.matches("data-widget=").count(), 3);
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config, "[page]\ntitle = \"Snapshot\"\n\n[[counter]]\ninitial = 1\n").unwrap();
        let out = dir.path().join("index.html");

        render_to(&config, Some(&out)).unwrap();
        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("<title>Snapshot</title>"));
        assert_eq!(html.matches("data-widget=").count(), 1);
    }

    #[test]
    fn test_play_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("demo.tally");
        fs::write(&script, "inc 1\nshow\n").unwrap();

        let mut out = Vec::new();
        play(&dir.path().join(DEFAULT_CONFIG_FILE), Some(&script), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("#1 count=55 min=0 max=100 step=5 theme=green animating=true"));
    }

    #[test]
    fn test_play_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = play(&dir.path().join(DEFAULT_CONFIG_FILE), Some(&dir.path().join("nope.tally")), &mut out).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_config_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config, "[[counter]]\nstep = \"big\"\n").unwrap();
        assert!(matches!(render(&config), Err(Error::Config(ConfigError::Parse { .. }))));
    }
}
