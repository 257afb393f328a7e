use camino::{Utf8Path, Utf8PathBuf};
use cpilint_domain::ConfigurationError;
use cpilint_settings::RulesSource;

/// Rules files read from disk. Identity is the canonical filesystem path.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsRulesSource;

impl RulesSource for FsRulesSource {
    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf, ConfigurationError> {
        let canonical = std::fs::canonicalize(path).map_err(|source| io_error(path, source))?;
        Utf8PathBuf::from_path_buf(canonical).map_err(|other| {
            io_error(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("path is not UTF-8: {}", other.display()),
                ),
            )
        })
    }

    fn read_to_string(&self, path: &Utf8Path) -> Result<String, ConfigurationError> {
        std::fs::read_to_string(path).map_err(|source| io_error(path, source))
    }
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> ConfigurationError {
    ConfigurationError::Io {
        path: path.to_string(),
        source,
    }
}
