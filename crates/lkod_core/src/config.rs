use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder records are written to when nothing else is configured.
pub const DEFAULT_OUT_DIR: &str = "generated";
pub const DEFAULT_MODE: &str = "save-and-show";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub source: PathBuf,
    pub out_dir: PathBuf,
    /// Kept as text so an unrecognized mode surfaces as an unknown operation
    /// at dispatch time rather than as a config parse error.
    pub mode: String,
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            mode: DEFAULT_MODE.to_string(),
            pretty: false,
        }
    }
}

impl GeneratorConfig {
    /// Loads a `.toml`, `.yaml` or `.yml` config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Ok(toml::from_str(&raw)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(&raw)?),
            _ => Err(ConfigError::UnsupportedFormat(extension)),
        }
    }

    /// Applies command-line values on top of file values.
    pub fn with_overrides(
        mut self,
        source: Option<PathBuf>,
        out_dir: Option<PathBuf>,
        mode: Option<String>,
        pretty: bool,
    ) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(out_dir) = out_dir {
            self.out_dir = out_dir;
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self.pretty |= pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_toml_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lkod.toml");
        fs::write(&path, "source = \"lkod-data.json\"\n").unwrap();
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.source, PathBuf::from("lkod-data.json"));
        assert_eq!(config.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(config.mode, DEFAULT_MODE);
        assert!(!config.pretty);
    }

    #[test]
    fn loads_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lkod.yml");
        fs::write(
            &path,
            "source: lkod-data.json\nout_dir: generated-another\nmode: nosave-and-show\npretty: true\n",
        )
        .unwrap();
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("generated-another"));
        assert_eq!(config.mode, "nosave-and-show");
        assert!(config.pretty);
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lkod.ini");
        fs::write(&path, "source=x").unwrap();
        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lkod.toml");
        fs::write(&path, "sauce = \"x\"\n").unwrap();
        assert!(matches!(GeneratorConfig::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = GeneratorConfig::default().with_overrides(
            Some(PathBuf::from("other.json")),
            None,
            Some("save-and-noshow".to_string()),
            false,
        );
        assert_eq!(config.source, PathBuf::from("other.json"));
        assert_eq!(config.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(config.mode, "save-and-noshow");
    }
}
