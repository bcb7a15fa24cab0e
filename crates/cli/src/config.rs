use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional TOML configuration file. Every field has a CLI flag that
/// overrides it.
///
/// ```toml
/// [backend]
/// url = "http://localhost:9200"
///
/// [index]
/// dest = "akif"
/// charset = "utf-8"
/// skip_malformed = false
/// checkpoint_file = "/var/lib/docfeed/checkpoint.json"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub index: IndexSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexSection {
    pub dest: Option<String>,
    pub charset: Option<String>,
    pub skip_malformed: Option<bool>,
    pub checkpoint_file: Option<PathBuf>,
}

pub fn load(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[backend]\nurl = \"http://localhost:9200\"\n\n\
             [index]\ndest = \"akif\"\nskip_malformed = true\n"
        )
        .unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.backend.url.as_deref(), Some("http://localhost:9200"));
        assert_eq!(config.index.dest.as_deref(), Some("akif"));
        assert_eq!(config.index.skip_malformed, Some(true));
        assert_eq!(config.index.charset, None);
    }

    #[test]
    fn empty_config_is_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "").unwrap();
        let config = load(file.path()).unwrap();
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[index]\ndestination = \"typo\"\n").unwrap();
        assert!(load(file.path()).is_err());
    }
}
