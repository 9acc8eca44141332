use crate::error::{Error, Result};
use crate::text::TranslationMap;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub replacements: HashMap<String, String>,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Layers `key=value` pairs from the command line over the file entries.
    pub fn merge_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.replacements.extend(pairs);
    }

    /// Validates every entry and builds the map a transformer runs with.
    pub fn translation_map(&self) -> Result<TranslationMap> {
        // Sorted so the first invalid entry reported is stable.
        let mut entries: Vec<_> = self.replacements.iter().collect();
        entries.sort();
        TranslationMap::try_from_pairs(entries)
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("WORDSWAP_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("wordswap.toml")
}

/// Loads the dictionary file.
///
/// An `explicit` path must exist. The default location is optional and an
/// empty config is used when nothing is there.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (config_path(), false),
    };

    let config: Config = match std::fs::read_to_string(&path) {
        Ok(content) => toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {path:?}: {e}")))?,
        Err(e) if required => {
            return Err(Error::config(format!("failed to read {path:?}: {e}")));
        }
        Err(e) => {
            debug!("no config at {path:?}: {e}");
            Config::default()
        }
    };

    debug!("config={path:?} replacements={}", config.replacements.len());
    Ok(config)
}

/// Splits a `key=value` argument.
pub fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_replacements() {
        let config = Config::parse(
            r#"
            [replacements]
            key = "KEY"
            value = "VALUE"
            "#,
        )
        .unwrap();
        assert_eq!(config.replacements.len(), 2);
        assert_eq!(config.replacements["key"], "KEY");
    }

    #[test]
    fn test_parse_empty() {
        let config = Config::parse("").unwrap();
        assert!(config.replacements.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[replacements\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_merge_pairs_overrides_file() {
        let mut config = Config::parse("[replacements]\nkey = \"one\"\n").unwrap();
        config.merge_pairs([("key".to_string(), "two".to_string())]);
        let map = config.translation_map().unwrap();
        assert_eq!(map.get("key"), Some("two"));
    }

    #[test]
    fn test_translation_map_validates() {
        let config = Config::parse("[replacements]\n\"abc_def\" = \"value\"\n").unwrap();
        let err = config.translation_map().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "key", .. }));

        let config = Config::parse("[replacements]\nkey = \"two words\"\n").unwrap();
        let err = config.translation_map().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "value", .. }));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[replacements]\ncolour = \"color\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.replacements["colour"], "color");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("key=KEY").unwrap(),
            ("key".to_string(), "KEY".to_string())
        );
        assert!(parse_pair("key").is_err());
        // Validation of the halves happens when the map is built.
        assert_eq!(
            parse_pair("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }
}
