use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::TagsInputConfig;
use crate::model::item::{RawItem, TagItem};

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE: &str = "tags.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("{list}[{index}] has no usable {field:?} field")]
    InvalidItem {
        list: &'static str,
        index: usize,
        field: String,
    },
}

/// Read and validate a config file.
pub fn read_config(path: &Path) -> Result<TagsInputConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: TagsInputConfig = toml::from_str(&text)?;
    validate(&config)?;
    Ok(config)
}

/// Load `explicit` if given, else `tags.toml` in `dir` if present, else the
/// defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<TagsInputConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let path = dir.join(CONFIG_FILE);
    if path.is_file() {
        read_config(&path)
    } else {
        Ok(TagsInputConfig::default())
    }
}

/// Every record in the item lists must carry the configured value and text
/// fields.
pub fn validate(config: &TagsInputConfig) -> Result<(), ConfigError> {
    let fields = config.fields();
    let mut lists: Vec<(&'static str, &[RawItem])> = vec![
        ("items", config.items.as_slice()),
        ("allowed_items", config.allowed_items.as_slice()),
    ];
    if let Some(ta) = &config.typeahead {
        lists.push(("typeahead.source", ta.source.as_slice()));
    }

    for (list, items) in lists {
        for (index, raw) in items.iter().enumerate() {
            let RawItem::Record(record) = raw else {
                continue;
            };
            if TagItem::from_record(record.clone(), &fields).is_none() {
                let field = if record.get(&fields.value).is_none() {
                    fields.value.clone()
                } else {
                    fields.text.clone()
                };
                return Err(ConfigError::InvalidItem { list, index, field });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn reads_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "custom.toml", "free_input = true\nplaceholder = \"tags\"\n");
        let config = load_config(Some(&path), tmp.path()).unwrap();
        assert!(config.free_input);
        assert_eq!(config.placeholder, "tags");
    }

    #[test]
    fn falls_back_to_cwd_file_then_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert!(!config.free_input);

        write(tmp.path(), CONFIG_FILE, "free_input = true\n");
        let config = load_config(None, tmp.path()).unwrap();
        assert!(config.free_input);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml")), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn bad_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "bad.toml", "free_input = maybe\n");
        assert!(matches!(
            read_config(&path).unwrap_err(),
            ConfigError::ParseError(_)
        ));
    }

    #[test]
    fn record_without_text_field_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "items.toml",
            "item_text = \"name\"\nallowed_items = [{ value = 1, name = \"ok\" }, { value = 2 }]\n",
        );
        let err = read_config(&path).unwrap_err();
        assert_eq!(err.to_string(), "allowed_items[1] has no usable \"name\" field");
    }
}
