//! Form configuration.
//!
//! Read from a YAML file named by `--config` or `SEEKFORM_CONFIG`:
//!
//! ```yaml
//! fields: [text, subject, from, to, msgid]
//! default_field: text
//! combinator: AND
//! ```
//!
//! Every key is optional; missing keys fall back to built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use seekform::{Combinator, FieldSet, QueryState, DEFAULT_FIELDS};

use crate::error::CliError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SEEKFORM_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    fields: Option<Vec<String>>,
    default_field: Option<String>,
    combinator: Option<String>,
}

/// Validated settings for new forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub fields: FieldSet,
    pub combinator: Combinator,
}

impl Config {
    /// Loads the config named by `explicit`, else by `SEEKFORM_CONFIG`,
    /// else returns defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, CliError> {
        match resolve_path(explicit) {
            Some(path) => Config::from_file(&path),
            None => {
                debug!("no config file, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_yaml(&text, path)?;
        debug!(path = %path.display(), fields = config.fields.fields().len(), "config loaded");
        Ok(config)
    }

    /// Parses and validates YAML. `origin` is only used in error messages.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Config, CliError> {
        let raw: RawConfig = if text.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(text).map_err(|source| CliError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?
        };
        raw.validate()
    }

    /// Starts a blank form with these settings.
    pub fn new_form(&self) -> QueryState {
        QueryState::for_fields(&self.fields).with_combinator(self.combinator)
    }
}

impl RawConfig {
    fn validate(self) -> Result<Config, CliError> {
        let fields = match self.fields {
            Some(fields) => FieldSet::new(fields)?,
            None => FieldSet::new(DEFAULT_FIELDS.iter().copied())?,
        };
        let fields = match self.default_field {
            Some(field) => fields.with_default(&field)?,
            None => fields,
        };
        let combinator = match self.combinator {
            Some(text) => text.parse()?,
            None => Combinator::default(),
        };
        Ok(Config { fields, combinator })
    }
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekform::FormError;
    use std::io::Write;

    fn parse(text: &str) -> Result<Config, CliError> {
        Config::from_yaml(text, Path::new("test.yaml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn full_config() {
        let config = parse(
            "fields: [title, author, tag]\ndefault_field: author\ncombinator: or\n",
        )
        .unwrap();
        assert_eq!(config.fields.fields(), ["title", "author", "tag"]);
        assert_eq!(config.fields.default_field(), "author");
        assert_eq!(config.combinator, Combinator::Or);
    }

    #[test]
    fn default_field_must_be_listed() {
        let err = parse("fields: [title]\ndefault_field: tag\n").unwrap_err();
        assert!(matches!(
            err,
            CliError::Form(FormError::UnknownField { ref field, .. }) if field == "tag"
        ));
    }

    #[test]
    fn empty_field_list_is_rejected() {
        let err = parse("fields: []\n").unwrap_err();
        assert!(matches!(err, CliError::Form(FormError::EmptyFieldSet)));
    }

    #[test]
    fn bad_combinator_is_rejected() {
        let err = parse("combinator: xor\n").unwrap_err();
        assert!(matches!(
            err,
            CliError::Form(FormError::UnknownCombinator(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("feilds: [title]\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fields: [subject, from]").unwrap();
        writeln!(file, "combinator: OR").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.fields.default_field(), "subject");

        let form = config.new_form();
        assert_eq!(form.combinator(), Combinator::Or);
        assert_eq!(form.include().rows()[0].field, "subject");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }
}
