//! INI report configuration adapter.
//!
//! Section and key names are case-insensitive. Values are trimmed, and a
//! value wrapped in matching single or double quotes is unwrapped so that
//! directory names may carry leading or trailing spaces. Only `#` starts a
//! comment, so `delimiter = ;` reads as a semicolon.

use crate::domain::error::ReportError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::{Ini, IniDefault};
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

fn new_ini() -> Ini {
    let mut defaults = IniDefault::default();
    defaults.comment_symbols = vec!['#'];
    Ini::new_from_defaults(defaults)
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let mut config = new_ini();
        config.load(path).map_err(|reason| ReportError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        log::debug!("Loaded config sections {:?}", config.sections());
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, ReportError> {
        let mut config = new_ini();
        config
            .read(content.to_string())
            .map_err(|reason| ReportError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| unquote(&v).to_string())
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        match self.get_string(section, key) {
            None => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("[{section}] {key} = {raw:?} is not a number; using {default}");
                default
            }),
        }
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.get_string(section, key) {
            None => default,
            Some(raw) => Self::parse_bool(&raw).unwrap_or_else(|| {
                log::warn!("[{section}] {key} = {raw:?} is not a boolean; using {default}");
                default
            }),
        }
    }
}
