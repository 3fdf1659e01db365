use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::io::{read_config_file, write_config_file};
use super::path::{config_path, config_path_in, validate_config_name};
use crate::error::{Error, Result};
use crate::logger::{LogFacade, Logger};
use crate::models::{ConfigItem, ConfigValue};
use crate::prompt::{default_prompter, prompt_value, PromptRequest, Prompter};

/// Values read back from the config file, keyed by item name.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// `errno` reported for a cancelled `configure`.
pub const EINTR: i32 = 4;

/// Outcome of [`ConfigManager::configure`].
#[derive(Debug)]
pub enum ConfigureStatus {
    /// Every item was answered and the file was written.
    Success,
    /// The user cancelled; nothing was written.
    Interrupted,
    /// Answers were collected but writing the file failed.
    Filesystem(io::Error),
}

impl ConfigureStatus {
    /// Process exit code: 0, `EINTR`, or the OS error code of the failed write.
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Interrupted => EINTR,
            Self::Filesystem(e) => e.raw_os_error().unwrap_or(1),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Owns the item list and the location of the config file.
pub struct ConfigManager {
    config_name: String,
    config_items: Vec<ConfigItem>,
    config_filepath: PathBuf,
    logger: Box<dyn Logger>,
}

impl fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("config_name", &self.config_name)
            .field("config_items", &self.config_items)
            .field("config_filepath", &self.config_filepath)
            .finish_non_exhaustive()
    }
}

impl ConfigManager {
    /// Manager for `~/.{config_name}`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use appconfig::{ConfigItem, ConfigManager};
    ///
    /// let items = vec![ConfigItem::builder("path").initial_value(".").build()?];
    /// let manager = ConfigManager::new(".myapp", items)?;
    /// assert!(manager.config_filepath().ends_with(".myapp"));
    /// # Ok::<(), appconfig::Error>(())
    /// ```
    pub fn new(config_name: &str, config_items: Vec<ConfigItem>) -> Result<Self> {
        validate_config_name(config_name)?;
        let config_filepath = config_path(config_name)?;
        Self::build(config_name, config_items, config_filepath)
    }

    /// Same as [`ConfigManager::new`] but rooted at `base_dir` instead of the
    /// home directory.
    pub fn with_base_dir(
        base_dir: &Path,
        config_name: &str,
        config_items: Vec<ConfigItem>,
    ) -> Result<Self> {
        validate_config_name(config_name)?;
        let config_filepath = config_path_in(base_dir, config_name);
        Self::build(config_name, config_items, config_filepath)
    }

    fn build(
        config_name: &str,
        config_items: Vec<ConfigItem>,
        config_filepath: PathBuf,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &config_items {
            if !seen.insert(item.name()) {
                return Err(Error::invalid_name(item.name(), "duplicate config item name"));
            }
        }

        Ok(Self {
            config_name: config_name.to_string(),
            config_items,
            config_filepath,
            logger: Box::new(LogFacade),
        })
    }

    /// Replace the default `log`-backed logger.
    pub fn with_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    pub fn config_items(&self) -> &[ConfigItem] {
        &self.config_items
    }

    pub fn config_filepath(&self) -> &Path {
        &self.config_filepath
    }

    /// Whether a regular file exists at [`ConfigManager::config_filepath`].
    pub fn exists(&self) -> bool {
        self.config_filepath.is_file()
    }

    /// Read saved values for the configured items.
    ///
    /// A missing file yields an empty map. Values are returned as stored,
    /// without coercion to the item's type. Keys that are not configured are
    /// ignored. Fails if any required item is absent, naming all of them.
    pub fn load(&self, path: Option<&Path>) -> Result<ConfigMap> {
        let path = path.unwrap_or(&self.config_filepath);

        let Some(loaded) = read_config_file(path)? else {
            self.logger
                .debug(&format!("config file not found: path='{}'", path.display()));
            return Ok(ConfigMap::new());
        };
        self.logger.debug(&format!(
            "config file loaded: path='{}', entries={}",
            path.display(),
            loaded.len()
        ));

        let mut valid = ConfigMap::new();
        let mut missing = Vec::new();

        for item in &self.config_items {
            let Some(raw) = loaded.get(item.name()) else {
                if item.required() {
                    missing.push(item.name().to_string());
                }
                continue;
            };
            let value = ConfigValue::from_json(raw).ok_or_else(|| Error::UnsupportedValue {
                key: item.name().to_string(),
            })?;
            valid.insert(item.name().to_string(), value);
        }

        self.logger.debug(&format!(
            "valid loaded configurations: {}/{}",
            valid.len(),
            loaded.len()
        ));

        if !missing.is_empty() {
            return Err(Error::MissingRequiredConfig { names: missing });
        }
        Ok(valid)
    }

    /// Prompt for every item with the default prompter and write the file.
    pub fn configure(&self) -> Result<ConfigureStatus> {
        let mut prompter = default_prompter();
        self.configure_with(prompter.as_mut())
    }

    /// Prompt for every item through `prompter` and write the file.
    ///
    /// Load errors abort before any prompt. A cancelled prompt returns
    /// [`ConfigureStatus::Interrupted`] and leaves the file untouched.
    pub fn configure_with(&self, prompter: &mut dyn Prompter) -> Result<ConfigureStatus> {
        let old_config = self.load(None)?;
        let mut new_config = Vec::with_capacity(self.config_items.len());

        for item in &self.config_items {
            let old_value = old_config
                .get(item.name())
                .unwrap_or_else(|| item.initial_value());
            let request = PromptRequest::for_item(item, old_value);

            let value = match self.ask(prompter, item, &request) {
                Ok(value) => value,
                Err(Error::Interrupted) => {
                    self.logger.debug("keyboard interrupt");
                    return Ok(ConfigureStatus::Interrupted);
                }
                Err(e) => return Err(e),
            };
            new_config.push((item.name().to_string(), value));
        }

        self.logger
            .debug(&format!("written {} configurations", self.config_items.len()));

        Ok(self.write_config(&new_config))
    }

    /// Required items are asked again until the answer is truthy.
    fn ask(
        &self,
        prompter: &mut dyn Prompter,
        item: &ConfigItem,
        request: &PromptRequest,
    ) -> Result<ConfigValue> {
        loop {
            let value = prompt_value(prompter, request)?;
            if !item.required() || value.is_truthy() {
                return Ok(value);
            }
        }
    }

    fn write_config(&self, entries: &[(String, ConfigValue)]) -> ConfigureStatus {
        if let Err(e) = write_config_file(&self.config_filepath, entries) {
            self.logger.error(&format!(
                "failed to write '{}': {e}",
                self.config_filepath.display()
            ));
            return ConfigureStatus::Filesystem(e);
        }

        self.logger.debug(&format!(
            "written configurations to '{}'",
            self.config_filepath.display()
        ));
        ConfigureStatus::Success
    }
}
