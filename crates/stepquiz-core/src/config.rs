//! TOML-based quiz configuration.
//!
//! Stores the static setup a session is built from:
//! - Countdown duration
//! - Draggable items (identity token + display label)
//! - Slots (expected step number + title)
//!
//! Configuration is stored at `~/.config/stepquiz/config.toml`.
//! Set STEPQUIZ_ENV=dev to use `~/.config/stepquiz-dev/` instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// A draggable item.
///
/// The identity token encodes which step the item represents; a `-alt`
/// suffix marks an alternate phrasing of the same step ("1" and "1-alt"
/// both belong in the slot expecting step 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub token: String,
    pub label: String,
}

/// A fixed drop target expecting one step of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSpec {
    pub step: u8,
    #[serde(default)]
    pub title: String,
}

/// Quiz configuration.
///
/// Serialized to/from TOML at `~/.config/stepquiz/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    pub items: Vec<ItemSpec>,
    pub slots: Vec<SlotSpec>,
}

fn default_duration_secs() -> u64 {
    300
}

impl Default for QuizConfig {
    /// The built-in sales-process quiz: five slots, the five process steps
    /// with alternate phrasings for steps 1-3, and one after-sales
    /// distractor that belongs in no slot.
    fn default() -> Self {
        let item = |token: &str, label: &str| ItemSpec {
            token: token.into(),
            label: label.into(),
        };
        Self {
            duration_secs: default_duration_secs(),
            items: vec![
                item("1", "Prospecting"),
                item("1-alt", "Researching leads"),
                item("2", "Scheduling a meeting"),
                item("2-alt", "Making contact"),
                item("3", "Presenting the offer"),
                item("3-alt", "Consulting on needs"),
                item("4", "Handling objections"),
                item("5", "Closing the deal"),
                item("6", "After-sales care"),
            ],
            slots: (1..=5)
                .map(|step| SlotSpec {
                    step,
                    title: format!("Step {step}"),
                })
                .collect(),
        }
    }
}

impl QuizConfig {
    /// Check the configuration shape a session can be built from.
    ///
    /// Slot expected-steps must form a permutation of 1..=N so that every
    /// process step has exactly one slot. Item tokens must be unique and
    /// non-empty; a token whose prefix matches no slot is allowed (that is
    /// what makes an item a distractor).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.slots.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        if self.items.is_empty() {
            return Err(ConfigError::NoItems);
        }

        let max = self.slots.len() as u8;
        let mut seen_steps = vec![false; self.slots.len()];
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.step == 0 || slot.step > max {
                return Err(ConfigError::SlotStepOutOfRange {
                    index,
                    step: slot.step,
                    max,
                });
            }
            let i = (slot.step - 1) as usize;
            if seen_steps[i] {
                return Err(ConfigError::DuplicateSlotStep { step: slot.step });
            }
            seen_steps[i] = true;
        }

        let mut seen_tokens = std::collections::HashSet::new();
        for (index, item) in self.items.iter().enumerate() {
            if item.token.is_empty() {
                return Err(ConfigError::EmptyItemToken { index });
            }
            if item.label.is_empty() {
                return Err(ConfigError::EmptyItemLabel {
                    token: item.token.clone(),
                });
            }
            if !seen_tokens.insert(item.token.as_str()) {
                return Err(ConfigError::DuplicateItemToken {
                    token: item.token.clone(),
                });
            }
        }
        Ok(())
    }

    /// Path to the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, materializing and saving the default quiz
    /// if no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Returns `~/.config/stepquiz[-dev]/` based on STEPQUIZ_ENV.
fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STEPQUIZ_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("stepquiz-dev")
    } else {
        base_dir.join("stepquiz")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
