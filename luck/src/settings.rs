use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::SettingsError,
    handler::{LuckHandler, DRAW_RANGE_END, DRAW_RANGE_START, REFERENCE},
    presentation::Template,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    pub start: u32,
    pub end: u32,
}

impl Default for DrawRange {
    fn default() -> Self {
        Self {
            start: DRAW_RANGE_START,
            end: DRAW_RANGE_END,
        }
    }
}

/// Optional settings file. Missing fields fall back to the built-in handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LuckSettings {
    pub draw_range: DrawRange,
    pub reference: u32,
    pub template: Template,
    pub seed: Option<u64>,
}

impl Default for LuckSettings {
    fn default() -> Self {
        Self {
            draw_range: DrawRange::default(),
            reference: REFERENCE,
            template: Template::default(),
            seed: None,
        }
    }
}

impl LuckSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let f = File::open(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_reader(f)?;
        settings.handler()?;
        Ok(settings)
    }

    pub fn handler(&self) -> Result<LuckHandler, SettingsError> {
        LuckHandler::new(self.draw_range.start..=self.draw_range.end, self.reference)
    }
}
