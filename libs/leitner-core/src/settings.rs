//! Study settings.

use crate::error::{Error, Result};
use crate::hint::NO_HINT_AVAILABLE;
use crate::scheduler::{ModifiedLeitner, MAX_RETIRED_BUCKET};
use crate::types::RETIRED_BUCKET;
use serde::{Deserialize, Serialize};

/// Settings shared by the scheduler and practice sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudySettings {
    /// Highest bucket; cards here are not promoted further.
    pub retired_bucket: usize,
    /// Hour of day (0-23) when a new study day begins.
    pub daily_reset_hour: u32,
    /// Maximum cards presented in one session. `None` means the full due set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards_per_session: Option<usize>,
    pub missing_hint_text: String,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            retired_bucket: RETIRED_BUCKET,
            daily_reset_hour: 0,
            cards_per_session: None,
            missing_hint_text: NO_HINT_AVAILABLE.to_string(),
        }
    }
}

impl StudySettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.daily_reset_hour > 23 {
            return Err(Error::InvalidSettings(format!(
                "daily_reset_hour must be 0-23, got {}",
                self.daily_reset_hour
            )));
        }
        if self.retired_bucket > MAX_RETIRED_BUCKET {
            return Err(Error::InvalidSettings(format!(
                "retired_bucket must be at most {}, got {}",
                MAX_RETIRED_BUCKET, self.retired_bucket
            )));
        }
        if self.cards_per_session == Some(0) {
            return Err(Error::InvalidSettings(
                "cards_per_session must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Scheduler configured with these settings.
    pub fn scheduler(&self) -> Result<ModifiedLeitner> {
        ModifiedLeitner::new(self.retired_bucket)
    }
}
