//! Risk categories and the verdict text.

use serde::{Deserialize, Serialize};

use super::strings::StringTable;
use crate::error::{MoodmindError, Result};

/// Categorical outcome of a screening session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    NotDepressed,
    SuspectedDepression,
    AtRiskOfDepression,
}

impl RiskCategory {
    /// String-table key of the category label.
    pub fn label_key(self) -> &'static str {
        match self {
            RiskCategory::NotDepressed => "risk_not_depression",
            RiskCategory::SuspectedDepression => "risk_suspect_depression",
            RiskCategory::AtRiskOfDepression => "risk_depression",
        }
    }
}

/// Score boundaries between the verdict categories.
///
/// Scores below `suspected_from` are "not depressed", scores from
/// `at_risk_from` upward are "at risk", everything in between is "suspected".
/// These values follow PHQ conventions and need confirmation by the clinical
/// owners before release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub suspected_from: u32,
    pub at_risk_from: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            suspected_from: 2,
            at_risk_from: 5,
        }
    }
}

impl RiskThresholds {
    /// Checks `1 <= suspected_from <= at_risk_from`.
    pub fn validate(&self) -> Result<()> {
        if self.suspected_from == 0 || self.suspected_from > self.at_risk_from {
            return Err(MoodmindError::config(format!(
                "Invalid screening thresholds: suspected_from={} at_risk_from={}",
                self.suspected_from, self.at_risk_from
            )));
        }
        Ok(())
    }

    pub fn classify(&self, score: u32) -> RiskCategory {
        if score >= self.at_risk_from {
            RiskCategory::AtRiskOfDepression
        } else if score >= self.suspected_from {
            RiskCategory::SuspectedDepression
        } else {
            RiskCategory::NotDepressed
        }
    }
}

/// Localized pieces of the verdict, resolved once per script.
#[derive(Debug, Clone)]
pub struct VerdictCopy {
    prefix: &'static str,
    not_depressed: &'static str,
    suspected: &'static str,
    at_risk: &'static str,
    advisory: &'static str,
}

impl VerdictCopy {
    /// Looks up every verdict string in `strings`.
    pub fn from_strings(strings: &StringTable) -> Result<Self> {
        Ok(Self {
            prefix: strings.get("result_depression")?,
            not_depressed: strings.get(RiskCategory::NotDepressed.label_key())?,
            suspected: strings.get(RiskCategory::SuspectedDepression.label_key())?,
            at_risk: strings.get(RiskCategory::AtRiskOfDepression.label_key())?,
            advisory: strings.get("result_depression_description")?,
        })
    }

    pub fn label(&self, category: RiskCategory) -> &'static str {
        match category {
            RiskCategory::NotDepressed => self.not_depressed,
            RiskCategory::SuspectedDepression => self.suspected,
            RiskCategory::AtRiskOfDepression => self.at_risk,
        }
    }

    /// Renders "<prefix><label>. <advisory>".
    pub fn render(&self, category: RiskCategory) -> String {
        format!("{}{}. {}", self.prefix, self.label(category), self.advisory)
    }
}
