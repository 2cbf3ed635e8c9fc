//! Compiled-in constants of the BPstat pipelines, gathered into one value that is
//! handed to every stage instead of living in process-wide statics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The base address for all BPstat API calls.
pub const BPSTAT_API_URL: &str = "https://bpstat.bportugal.pt/data/v1";

/// Response language. The API only serves these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    /// Value of the `lang` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Pt => "PT",
        }
    }

    /// num-format locale tag for axis tick labels.
    pub fn locale_tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    pub fn notes_title(&self) -> &'static str {
        match self {
            Language::En => "Counterfeit banknotes withdrawn from circulation in Portugal",
            Language::Pt => "Notas falsas retiradas de circulação em Portugal",
        }
    }

    pub fn notes_total_title(&self) -> &'static str {
        match self {
            Language::En => "Counterfeit banknotes withdrawn from circulation in Portugal (M€)",
            Language::Pt => "Notas falsas retiradas de circulação em Portugal (M€)",
        }
    }

    pub fn millions_of_euros(&self) -> &'static str {
        match self {
            Language::En => "Millions of euros",
            Language::Pt => "Milhões de euros",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Language::En),
            "PT" => Ok(Language::Pt),
            other => Err(format!("unsupported language '{other}', expected EN or PT")),
        }
    }
}

/// Stable dimension ids used as column keys. They are strings, not integers:
/// not every BPstat dimension id is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionIds {
    pub unit: String,
    pub recurrence: String,
    pub face_value: String,
    pub reference_territory: String,
}

impl Default for DimensionIds {
    fn default() -> Self {
        Self {
            unit: "70".into(),
            recurrence: "40".into(),
            face_value: "71".into(),
            reference_territory: "63".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub language: Language,
    /// Total request timeout for each API call.
    pub timeout: Duration,
    pub dimensions: DimensionIds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BPSTAT_API_URL.into(),
            language: Language::default(),
            timeout: Duration::from_secs(30),
            dimensions: DimensionIds::default(),
        }
    }
}

impl Config {
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!(" PT ".parse::<Language>(), Ok(Language::Pt));
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn default_dimension_ids_are_strings() {
        let ids = DimensionIds::default();
        assert_eq!(ids.unit, "70");
        assert_eq!(ids.recurrence, "40");
        assert_eq!(ids.face_value, "71");
        assert_eq!(ids.reference_territory, "63");
    }
}
