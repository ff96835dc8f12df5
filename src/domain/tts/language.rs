use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language code understood by the synthesis service (e.g. `en-gb`, `fr`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the user picked in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSelection {
    pub display_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl LanguageSelection {
    pub fn new(display_language: impl Into<String>, accent: Option<&str>) -> Self {
        Self {
            display_language: display_language.into(),
            accent: accent.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language selection: {language}{}", accent_suffix(.accent))]
pub struct UnsupportedSelection {
    pub language: String,
    pub accent: Option<String>,
}

fn accent_suffix(accent: &Option<String>) -> String {
    accent
        .as_deref()
        .map(|a| format!(" / {}", a))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentOption {
    pub label: String,
    pub code: String,
    /// Extra labels accepted for this accent, never shown in the form
    #[serde(default, skip_serializing)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub label: String,
    pub code: String,
    /// When non-empty, an accent must be picked and its code wins
    #[serde(default)]
    pub accents: Vec<AccentOption>,
}

#[derive(Debug, thiserror::Error)]
pub enum LanguageTableError {
    #[error("could not read language table: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse language table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid language table: {0}")]
    Invalid(String),
}

/// Ordered lookup table from form labels to service codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTable {
    pub languages: Vec<LanguageOption>,
}

fn accent(label: &str, code: &str, aliases: &[&str]) -> AccentOption {
    AccentOption {
        label: label.to_string(),
        code: code.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
    }
}

fn language(label: &str, code: &str) -> LanguageOption {
    LanguageOption {
        label: label.to_string(),
        code: code.to_string(),
        accents: Vec::new(),
    }
}

impl LanguageTable {
    /// English with five accents plus five European languages
    pub fn standard() -> Self {
        Self {
            languages: vec![
                LanguageOption {
                    label: "English".to_string(),
                    code: "en".to_string(),
                    accents: vec![
                        accent("British (UK)", "en-gb", &["British"]),
                        accent("American (US)", "en-us", &["American"]),
                        accent("Australian", "en-au", &[]),
                        accent("Indian", "en-in", &[]),
                        accent("Irish", "en-ie", &[]),
                    ],
                },
                language("French", "fr"),
                language("German", "de"),
                language("Spanish", "es"),
                language("Italian", "it"),
                language("Portuguese", "pt"),
            ],
        }
    }

    /// The standard table with more English accents and a few more languages
    pub fn extended() -> Self {
        let mut table = Self::standard();
        if let Some(english) = table.languages.iter_mut().find(|l| l.code == "en") {
            english.accents.extend([
                accent("Canadian", "en-ca", &[]),
                accent("South African", "en-za", &[]),
                accent("New Zealand", "en-nz", &[]),
            ]);
        }
        table.languages.extend([
            language("Dutch", "nl"),
            language("Japanese", "ja"),
            language("Hindi", "hi"),
        ]);
        table
    }

    pub fn from_json_file(path: &Path) -> Result<Self, LanguageTableError> {
        let raw = std::fs::read_to_string(path)?;
        let table: LanguageTable = serde_json::from_str(&raw)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), LanguageTableError> {
        if self.languages.is_empty() {
            return Err(LanguageTableError::Invalid("no languages".to_string()));
        }

        let mut seen = Vec::new();
        for language in &self.languages {
            let key = normalize(&language.label);
            if key.is_empty() || language.code.trim().is_empty() {
                return Err(LanguageTableError::Invalid(format!(
                    "language '{}' needs a label and a code",
                    language.label
                )));
            }
            if seen.contains(&key) {
                return Err(LanguageTableError::Invalid(format!(
                    "duplicate language '{}'",
                    language.label
                )));
            }
            seen.push(key);

            let mut accent_keys = Vec::new();
            for accent in &language.accents {
                if accent.code.trim().is_empty() {
                    return Err(LanguageTableError::Invalid(format!(
                        "accent '{}' of '{}' has no code",
                        accent.label, language.label
                    )));
                }
                for name in std::iter::once(&accent.label).chain(accent.aliases.iter()) {
                    let key = normalize(name);
                    if key.is_empty() || accent_keys.contains(&key) {
                        return Err(LanguageTableError::Invalid(format!(
                            "accent '{}' of '{}' is empty or duplicated",
                            name, language.label
                        )));
                    }
                    accent_keys.push(key);
                }
            }
        }

        Ok(())
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Maps a [`LanguageSelection`] to the service's [`LanguageCode`].
///
/// Resolution is a pure table lookup and fails closed: an unknown language,
/// a missing or unknown accent for a language that has accents, or an accent
/// given for a language that has none all produce [`UnsupportedSelection`].
#[derive(Debug, Clone)]
pub struct SelectionResolver {
    table: LanguageTable,
}

impl SelectionResolver {
    pub fn new(table: LanguageTable) -> Self {
        Self { table }
    }

    pub fn options(&self) -> &[LanguageOption] {
        &self.table.languages
    }

    pub fn resolve(
        &self,
        selection: &LanguageSelection,
    ) -> Result<LanguageCode, UnsupportedSelection> {
        let unsupported = || UnsupportedSelection {
            language: selection.display_language.clone(),
            accent: selection.accent.clone(),
        };

        let wanted = normalize(&selection.display_language);
        let language = self
            .table
            .languages
            .iter()
            .find(|l| normalize(&l.label) == wanted)
            .ok_or_else(unsupported)?;

        let accent = selection
            .accent
            .as_deref()
            .map(normalize)
            .filter(|a| !a.is_empty());

        match (language.accents.is_empty(), accent) {
            (true, None) => Ok(LanguageCode(language.code.clone())),
            (false, Some(wanted)) => language
                .accents
                .iter()
                .find(|a| {
                    normalize(&a.label) == wanted || a.aliases.iter().any(|x| normalize(x) == wanted)
                })
                .map(|a| LanguageCode(a.code.clone()))
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }
}

impl Default for SelectionResolver {
    fn default() -> Self {
        Self::new(LanguageTable::standard())
    }
}
