use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::domain::tts::{service::DEFAULT_MAX_TEXT_CHARS, LanguageTable};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Synthesis service
    pub google_tts_base_url: String,
    pub synthesis_timeout_secs: u64,
    // Delivery
    pub audio_dir: PathBuf,
    // Selection resolver
    pub language_table: LanguageTableKind,
    pub language_table_path: Option<PathBuf>,
    pub max_text_chars: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Built-in option tables
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTableKind {
    Standard,
    Extended,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let environment = match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            // JSON by default in production
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                Ok("pretty") => LogFormat::Pretty,
                _ if environment == Environment::Production => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            environment,
            google_tts_base_url: env::var("GOOGLE_TTS_BASE_URL")
                .unwrap_or_else(|_| "https://translate.google.com".to_string()),
            synthesis_timeout_secs: env::var("SYNTHESIS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            audio_dir: env::var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("ttsconvert")),
            language_table: match env::var("LANGUAGE_TABLE").as_deref() {
                Ok("extended") => LanguageTableKind::Extended,
                Ok("standard") | Err(_) => LanguageTableKind::Standard,
                Ok(other) => return Err(format!("unknown LANGUAGE_TABLE '{}'", other).into()),
            },
            language_table_path: env::var("LANGUAGE_TABLE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_text_chars: env::var("MAX_TEXT_CHARS")
                .map(|v| v.parse::<usize>())
                .unwrap_or(Ok(DEFAULT_MAX_TEXT_CHARS))?,
        };

        if config.synthesis_timeout_secs == 0 {
            return Err("SYNTHESIS_TIMEOUT_SECS must be greater than zero".into());
        }

        Ok(config)
    }

    /// The lookup table the selection resolver should use
    pub fn load_language_table(&self) -> Result<LanguageTable, Box<dyn std::error::Error>> {
        let table = match &self.language_table_path {
            Some(path) => LanguageTable::from_json_file(path)?,
            None => match self.language_table {
                LanguageTableKind::Standard => LanguageTable::standard(),
                LanguageTableKind::Extended => LanguageTable::extended(),
            },
        };
        Ok(table)
    }
}
