use serde::Deserialize;

use crate::sender::{ConsoleSender, Sender, SmtpSender};

const DEFAULT_HISTORY_FILE: &str = "./history.txt";
const DEFAULT_BLACKLIST_FILE: &str = "./blacklist.txt";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Deserialize)]
pub struct SmtpConfig {
    pub from: String,
    pub to: String,
    pub host: String,
    pub password: String,
    pub subject: String,
    pub username: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct AppConfig {
    pub history_file: Option<String>,
    pub blacklist_file: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Read the config from a JSON file. A missing file is not an error:
    /// the tool runs fine with defaults and a console sender.
    pub fn from_file(file_name: &String) -> Result<Self, Box<dyn std::error::Error>> {
        if !std::path::Path::new(file_name).exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(file_name)?;
        let config: AppConfig = serde_json::from_str(&contents)?;

        Ok(config)
    }

    #[allow(dead_code)]
    pub fn from_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: AppConfig = serde_json::from_str(contents)?;

        Ok(config)
    }

    pub fn get_sender(&self) -> Sender {
        if let Some(config) = &self.smtp {
            Sender::Smtp(SmtpSender::new(config))
        } else {
            Sender::Console(ConsoleSender {})
        }
    }

    pub fn get_history_file(&self) -> String {
        self.history_file
            .clone()
            .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string())
    }

    pub fn get_blacklist_file(&self) -> String {
        self.blacklist_file
            .clone()
            .unwrap_or_else(|| DEFAULT_BLACKLIST_FILE.to_string())
    }

    pub fn get_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
