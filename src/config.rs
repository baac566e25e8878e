use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl Config {
    /// `APP_DATA_DIR` (default `data`) and `PORT` (default 8080).
    pub fn from_env() -> Self {
        Self::from_values(env::var("APP_DATA_DIR").ok(), env::var("PORT").ok())
    }

    fn from_values(data_dir: Option<String>, port: Option<String>) -> Self {
        Self {
            data_dir: data_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            port: port
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
