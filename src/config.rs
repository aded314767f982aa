use anyhow::bail;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8787;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    Sqlite { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let storage = match lookup("ROOM_STORAGE")
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .as_deref()
        {
            None | Some("sqlite") => StorageConfig::Sqlite {
                database_url: lookup("DATABASE_URL")
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(default_database_url),
            },
            Some("memory") => StorageConfig::Memory,
            Some(other) => bail!("ROOM_STORAGE must be `sqlite` or `memory`, got `{other}`"),
        };

        Ok(Self { port, storage })
    }
}

fn default_database_url() -> String {
    let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let default_path = base.join("data").join("rooms.db");
    format!("sqlite://{}", default_path.display())
}
