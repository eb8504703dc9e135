use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://database.db?mode=rwc".to_string());

        Ok(Self { addr: format!("{host}:{port}").parse().context("HOST/PORT")?, database_url })
    }
}

/// File backing a sqlite URL, or `None` when the database lives in memory.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_drops_scheme_and_query() {
        assert_eq!(
            sqlite_file_path("sqlite://database.db?mode=rwc"),
            Some(PathBuf::from("database.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:///var/lib/movies.db"),
            Some(PathBuf::from("/var/lib/movies.db"))
        );
        assert_eq!(sqlite_file_path("sqlite:data/movies.db"), Some(PathBuf::from("data/movies.db")));
    }

    #[test]
    fn in_memory_and_foreign_urls_have_no_file() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/movies"), None);
    }
}
