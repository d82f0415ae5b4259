use std::path::PathBuf;

pub const DEFAULT_ADMIN_LOGIN: &str = "22";
pub const DEFAULT_ADMIN_PASSWORD: &str = "1qaz2wsx";
pub const DEFAULT_LOG_FILTER: &str = "schoold=info";

/// The single built-in administrator account. Compared in plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredential {
    pub login: String,
    pub password: String,
}

impl Default for AdminCredential {
    fn default() -> Self {
        Self {
            login: DEFAULT_ADMIN_LOGIN.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: Option<PathBuf>,
    pub admin: AdminCredential,
    pub log_filter: String,
}

impl Config {
    /// Reads `SCHOOLD_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AdminCredential::default();
        Self {
            workspace: non_empty("SCHOOLD_WORKSPACE").map(PathBuf::from),
            admin: AdminCredential {
                login: non_empty("SCHOOLD_ADMIN_LOGIN").unwrap_or(defaults.login),
                password: non_empty("SCHOOLD_ADMIN_PASSWORD").unwrap_or(defaults.password),
            },
            log_filter: non_empty("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
