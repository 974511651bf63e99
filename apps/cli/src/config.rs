use std::{collections::HashMap, fs, path::Path};

use client_core::{
    query::{DEFAULT_BASE_URL, DEFAULT_PAGE_PARAM, DEFAULT_SEARCH_PARAM},
    DEFAULT_HISTORY_CAPACITY, DEFAULT_SEARCH_TERM,
};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub search_param: String,
    pub page_param: String,
    pub database_url: String,
    pub storage_scope: String,
    pub default_term: String,
    pub request_timeout_secs: u64,
    pub history_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.into(),
            search_param: DEFAULT_SEARCH_PARAM.into(),
            page_param: DEFAULT_PAGE_PARAM.into(),
            database_url: "sqlite://./data/hn_search.db".into(),
            storage_scope: "hn_search".into(),
            default_term: DEFAULT_SEARCH_TERM.into(),
            request_timeout_secs: 10,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Defaults, then the flat `key = "value"` table in `path` if it exists, then
/// `HN_SEARCH_*` and `APP__*` environment variables (the latter win).
pub fn load_settings(path: &Path) -> Settings {
    let file_cfg = fs::read_to_string(path)
        .ok()
        .and_then(|raw| match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(table) => Some(table),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable config file");
                None
            }
        })
        .unwrap_or_default();

    load_settings_from(&file_cfg, |name| std::env::var(name).ok())
}

fn load_settings_from(
    file_cfg: &HashMap<String, String>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    let lookup = |key: &str| -> Option<String> {
        let upper = key.to_ascii_uppercase();
        env(&format!("APP__{upper}"))
            .or_else(|| env(&format!("HN_SEARCH_{upper}")))
            .or_else(|| file_cfg.get(key).cloned())
    };

    if let Some(v) = lookup("api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("search_param") {
        settings.search_param = v;
    }
    if let Some(v) = lookup("page_param") {
        settings.page_param = v;
    }
    if let Some(v) = lookup("database_url") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("storage_scope") {
        settings.storage_scope = v;
    }
    if let Some(v) = lookup("default_term") {
        settings.default_term = v;
    }
    if let Some(v) = lookup("request_timeout_secs") {
        match v.parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.request_timeout_secs = parsed,
            _ => warn!(value = %v, "ignoring invalid request_timeout_secs"),
        }
    }
    if let Some(v) = lookup("history_capacity") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.history_capacity = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid history_capacity"),
        }
    }

    settings
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_target_algolia() {
        let settings = load_settings_from(&HashMap::new(), no_env);
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.api_base_url,
            "https://hn.algolia.com/api/v1/search?"
        );
        assert_eq!(settings.default_term, "React");
    }

    #[test]
    fn file_values_override_defaults() {
        let file_cfg = HashMap::from([
            ("default_term".to_string(), "rust".to_string()),
            ("history_capacity".to_string(), "12".to_string()),
        ]);
        let settings = load_settings_from(&file_cfg, no_env);
        assert_eq!(settings.default_term, "rust");
        assert_eq!(settings.history_capacity, 12);
    }

    #[test]
    fn app_prefixed_env_wins_over_file_and_legacy_prefix() {
        let file_cfg = HashMap::from([("storage_scope".to_string(), "from_file".to_string())]);
        let env = |name: &str| match name {
            "APP__STORAGE_SCOPE" => Some("from_app".to_string()),
            "HN_SEARCH_STORAGE_SCOPE" => Some("from_hn".to_string()),
            "HN_SEARCH_DATABASE_URL" => Some("sqlite::memory:".to_string()),
            _ => None,
        };
        let settings = load_settings_from(&file_cfg, env);
        assert_eq!(settings.storage_scope, "from_app");
        assert_eq!(settings.database_url, "sqlite::memory:");
    }

    #[test]
    fn invalid_numbers_keep_defaults() {
        let env = |name: &str| match name {
            "APP__REQUEST_TIMEOUT_SECS" => Some("0".to_string()),
            "APP__HISTORY_CAPACITY" => Some("lots".to_string()),
            _ => None,
        };
        let settings = load_settings_from(&HashMap::new(), env);
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn reads_flat_toml_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("hn_search_config_test_{suffix}.toml"));
        fs::write(&path, "page_param = \"p\"\nsearch_param = \"q\"\n").expect("write");

        let settings = load_settings(&path);
        assert_eq!(settings.page_param, "p");
        assert_eq!(settings.search_param, "q");

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn normalizes_plain_file_path_to_sqlite_url() {
        assert_eq!(
            normalize_database_url("./data/test.db"),
            "sqlite://./data/test.db"
        );
        assert_eq!(
            normalize_database_url("C:\\Users\\alice\\hn.db"),
            "sqlite://C:/Users/alice/hn.db"
        );
        assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_database_url("  "),
            Settings::default().database_url
        );
    }
}
