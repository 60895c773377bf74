//! Runtime configuration: command line flags over `POKEDEX_*` environment
//! variables over built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiConfig, DEFAULT_API_BASE};

const APP_DIR: &str = "pokedex-team";

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// PokeAPI base url [env: POKEDEX_API_BASE]
    #[arg(long)]
    pub api_base: Option<String>,

    /// Records per page [env: POKEDEX_PAGE_SIZE]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Last reachable page; unbounded when unset [env: POKEDEX_MAX_PAGE]
    #[arg(long)]
    pub max_page: Option<u32>,

    /// Preload ids 1..=N into the catalog at startup, 0 disables [env: POKEDEX_PRELOAD]
    #[arg(long)]
    pub preload: Option<u32>,

    /// Moves resolved per record [env: POKEDEX_MOVES]
    #[arg(long)]
    pub moves: Option<usize>,

    /// Request timeout in milliseconds [env: POKEDEX_TIMEOUT_MS]
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Directory holding the saved teams [env: POKEDEX_DATA_DIR]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding cached API responses [env: POKEDEX_CACHE_DIR]
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Disable the response cache
    #[arg(long)]
    pub no_cache: bool,

    /// Log file; the terminal is owned by the UI [env: POKEDEX_LOG_FILE]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write JSON log lines [env: POKEDEX_LOG_JSON]
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub max_page: Option<u32>,
    pub preload: u32,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_args(args: ConfigArgs) -> Self {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    /// Resolves every setting from `args`, then `env`, then the default.
    pub fn resolve(args: ConfigArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let env_path = |name: &str| {
            env(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        let data_dir = args
            .data_dir
            .or_else(|| env_path("POKEDEX_DATA_DIR"))
            .unwrap_or_else(default_data_dir);
        let cache_dir = if args.no_cache || env_bool(env("POKEDEX_NO_CACHE"), false) {
            None
        } else {
            Some(
                args.cache_dir
                    .or_else(|| env_path("POKEDEX_CACHE_DIR"))
                    .unwrap_or_else(default_cache_dir),
            )
        };
        let log_file = args
            .log_file
            .or_else(|| env_path("POKEDEX_LOG_FILE"))
            .unwrap_or_else(|| data_dir.join(format!("{APP_DIR}.log")));

        let defaults = ApiConfig::default();
        let api = ApiConfig {
            base_url: args
                .api_base
                .or_else(|| env("POKEDEX_API_BASE").filter(|value| !value.is_empty()))
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            page_size: args
                .page_size
                .or_else(|| env_parse(&env, "POKEDEX_PAGE_SIZE"))
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            moves_per_record: args
                .moves
                .or_else(|| env_parse(&env, "POKEDEX_MOVES"))
                .unwrap_or(defaults.moves_per_record),
            timeout: args
                .timeout_ms
                .or_else(|| env_parse(&env, "POKEDEX_TIMEOUT_MS"))
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            cache_dir,
        };

        Self {
            api,
            max_page: args
                .max_page
                .or_else(|| env_parse(&env, "POKEDEX_MAX_PAGE"))
                .filter(|page| *page > 0),
            preload: args
                .preload
                .or_else(|| env_parse(&env, "POKEDEX_PRELOAD"))
                .unwrap_or(0),
            data_dir,
            log_file,
            log_json: args.log_json || env_bool(env("POKEDEX_LOG_JSON"), false),
        }
    }
}

fn env_parse<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    env(name).and_then(|value| value.trim().parse().ok())
}

fn env_bool(value: Option<String>, default: bool) -> bool {
    value
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_cache_dir() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_args_or_env() {
        let config = AppConfig::resolve(ConfigArgs::default(), env_from(&[]));
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.api.page_size, 30);
        assert_eq!(config.api.moves_per_record, 4);
        assert_eq!(config.max_page, None);
        assert_eq!(config.preload, 0);
        assert!(config.api.cache_dir.is_some());
        assert!(config.log_file.starts_with(&config.data_dir));
        assert!(!config.log_json);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = AppConfig::resolve(
            ConfigArgs::default(),
            env_from(&[
                ("POKEDEX_PAGE_SIZE", "20"),
                ("POKEDEX_MAX_PAGE", "46"),
                ("POKEDEX_TIMEOUT_MS", "1500"),
                ("POKEDEX_DATA_DIR", "/tmp/dex"),
                ("POKEDEX_NO_CACHE", "yes"),
                ("POKEDEX_LOG_JSON", "1"),
            ]),
        );
        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.max_page, Some(46));
        assert_eq!(config.api.timeout, Duration::from_millis(1500));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dex"));
        assert_eq!(config.api.cache_dir, None);
        assert!(config.log_json);
    }

    #[test]
    fn args_win_over_env_and_bad_env_is_ignored() {
        let args = ConfigArgs {
            page_size: Some(10),
            ..ConfigArgs::default()
        };
        let config = AppConfig::resolve(
            args,
            env_from(&[("POKEDEX_PAGE_SIZE", "50"), ("POKEDEX_PRELOAD", "lots")]),
        );
        assert_eq!(config.api.page_size, 10);
        assert_eq!(config.preload, 0);
    }
}
