pub const APP_DIR: &str = ".promptflow";
pub const CONFIG_FILE: &str = "config";
pub const DEFAULT_STORE_FILE: &str = "prompts.json";
pub const DEFAULT_LOG_FILE: &str = "promptflow.log";
pub const DEFAULT_LIST_HEIGHT: usize = 8;
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;
