use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".shop_ledger";
const RECORDS_FILE: &str = "records.json";
const CONFIG_FILE: &str = "config.json";
const EXPORT_DIR: &str = "exports";

/// Application data directory: `SHOP_LEDGER_HOME`, else `~/.shop_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SHOP_LEDGER_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn records_file_in(base: &Path) -> PathBuf {
    base.join(RECORDS_FILE)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn export_dir_in(base: &Path) -> PathBuf {
    base.join(EXPORT_DIR)
}
