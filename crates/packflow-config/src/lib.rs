//! PackFlow の設定管理
//!
//! 設定ファイル (YAML) の探索・読み込みと、環境変数からの認証情報の解決を行う。

pub mod error;
pub mod settings;

pub use error::*;
pub use settings::{Settings, credentials_from_env};

use std::path::PathBuf;

/// 設定ファイル探索の環境変数
pub const CONFIG_PATH_ENV: &str = "PACKFLOW_CONFIG_PATH";

/// 設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 PACKFLOW_CONFIG_PATH (直接パス指定、存在しなければエラー)
/// 2. カレントディレクトリ: packflow.yaml
/// 3. ./.packflow/config.yaml
/// 4. ~/.config/packflow/config.yaml (グローバル設定)
///
/// 設定ファイルは任意なので、どこにもなければ `None` を返す。
pub fn find_config_file() -> Result<Option<PathBuf>> {
    // 1. 環境変数で直接指定
    if let Some(config_path) = std::env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileNotFound(path));
    }

    let current_dir = std::env::current_dir()?;

    // 2. カレントディレクトリ
    let path = current_dir.join("packflow.yaml");
    if path.exists() {
        return Ok(Some(path));
    }

    // 3. ./.packflow/ ディレクトリ
    let path = current_dir.join(".packflow").join("config.yaml");
    if path.exists() {
        return Ok(Some(path));
    }

    // 4. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("packflow").join("config.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}
