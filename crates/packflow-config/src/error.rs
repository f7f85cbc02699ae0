use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PACKFLOW_CONFIG_PATH で指定された設定ファイルが存在しません: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("設定ファイルの解析に失敗しました ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("設定値が不正です: {0}")]
    InvalidValue(String),

    #[error("環境変数 {0} が設定されていません")]
    MissingEnvVar(&'static str),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
