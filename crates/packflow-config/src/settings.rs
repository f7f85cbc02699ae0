//! 設定ファイルと認証情報

use crate::error::{ConfigError, Result};
use packflow_cloud::Credentials;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";
pub const ACCOUNT_ID_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";

/// packflow.yaml の内容
///
/// すべて任意項目。未指定ならデプロイ側の既定値を使う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// カスタムドメインがない場合のホスト名の親ドメイン
    #[serde(default)]
    pub platform_domain: Option<String>,

    /// コントロールプレーン呼び出し1回あたりのタイムアウト (秒)
    #[serde(default)]
    pub call_timeout_secs: Option<u64>,

    /// API のベース URL (プロキシやテスト用)
    #[serde(default)]
    pub api_base: Option<String>,

    /// 優先するアカウント ID
    #[serde(default)]
    pub account_id: Option<String>,
}

impl Settings {
    /// 設定ファイルを探して読み込む。見つからなければ既定値
    pub fn load() -> Result<Self> {
        match crate::find_config_file()? {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("設定ファイルなし、既定値を使用");
                Ok(Self::default())
            }
        }
    }

    /// 指定したファイルから読み込む
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("設定ファイルを読み込み: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// YAML 文字列から読み込む
    pub fn parse(content: &str) -> Result<Self> {
        // 空ファイルは既定値として扱う
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: Default::default(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.call_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "call_timeout_secs は 1 以上を指定してください".to_string(),
            ));
        }
        if let Some(domain) = &self.platform_domain {
            if domain.is_empty() || domain.starts_with('.') || domain.contains('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "platform_domain が不正です: {}",
                    domain
                )));
            }
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }
}

/// 環境変数から認証情報を組み立てる
///
/// - `CLOUDFLARE_API_TOKEN` (必須)
/// - `CLOUDFLARE_ACCOUNT_ID` (任意、設定ファイルの account_id より優先)
pub fn credentials_from_env(settings: &Settings) -> Result<Credentials> {
    let token = std::env::var(API_TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingEnvVar(API_TOKEN_ENV))?;

    let account_id = std::env::var(ACCOUNT_ID_ENV)
        .ok()
        .filter(|a| !a.trim().is_empty())
        .or_else(|| settings.account_id.clone());

    let credentials = Credentials::new(token);
    Ok(match account_id {
        Some(id) => credentials.with_account(id),
        None => credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::parse(
            r#"
platform_domain: apps.example.net
call_timeout_secs: 45
account_id: acc-from-file
"#,
        )
        .unwrap();

        assert_eq!(settings.platform_domain.as_deref(), Some("apps.example.net"));
        assert_eq!(settings.call_timeout(), Some(Duration::from_secs(45)));
        assert_eq!(settings.account_id.as_deref(), Some("acc-from-file"));
        assert!(settings.api_base.is_none());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::parse("\n").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Settings::parse("platform_domian: typo.example\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Settings::parse("call_timeout_secs: 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_load_from_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("packflow.yaml");
        fs::write(&path, "call_timeout_secs: [1, 2]\n").unwrap();

        match Settings::load_from(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_load_from_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        fs::write(
            temp_dir.path().join("packflow.yaml"),
            "platform_domain: local.example\n",
        )
        .unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_var_unset(crate::CONFIG_PATH_ENV, Settings::load);

        std::env::set_current_dir(original_dir).unwrap();
        assert_eq!(
            result.unwrap().platform_domain.as_deref(),
            Some("local.example")
        );
    }

    #[test]
    #[serial]
    fn test_credentials_require_token() {
        let result = temp_env::with_vars_unset([API_TOKEN_ENV, ACCOUNT_ID_ENV], || {
            credentials_from_env(&Settings::default())
        });
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(API_TOKEN_ENV))
        ));
    }

    #[test]
    #[serial]
    fn test_env_account_overrides_file() {
        let settings = Settings {
            account_id: Some("acc-from-file".to_string()),
            ..Default::default()
        };

        let credentials = temp_env::with_vars(
            [
                (API_TOKEN_ENV, Some("token-123")),
                (ACCOUNT_ID_ENV, Some("acc-from-env")),
            ],
            || credentials_from_env(&settings),
        )
        .unwrap();
        assert_eq!(credentials.api_token, "token-123");
        assert_eq!(credentials.account_id.as_deref(), Some("acc-from-env"));

        let credentials = temp_env::with_vars(
            [(API_TOKEN_ENV, Some("token-123")), (ACCOUNT_ID_ENV, None)],
            || credentials_from_env(&settings),
        )
        .unwrap();
        assert_eq!(credentials.account_id.as_deref(), Some("acc-from-file"));
    }
}
