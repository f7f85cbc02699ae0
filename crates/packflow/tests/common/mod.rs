use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const VALID_MANIFEST: &str = r#"{
    "name": "Coffee Shop",
    "slug": "coffee-shop",
    "version": "1.0.0",
    "description": "Online ordering for a small cafe",
    "price": 4900,
    "tier": "starter",
    "resources": {
        "computeFunctions": [
            { "name": "api", "code": "export default { fetch() { return new Response('ok') } }" }
        ],
        "databases": [
            { "name": "orders-db", "schema": "CREATE TABLE orders (id INTEGER PRIMARY KEY);" }
        ],
        "objectBuckets": [
            { "name": "menu-images", "cors": true }
        ]
    }
}"#;

/// price と tier が欠けていて、関数のコードも空
pub const BROKEN_MANIFEST: &str = r#"{
    "name": "Coffee Shop",
    "slug": "coffee-shop",
    "version": "1.0.0",
    "description": "Online ordering for a small cafe",
    "resources": {
        "computeFunctions": [
            { "name": "api", "code": "" }
        ]
    }
}"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_manifest(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[allow(dead_code)]
    pub fn write_settings(&self, content: &str) {
        fs::write(self.root.path().join("packflow.yaml"), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクトディレクトリで `pack` を実行するコマンド
    ///
    /// 手元の環境変数が結果に影響しないよう、関連するものは外しておく。
    pub fn pack(&self) -> Command {
        let mut cmd = Command::cargo_bin("pack").unwrap();
        cmd.current_dir(self.path())
            .env_remove("PACKFLOW_CONFIG_PATH")
            .env_remove("PACKFLOW_CALL_TIMEOUT")
            .env_remove("PACKFLOW_PLATFORM_DOMAIN")
            .env_remove("CLOUDFLARE_API_TOKEN")
            .env_remove("CLOUDFLARE_ACCOUNT_ID")
            .env_remove("RUST_LOG");
        cmd
    }
}
