mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pack")]
#[command(about = "パッケージを、あなたのクラウドへ。", long_about = None)]
struct Cli {
    /// 詳細ログを出力 (RUST_LOG が優先)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// マニフェストを検証
    Validate {
        /// マニフェストファイル (.json / .yaml / .yml)
        #[arg(default_value = "manifest.json")]
        manifest: PathBuf,
    },
    /// 正規化したマニフェストを JSON で出力
    Export {
        /// マニフェストファイル (.json / .yaml / .yml)
        #[arg(default_value = "manifest.json")]
        manifest: PathBuf,
        /// 出力先 (省略時は標準出力)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// マニフェストを自分のアカウントにデプロイ
    Deploy {
        /// マニフェストファイル (.json / .yaml / .yml)
        #[arg(default_value = "manifest.json")]
        manifest: PathBuf,
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
        /// API 呼び出し1回あたりのタイムアウト (秒)
        #[arg(long, env = "PACKFLOW_CALL_TIMEOUT")]
        timeout: Option<u64>,
        /// カスタムドメインがない場合の親ドメイン
        #[arg(long, env = "PACKFLOW_PLATFORM_DOMAIN")]
        platform_domain: Option<String>,
        /// post-deploy フックを実行しない
        #[arg(long)]
        skip_hooks: bool,
        /// 結果を JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// バージョン情報を表示
    Version,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 標準出力は結果 (--json) に使うので、ログは stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Version => {
            println!("packflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Validate { manifest } => commands::validate::handle(&manifest),
        Commands::Export { manifest, output } => {
            commands::export::handle(&manifest, output.as_deref())
        }
        Commands::Deploy {
            manifest,
            yes,
            timeout,
            platform_domain,
            skip_hooks,
            json,
        } => {
            commands::deploy::handle(commands::deploy::DeployArgs {
                manifest,
                yes,
                timeout,
                platform_domain,
                skip_hooks,
                json,
            })
            .await
        }
    }
}
