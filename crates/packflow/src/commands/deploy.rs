use crate::output;
use colored::Colorize;
use packflow_cloud_cloudflare::CloudflareClient;
use packflow_config::{Settings, credentials_from_env};
use packflow_deploy::{DeployOptions, NoopHookRunner, Orchestrator};
use packflow_manifest::load_manifest;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct DeployArgs {
    pub manifest: PathBuf,
    pub yes: bool,
    pub timeout: Option<u64>,
    pub platform_domain: Option<String>,
    pub skip_hooks: bool,
    pub json: bool,
}

/// フラグ > 設定ファイル > 既定値 の順で決める
fn deploy_options(args: &DeployArgs, settings: &Settings) -> anyhow::Result<DeployOptions> {
    let mut options = DeployOptions::default();

    if let Some(domain) = args
        .platform_domain
        .clone()
        .or_else(|| settings.platform_domain.clone())
    {
        options = options.with_platform_domain(domain);
    }

    match args.timeout {
        Some(0) => anyhow::bail!("--timeout は 1 以上を指定してください"),
        Some(secs) => options = options.with_call_timeout(Duration::from_secs(secs)),
        None => {
            if let Some(timeout) = settings.call_timeout() {
                options = options.with_call_timeout(timeout);
            }
        }
    }

    Ok(options)
}

pub async fn handle(args: DeployArgs) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let manifest = load_manifest(&args.manifest)?;
    let options = deploy_options(&args, &settings)?;
    debug!(?options, skip_hooks = args.skip_hooks, "デプロイオプション");

    if !args.json {
        println!("{}", "デプロイを開始します...".blue().bold());
        output::print_manifest_summary(&manifest);
    }

    // 確認（--yesが指定されていない場合）
    if !args.yes {
        println!();
        println!(
            "{}",
            "警告: あなたのアカウントに課金対象のリソースを作成します。".yellow()
        );
        println!("実行するには --yes オプションを指定してください");
        return Ok(());
    }

    let credentials = credentials_from_env(&settings)?;

    let client = match &settings.api_base {
        Some(base) => CloudflareClient::with_api_base(base),
        None => CloudflareClient::new(),
    };
    let mut orchestrator = Orchestrator::new(Arc::new(client)).with_options(options);
    if args.skip_hooks {
        orchestrator = orchestrator.with_hook_runner(Arc::new(NoopHookRunner));
    }

    if !args.json {
        println!();
        println!(
            "{}",
            format!(
                "プロビジョニング中... (タイムアウト: {}秒/呼び出し)",
                orchestrator.options().call_timeout.as_secs()
            )
            .blue()
        );
    }

    match orchestrator.deploy(&manifest, &credentials).await {
        Ok(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_result(&result);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ デプロイに失敗しました".red().bold());
            eprintln!("  {}", e);
            if let Some(partial) = e.partial() {
                output::print_partial(partial);
            }
            Err(e.into())
        }
    }
}
