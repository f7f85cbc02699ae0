use colored::Colorize;
use packflow_deploy::{DeploymentResult, PartialDeployment};
use packflow_manifest::ResourceManifest;

/// マニフェストの内容を表示
pub fn print_manifest_summary(manifest: &ResourceManifest) {
    println!(
        "パッケージ: {} ({} v{})",
        manifest.name().bold(),
        manifest.slug().cyan(),
        manifest.version()
    );
    println!(
        "  価格: {}.{:02} / プラン: {}",
        manifest.price() / 100,
        manifest.price() % 100,
        manifest.tier()
    );

    println!("  コンピュート関数: {}個", manifest.compute_functions().len());
    for function in manifest.compute_functions() {
        let schedule = function
            .schedule
            .as_deref()
            .map(|s| format!(", cron: {}", s))
            .unwrap_or_default();
        println!(
            "    - {} ({}個のルート{})",
            function.name.cyan(),
            function.routes.len(),
            schedule
        );
    }

    if !manifest.databases().is_empty() {
        println!("  データベース: {}個", manifest.databases().len());
        for db in manifest.databases() {
            let scripts = [
                db.schema.as_ref().map(|_| "schema"),
                db.seed.as_ref().map(|_| "seed"),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
            if scripts.is_empty() {
                println!("    - {}", db.name.cyan());
            } else {
                println!("    - {} ({})", db.name.cyan(), scripts.join(" + "));
            }
        }
    }

    if !manifest.object_buckets().is_empty() {
        println!("  バケット: {}個", manifest.object_buckets().len());
        for bucket in manifest.object_buckets() {
            let cors = if bucket.cors { ", CORS" } else { "" };
            println!(
                "    - {} ({}{})",
                bucket.name.cyan(),
                bucket.storage_class,
                cors
            );
        }
    }

    match manifest.custom_domain() {
        Some(domain) => {
            println!("  カスタムドメイン: {}", domain.hostname.cyan());
            println!("    DNS レコード: {}個", manifest.dns_records().len());
        }
        None => println!("  カスタムドメイン: (なし)"),
    }

    if let Some(hosting) = manifest.static_hosting() {
        println!("  静的ホスティング: {}", hosting.name.cyan());
    }

    if !manifest.post_deploy_hooks().is_empty() {
        println!("  フック: {}個", manifest.post_deploy_hooks().len());
        for hook in manifest.post_deploy_hooks() {
            println!("    - {} ({})", hook.name.cyan(), hook.kind);
        }
    }
}

/// デプロイ結果を表示
pub fn print_result(result: &DeploymentResult) {
    println!();
    println!("{}", "✓ デプロイが完了しました！".green().bold());
    println!();
    println!("  アカウント: {}", result.account_id);
    println!(
        "  ネームスペース: {} ({})",
        result.namespace.name.cyan(),
        result.namespace.id
    );
    println!("  ダッシュボード: {}", result.dashboard_url.cyan().bold());
    println!("  API: {}", result.api_endpoint.cyan());
    if let Some(domain) = &result.custom_domain {
        println!("  カスタムドメイン: {}", domain.cyan());
    }

    println!();
    println!("作成したリソース:");
    let groups = [
        ("関数", &result.functions),
        ("データベース", &result.databases),
        ("バケット", &result.buckets),
        ("DNS レコード", &result.dns_records),
    ];
    for (label, resources) in groups {
        for resource in resources {
            println!("  • {} {} ({})", label, resource.name.cyan(), resource.id);
        }
    }
    if let Some(hostname) = &result.custom_hostname {
        println!(
            "  • カスタムホスト名 {} ({})",
            hostname.name.cyan(),
            hostname.id
        );
    }
    if let Some(hosting) = &result.hosting {
        println!("  • 静的ホスティング {} ({})", hosting.name.cyan(), hosting.id);
    }

    if !result.bindings.is_empty() {
        println!();
        println!("バインディング:");
        for (function, names) in &result.bindings {
            println!("  {} ← {}", function.cyan(), names.join(", "));
        }
    }

    if result.has_warnings() {
        println!();
        for warning in &result.warnings {
            println!("{} {}", "⚠".yellow(), warning);
        }
    }
}

/// 失敗時点で作成済みのリソースを表示
pub fn print_partial(partial: &PartialDeployment) {
    if partial.is_empty() {
        eprintln!("  作成済みのリソースはありません");
        return;
    }

    eprintln!();
    eprintln!(
        "{}",
        "以下のリソースはアカウントに残っています (自動では削除されません):".yellow()
    );
    for (kind, name, id) in partial.inventory() {
        eprintln!("  • {} {} ({})", kind, name.cyan(), id);
    }
}
