use colored::Colorize;
use packflow_manifest::{ManifestError, load_manifest};
use std::path::Path;

pub fn handle(path: &Path) -> anyhow::Result<()> {
    println!("{}", "マニフェストを検証中...".blue());
    println!("ファイル: {}", path.display().to_string().cyan());

    match load_manifest(path) {
        Ok(manifest) => {
            println!("{}", "✓ マニフェストは正常です！".green().bold());
            println!();
            crate::output::print_manifest_summary(&manifest);
            Ok(())
        }
        Err(ManifestError::Validation(errors)) => {
            eprintln!();
            eprintln!(
                "{}",
                format!("✗ {}件の問題が見つかりました", errors.len())
                    .red()
                    .bold()
            );
            for issue in errors.issues() {
                eprintln!("  • {}", issue);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ マニフェストを読み込めません".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
