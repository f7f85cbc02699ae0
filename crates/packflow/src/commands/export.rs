use colored::Colorize;
use packflow_manifest::load_manifest;
use std::path::Path;

pub fn handle(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let manifest = load_manifest(path)?;

    match output {
        Some(target) => {
            manifest.export_to(target)?;
            eprintln!(
                "{} {} → {}",
                "✓".green(),
                manifest.slug().cyan(),
                target.display()
            );
        }
        None => println!("{}", manifest.export_json()?),
    }

    Ok(())
}
