use std::path::PathBuf;

use lumen_core::RunConfig;

/// Write the built-in run configuration as YAML.
///
/// The default destination is `lumen.yml` in the working directory, which
/// `lumen run` picks up without further flags. An existing file is kept
/// unless `force` is true.
pub fn cmd_init(output: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = output.unwrap_or_else(|| PathBuf::from("lumen.yml"));

    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }

    let yaml = RunConfig::default().to_yaml()?;
    std::fs::write(&path, yaml)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    println!("Wrote default configuration to: {}", path.display());
    println!();
    println!("Add the images to copy under `source_paths`, then run `lumen run`.");

    Ok(())
}
