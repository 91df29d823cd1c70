use log::{error, info, warn};
use meterconf::{check_device_path, Config, PluginRegistry, ValidationContext};
use std::env;
use std::path::Path;
use std::process::ExitCode;
use walkdir::WalkDir;

fn is_device_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yaml") | Some("yml"))
}

fn main() -> ExitCode {
    // Initialize logging
    let default_filter = std::env::var("METERCONF_LOG_LEVEL").unwrap_or("info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let catalog = config.catalog();
    let registry = PluginRegistry::new();
    let ctx = ValidationContext::new(&catalog, &registry, &config.limits);
    info!("Catalog has {} variables, protocols {:?}", catalog.len(), registry.protocols());

    let roots: Vec<String> = env::args().skip(1).collect();
    if roots.is_empty() {
        error!("Usage: meterconf <device file or directory>...");
        return ExitCode::from(2);
    }

    let mut checked = 0;
    let mut failed = 0;
    for root in roots.iter() {
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping {e}");
                    failed += 1;
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_device_file(path) {
                continue;
            }

            checked += 1;
            match check_device_path(path, &ctx) {
                Ok(report) if report.is_valid() => {
                    info!("{}: device {} with {} nodes is valid", path.display(), report.device, report.node_count);
                }
                Ok(report) => {
                    failed += 1;
                    for failure in report.failures.iter() {
                        error!("{}: {}: {}", path.display(), report.device, failure);
                    }
                }
                Err(e) => {
                    failed += 1;
                    error!("{}: {}", path.display(), e);
                }
            }
        }
    }

    info!("Checked {} device files, {} failed", checked, failed);
    if failed > 0 {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
