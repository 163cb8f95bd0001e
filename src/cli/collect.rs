//! Run any registered collector by kind

use anyhow::{anyhow, Result};
use gitevo::collectors::{CollectorKind, CollectorRegistry};
use gitevo::config::UserConfig;
use std::path::Path;

pub fn run(target: &str, kind: CollectorKind) -> Result<()> {
    let config = UserConfig::load()?;
    let mut registry = CollectorRegistry::with_defaults(&config);

    let target = match kind {
        CollectorKind::Git => config
            .resolve_repository(Path::new(target))
            .to_string_lossy()
            .to_string(),
        CollectorKind::GitHub => target.to_string(),
    };

    let collector = registry
        .get_mut(kind)
        .ok_or_else(|| anyhow!("No collector registered for {}", kind))?;
    collector.collect(&target)?;

    println!("{}", serde_json::to_string_pretty(&collector.summary())?);
    Ok(())
}
