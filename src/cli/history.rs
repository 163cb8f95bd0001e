//! Commit history queries against a freshly collected repository

use anyhow::{Context, Result};
use gitevo::config::UserConfig;
use gitevo::git::GitCollector;
use serde_json::json;
use std::path::Path;

fn collect(path: &Path) -> Result<GitCollector> {
    let config = UserConfig::load()?;
    let repo_path = config.resolve_repository(path);

    let mut collector = GitCollector::new().with_rename_detection(config.detect_renames());
    collector
        .collect(&repo_path)
        .with_context(|| format!("Cannot collect history from {}", repo_path.display()))?;
    Ok(collector)
}

pub fn commits(path: &Path, json: bool) -> Result<()> {
    let collector = collect(path)?;
    let ids = collector.all_commit_ids();

    if json {
        let commits: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "time": collector.commit_time(id),
                    "committer": collector.committer_name(id),
                    "email": collector.committer_email(id),
                    "parents": collector.parent_ids(id),
                    "message": collector.log_message(id),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&commits)?);
        return Ok(());
    }

    for id in ids {
        let subject = collector.log_message(id);
        println!(
            "{} {} {}",
            id,
            collector.commit_time(id),
            subject.lines().next().unwrap_or("")
        );
    }
    Ok(())
}

pub fn range(path: &Path, json: bool) -> Result<()> {
    let collector = collect(path)?;
    let least = collector.least_recent_commit_id();
    let most = collector.most_recent_commit_id();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "least_recent": least, "most_recent": most }))?
        );
    } else {
        println!("least recent: {}", least);
        println!("most recent:  {}", most);
    }
    Ok(())
}

pub fn diff(path: &Path, new: &str, old: &str, json: bool) -> Result<()> {
    let collector = collect(path)?;
    let mut changes = collector.changes_between_commits(new, old);
    changes.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.id.cmp(&b.id)));

    if json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    for change in changes {
        let path = if change.path.is_empty() {
            "-"
        } else {
            change.path.as_str()
        };
        println!("{:<6} {} {}", change.kind.as_str(), change.id, path);
    }
    Ok(())
}

pub fn change(path: &Path, id: &str, json: bool) -> Result<()> {
    let collector = collect(path)?;
    let kind = collector.file_change_type(id);
    let file = collector.file_change_path(id);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "id": id, "kind": kind, "path": file }))?
        );
    } else if kind.is_empty() {
        println!("{}: unknown change", id);
    } else {
        println!("{} {}", kind, file);
    }
    Ok(())
}
