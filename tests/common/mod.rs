//! Helpers for building small git repositories with fixed timestamps.

#![allow(dead_code)]

use anyhow::Result;
use git2::{ObjectType, Oid, Repository, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

pub fn init_repo() -> Result<(TempDir, Repository)> {
    let dir = tempfile::tempdir()?;
    let repo = Repository::init(dir.path())?;
    Ok((dir, repo))
}

/// Build a tree from `base`'s tree (or nothing) plus the given edits.
/// `None` content deletes the file.
pub fn write_tree(
    repo: &Repository,
    base: Option<Oid>,
    files: &[(&str, Option<&str>)],
) -> Result<Oid> {
    let workdir = repo.workdir().expect("non-bare test repo").to_path_buf();
    let mut index = repo.index()?;
    match base {
        Some(commit_id) => index.read_tree(&repo.find_commit(commit_id)?.tree()?)?,
        None => index.clear()?,
    }

    for (name, content) in files {
        match content {
            Some(text) => {
                std::fs::write(workdir.join(name), text)?;
                index.add_path(Path::new(name))?;
            }
            None => {
                let _ = std::fs::remove_file(workdir.join(name));
                index.remove_path(Path::new(name))?;
            }
        }
    }

    index.write()?;
    Ok(index.write_tree()?)
}

/// Commit `tree` with the given parents at a fixed committer time.
pub fn commit_tree(
    repo: &Repository,
    update_ref: Option<&str>,
    tree: Oid,
    time: i64,
    message: &str,
    parents: &[Oid],
) -> Result<Oid> {
    let sig = Signature::new("Test User", "test@example.com", &Time::new(time, 0))?;
    let tree = repo.find_tree(tree)?;
    let parents = parents
        .iter()
        .map(|id| repo.find_commit(*id))
        .collect::<Result<Vec<_>, _>>()?;
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    Ok(repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs)?)
}

/// Commit on HEAD, on top of the current HEAD commit if there is one.
pub fn commit(
    repo: &Repository,
    time: i64,
    message: &str,
    files: &[(&str, Option<&str>)],
) -> Result<Oid> {
    let head = repo.head().ok().and_then(|h| h.target());
    let tree = write_tree(repo, head, files)?;
    let parents: Vec<Oid> = head.into_iter().collect();
    commit_tree(repo, Some("HEAD"), tree, time, message, &parents)
}

pub fn blob_id(content: &str) -> Result<String> {
    Ok(Oid::hash_object(ObjectType::Blob, content.as_bytes())?.to_string())
}

pub const X_CONTENT: &str = "hello world\nline two\nline three\nline four\n";
pub const Y_CONTENT: &str = "hello world\nline two\nline three\nline four\nline five\n";

/// A(root, t=1) adds x.txt, B(t=2) renames it to y.txt, C(t=3) edits y.txt.
pub fn rename_history() -> Result<(TempDir, Repository, [Oid; 3])> {
    let (dir, repo) = init_repo()?;
    let a = commit(&repo, 1, "add x", &[("x.txt", Some(X_CONTENT))])?;
    let b = commit(
        &repo,
        2,
        "rename x to y",
        &[("x.txt", None), ("y.txt", Some(X_CONTENT))],
    )?;
    let c = commit(&repo, 3, "edit y", &[("y.txt", Some(Y_CONTENT))])?;
    Ok((dir, repo, [a, b, c]))
}
