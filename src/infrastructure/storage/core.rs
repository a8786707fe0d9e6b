use std::path::{Component, Path, PathBuf};

/// Joins non-empty, slash-trimmed segments with `/`.
pub fn join_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let key = key.trim_start_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}/{key}")
    }
}

pub fn public_url(base: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// Maps a URL issued by `public_url(base, ..)` back to its relative part.
///
/// URLs that do not start with `base` (the base changed since the object was
/// written, or the row was imported) fall back to their last path segment.
pub fn relative_from_public_url(base: &str, url: &str) -> Option<String> {
    let url = url.trim();
    let url = url.split(['?', '#']).next().unwrap_or_default();
    let base = base.trim_end_matches('/');
    if let Some(rest) = url.strip_prefix(base).and_then(|r| r.strip_prefix('/')) {
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
    }
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let (_, path) = without_scheme.split_once('/')?;
    let last = path.rsplit('/').next().unwrap_or_default();
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}

/// Relative path made only of normal components.
pub fn safe_relative_path(rel: &str) -> anyhow::Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => continue,
            _ => anyhow::bail!("forbidden path `{rel}`"),
        }
    }
    if out.as_os_str().is_empty() {
        anyhow::bail!("empty path");
    }
    Ok(out)
}
