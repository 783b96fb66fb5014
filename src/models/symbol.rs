//! Symbol name helpers for display labels.
//!
//! Indexer symbols are fully qualified (scheme, package manager, package,
//! version, then the in-repo path). Diagram labels only want the in-repo
//! part.

/// Derives the repo-local name from a fully qualified indexer symbol.
///
/// Drops the leading scheme/package/version tokens and flattens the
/// remaining path into dot-separated segments.
pub fn repo_local_name(symbol: &str) -> String {
    let shortened: String = symbol
        .split(' ')
        .skip(4)
        .collect::<Vec<_>>()
        .join(" ")
        .replace('`', ".")
        .replace('/', ".")
        .replace(['(', ')'], "")
        .replace("..", ".");

    shortened.trim_matches('.').to_string()
}

/// Derives a short human-readable label: the last dotted segment of the
/// repo-local name. Symbols without the qualified prefix are used as-is.
pub fn display_name(symbol: &str) -> String {
    let local = repo_local_name(symbol);
    if local.is_empty() {
        return symbol.to_string();
    }
    local
        .rsplit('.')
        .next()
        .unwrap_or(local.as_str())
        .to_string()
}
