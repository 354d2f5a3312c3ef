//! Lexical cleaning of slash-separated request paths.

/// Clean `name` as a rooted slash path.
///
/// Empty segments and `.` are dropped; `..` removes the previous segment and
/// never climbs above the root. The result always starts with `/` and never
/// ends with one, except for the root itself.
///
/// # Example
///
/// ```rust
/// assert_eq!(chainedfs::path::clean("a/./b/../c"), "/a/c");
/// assert_eq!(chainedfs::path::clean("/../../etc/passwd"), "/etc/passwd");
/// assert_eq!(chainedfs::path::clean(""), "/");
/// ```
pub fn clean(name: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Iterate over the segments of an already cleaned path.
pub(crate) fn segments(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned.split('/').filter(|s| !s.is_empty())
}

/// Last segment of a cleaned path, or `"/"` for the root.
pub(crate) fn base_name(cleaned: &str) -> &str {
    segments(cleaned).last().unwrap_or("/")
}
