//! Location and session history

use serde::{Deserialize, Serialize};

/// State object stored with each history entry: `{ url }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub url: String,
}

impl HistoryState {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Browser location and history as seen by effects
pub trait Navigator {
    /// Current `location.pathname`
    fn pathname(&self) -> String;

    /// `history.pushState(state, "", state.url)`
    fn push_state(&mut self, state: &HistoryState);

    /// `history.replaceState(state, title, state.url)`
    fn replace_state(&mut self, state: &HistoryState);

    /// Full navigation (`location.href = url`); discards the page
    fn assign(&mut self, url: &str);
}

/// Resolve a link `href` against the current path, the way the browser
/// resolves relative URLs. Query strings and fragments are dropped.
///
/// ```
/// use folio_core::platform::resolve_path;
///
/// assert_eq!(resolve_path("/blog/index.html", "post.html"), "/blog/post.html");
/// assert_eq!(resolve_path("/blog/", "/about.html"), "/about.html");
/// ```
pub fn resolve_path(current: &str, href: &str) -> String {
    let href = href
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    if href.is_empty() {
        return current.to_string();
    }
    if href.starts_with('/') {
        return normalize(href);
    }
    let dir = match current.rfind('/') {
        Some(idx) => &current[..=idx],
        None => "/",
    };
    normalize(&format!("{dir}{href}"))
}

/// Collapse `.` and `..` segments
fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut out = format!("/{}", segments.join("/"));
    if path.ends_with('/') && out.len() > 1 {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve_path("/", "about.html"), "/about.html");
        assert_eq!(resolve_path("/index.html", "projects.html"), "/projects.html");
        assert_eq!(resolve_path("/a/b.html", "../c.html"), "/c.html");
        assert_eq!(resolve_path("/a/b.html", "./c.html?x=1#top"), "/a/c.html");
    }

    #[test]
    fn test_resolve_absolute_and_empty() {
        assert_eq!(resolve_path("/x/y.html", "/"), "/");
        assert_eq!(resolve_path("/x/y.html", "/docs/"), "/docs/");
        assert_eq!(resolve_path("/x/y.html", "#top"), "/x/y.html");
    }
}
