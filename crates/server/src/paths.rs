use std::path::{Path, PathBuf};

/// Resolves a caller-supplied relative path against an owned root.
///
/// Both sides are canonicalized and the result must remain a descendant of
/// the root, so a crafted `../` path can never escape a session's
/// destination tree. Returns `None` for anything that does not resolve to a
/// path under the root.
pub fn resolve_within(root: &Path, relative: &str) -> Option<PathBuf> {
    let root = root.canonicalize().ok()?;
    let candidate = root.join(relative).canonicalize().ok()?;
    candidate.starts_with(&root).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_paths_inside_the_root() {
        let root = TempDir::new().expect("root");
        std::fs::create_dir_all(root.path().join("src")).expect("mkdir");
        std::fs::write(root.path().join("src/app.js"), "x").expect("write");

        let resolved = resolve_within(root.path(), "src/app.js").expect("inside root");
        assert!(resolved.ends_with("src/app.js"));
    }

    #[test]
    fn rejects_traversal_attempts() {
        let outer = TempDir::new().expect("outer");
        let root = outer.path().join("owned");
        std::fs::create_dir_all(&root).expect("mkdir");
        std::fs::write(outer.path().join("secret.txt"), "hidden").expect("write");

        assert_eq!(resolve_within(&root, "../secret.txt"), None);
        assert_eq!(resolve_within(&root, "a/../../secret.txt"), None);
    }

    #[test]
    fn rejects_missing_paths() {
        let root = TempDir::new().expect("root");
        assert_eq!(resolve_within(root.path(), "no/such/file"), None);
    }
}
