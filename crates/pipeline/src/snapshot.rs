use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::Result;

/// One node in a [`FileTree`]. Directories nest; a file leaf serializes as
/// JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    Dir(BTreeMap<String, TreeNode>),
    File,
}

/// Nested structural description of a directory tree, keyed by path segment
/// in deterministic (sorted) order.
pub type FileTree = BTreeMap<String, TreeNode>;

/// Builds the structural snapshot of a finished destination tree.
///
/// Pure read-only traversal; reflects exactly the files on disk at call time.
pub fn snapshot(dest_root: &Path) -> Result<FileTree> {
    let mut tree = FileTree::new();
    for entry in WalkDir::new(dest_root).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(dest_root) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        insert(&mut tree, relative, entry.file_type().is_dir());
    }
    Ok(tree)
}

/// Number of file leaves in a tree.
pub fn file_count(tree: &FileTree) -> usize {
    tree.values()
        .map(|node| match node {
            TreeNode::File => 1,
            TreeNode::Dir(children) => file_count(children),
        })
        .sum()
}

fn insert(tree: &mut FileTree, relative: &Path, is_dir: bool) {
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let Some(leaf) = parts.pop() else {
        return;
    };

    let mut level = tree;
    for part in parts {
        let node = level
            .entry(part)
            .or_insert_with(|| TreeNode::Dir(FileTree::new()));
        match node {
            TreeNode::Dir(children) => level = children,
            // A file and a directory cannot share a path.
            TreeNode::File => return,
        }
    }
    level.insert(
        leaf,
        if is_dir {
            TreeNode::Dir(FileTree::new())
        } else {
            TreeNode::File
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn snapshot_mirrors_the_directory_listing() {
        let root = TempDir::new().expect("root");
        fs::create_dir_all(root.path().join("src/util")).expect("mkdir");
        fs::create_dir_all(root.path().join("empty")).expect("mkdir");
        fs::write(root.path().join("README.md"), "doc").expect("write");
        fs::write(root.path().join("src/Main.java"), "code").expect("write");
        fs::write(root.path().join("src/util/Helper.java"), "code").expect("write");

        let tree = snapshot(root.path()).expect("snapshot");

        let json = serde_json::to_value(&tree).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "README.md": null,
                "empty": {},
                "src": {
                    "Main.java": null,
                    "util": { "Helper.java": null }
                }
            })
        );
        assert_eq!(file_count(&tree), 3);
    }

    #[test]
    fn file_leaves_serialize_as_null() {
        let json = serde_json::to_string(&TreeNode::File).expect("serialize");
        assert_eq!(json, "null");
    }

    #[test]
    fn empty_root_yields_an_empty_tree() {
        let root = TempDir::new().expect("root");
        let tree = snapshot(root.path()).expect("snapshot");
        assert!(tree.is_empty());
        assert_eq!(file_count(&tree), 0);
    }
}
