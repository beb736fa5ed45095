use std::collections::BTreeMap;

use crate::model::{DirectoryEntry, NodeKind, TreeNode};

fn node_from_entry(e: &DirectoryEntry) -> TreeNode {
    match e.kind {
        NodeKind::Folder => TreeNode::folder(&e.name, &e.path, e.level, e.supported),
        NodeKind::File => TreeNode::file(&e.name, &e.path, e.level, e.supported),
    }
}

fn attach(stack: &mut [TreeNode], roots: &mut Vec<TreeNode>, node: TreeNode) {
    match stack.last_mut().and_then(|p| p.children.as_mut()) {
        Some(children) => children.push(node),
        None => roots.push(node),
    }
}

/// Builds a forest from pre-order directory entries, nesting by `level`.
///
/// Open folders live on a stack and are attached to their parent when they
/// close, so child order always equals input order. Gaps in `level` attach to
/// the nearest surviving ancestor.
pub fn build_tree_from_entries(entries: &[DirectoryEntry]) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();
    let mut stack: Vec<TreeNode> = Vec::new();

    for e in entries {
        while stack.last().is_some_and(|top| top.level >= e.level) {
            if let Some(closed) = stack.pop() {
                attach(&mut stack, &mut roots, closed);
            }
        }

        let node = node_from_entry(e);
        if node.is_folder() {
            stack.push(node);
        } else {
            attach(&mut stack, &mut roots, node);
        }
    }

    while let Some(closed) = stack.pop() {
        attach(&mut stack, &mut roots, closed);
    }

    roots
}

#[derive(Default)]
struct PathTrie {
    children: BTreeMap<String, PathTrie>,
    /// Raw path as the backend spelled it, set on terminal segments.
    source: Option<String>,
}

impl PathTrie {
    fn insert(&mut self, path: &str) {
        let mut cur = self;
        let mut canonical = String::new();
        for seg in path.split('/').filter(|s| !s.is_empty()) {
            canonical.push('/');
            canonical.push_str(seg);
            cur = cur.children.entry(seg.to_string()).or_default();
        }
        if canonical.is_empty() {
            return;
        }
        // Several spellings of one file: the canonical one wins, else the
        // smallest, so insertion order never matters.
        let keep = match cur.source.take() {
            None => path.to_string(),
            Some(prev) if prev == canonical => prev,
            Some(_) if path == canonical => path.to_string(),
            Some(prev) => prev.min(path.to_string()),
        };
        cur.source = Some(keep);
    }

    fn into_nodes(self, parent_path: &str, level: usize) -> Vec<TreeNode> {
        self.children
            .into_iter()
            .map(|(name, sub)| {
                let path = format!("{}/{}", parent_path, name);
                if sub.children.is_empty() {
                    let leaf_path = sub.source.as_deref().unwrap_or(&path);
                    TreeNode::file(&name, leaf_path, level, None)
                } else {
                    let children = sub.into_nodes(&path, level + 1);
                    TreeNode {
                        children: Some(children),
                        ..TreeNode::folder(&name, &path, level, None)
                    }
                }
            })
            .collect()
    }
}

/// Builds a forest from unordered file paths such as `/a/b/c.py`.
///
/// Children are sorted by segment name, so any permutation of the same path
/// set yields the same tree. A segment that is both a terminal and a prefix
/// becomes a folder. File leaves keep the path exactly as given, so they can
/// be looked up in the result they came from.
pub fn build_tree_from_paths<S: AsRef<str>>(paths: &[S]) -> Vec<TreeNode> {
    let mut trie = PathTrie::default();
    for p in paths {
        trie.insert(p.as_ref());
    }
    trie.into_nodes("", 0)
}

/// Every file path in the forest, depth-first.
pub fn collect_file_paths(nodes: &[TreeNode], out: &mut Vec<String>) {
    for n in nodes {
        if n.is_folder() {
            collect_file_paths(n.children(), out);
        } else {
            out.push(n.path.clone());
        }
    }
}
