use crate::project::{Forest, Node, NodeKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Emitted when a file node is activated, including re-activation of the open file.
#[derive(Debug, Clone)]
pub struct SelectionChanged {
    pub node: Arc<Node>,
}

/// One visible line of the explorer.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub node: Arc<Node>,
    pub depth: usize,
    pub expanded: bool,
    pub active: bool,
}

/// Expansion and selection state of the file explorer.
///
/// Folders are expanded unless explicitly collapsed. Collapsing a folder only
/// hides its descendants; their own flags are kept and come back on re-expand.
#[derive(Debug, Default)]
pub struct Explorer {
    expanded: HashMap<String, bool>,
    selected: Option<String>,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, node: &Arc<Node>) -> Option<SelectionChanged> {
        match node.kind() {
            NodeKind::Folder => {
                let expanded = !self.is_expanded(node.path());
                self.expanded.insert(node.path().to_string(), expanded);
                None
            }
            NodeKind::File => {
                self.selected = Some(node.path().to_string());
                Some(SelectionChanged {
                    node: Arc::clone(node),
                })
            }
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.get(path).copied().unwrap_or(true)
    }

    #[cfg(test)]
    pub fn selected_path(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_active(&self, node: &Node) -> bool {
        self.selected.as_deref() == Some(node.path())
    }

    pub fn visible_rows(&self, forest: &Forest) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for root in forest.roots() {
            self.collect_rows(root, 0, &mut rows);
        }
        rows
    }

    fn collect_rows(&self, node: &Arc<Node>, depth: usize, rows: &mut Vec<TreeRow>) {
        let expanded = node.is_folder() && self.is_expanded(node.path());
        rows.push(TreeRow {
            node: Arc::clone(node),
            depth,
            expanded,
            active: self.is_active(node),
        });

        if expanded {
            for child in node.children() {
                self.collect_rows(child, depth + 1, rows);
            }
        }
    }
}
