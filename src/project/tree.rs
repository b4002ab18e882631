use crate::error::TreeError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug)]
enum NodeBody {
    Folder {
        children: Vec<Arc<Node>>,
    },
    File {
        content: String,
        language: Option<String>,
    },
}

/// One file or folder of the project forest. Built only by [`Forest::from_entries`],
/// so `path` always equals the ancestors' names joined with `/`.
#[derive(Debug)]
pub struct Node {
    id: String,
    name: String,
    path: String,
    body: NodeBody,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Folder { .. } => NodeKind::Folder,
            NodeBody::File { .. } => NodeKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    pub fn children(&self) -> &[Arc<Node>] {
        match &self.body {
            NodeBody::Folder { children } => children,
            NodeBody::File { .. } => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NodeBody::File { content, .. } => Some(content),
            NodeBody::Folder { .. } => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.body {
            NodeBody::File { language, .. } => language.as_deref(),
            NodeBody::Folder { .. } => None,
        }
    }

    /// Content split on `\n`; folders have no lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content().into_iter().flat_map(|content| content.split('\n'))
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}

/// Declarative form of a node, as stored in the embedded project fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Folder {
        id: String,
        name: String,
        #[serde(default)]
        children: Vec<Entry>,
    },
    File {
        id: String,
        name: String,
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        content: String,
    },
}

#[cfg(test)]
impl Entry {
    pub fn folder(id: impl Into<String>, name: impl Into<String>, children: Vec<Entry>) -> Self {
        Self::Folder {
            id: id.into(),
            name: name.into(),
            children,
        }
    }

    pub fn file(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::File {
            id: id.into(),
            name: name.into(),
            language: None,
            content: content.into(),
        }
    }

    pub fn with_language(mut self, value: impl Into<String>) -> Self {
        if let Self::File { language, .. } = &mut self {
            *language = Some(value.into());
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct Forest {
    roots: Vec<Arc<Node>>,
    by_path: HashMap<String, Arc<Node>>,
}

impl Forest {
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, TreeError> {
        let mut ids = HashSet::new();
        let mut by_path = HashMap::new();
        let roots = entries
            .into_iter()
            .map(|entry| build_node(entry, None, &mut ids, &mut by_path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { roots, by_path })
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn find(&self, path: &str) -> Result<&Arc<Node>, TreeError> {
        self.by_path
            .get(path)
            .ok_or_else(|| TreeError::NotFound(path.to_string()))
    }

    /// Every node, depth-first, in declaration order.
    pub fn iter(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().collect(),
        }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

fn validate_name(parent: Option<&str>, name: &str) -> Result<(), TreeError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(TreeError::InvalidName {
            parent: parent.unwrap_or_default().to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

fn build_node(
    entry: Entry,
    parent: Option<&str>,
    ids: &mut HashSet<String>,
    by_path: &mut HashMap<String, Arc<Node>>,
) -> Result<Arc<Node>, TreeError> {
    let (id, name) = match &entry {
        Entry::Folder { id, name, .. } | Entry::File { id, name, .. } => (id.clone(), name.clone()),
    };
    validate_name(parent, &name)?;

    let path = match parent {
        Some(parent) => format!("{parent}/{name}"),
        None => name.clone(),
    };
    if !ids.insert(id.clone()) {
        return Err(TreeError::DuplicateId(id));
    }
    if by_path.contains_key(&path) {
        return Err(TreeError::DuplicatePath(path));
    }

    let body = match entry {
        Entry::Folder { children, .. } => NodeBody::Folder {
            children: children
                .into_iter()
                .map(|child| build_node(child, Some(&path), ids, by_path))
                .collect::<Result<Vec<_>, _>>()?,
        },
        Entry::File {
            content, language, ..
        } => NodeBody::File { content, language },
    };

    let node = Arc::new(Node {
        id,
        name,
        path: path.clone(),
        body,
    });
    by_path.insert(path, Arc::clone(&node));
    Ok(node)
}
