use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use derive_more::{Display, IsVariant};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a tree node.
///
/// Two entries with the same name and the same children are still distinct
/// nodes; lookups and edits always go through the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    id: NodeId,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    id: NodeId,
    name: String,
    children: Vec<Arc<Entry>>,
}

impl FolderEntry {
    pub fn children(&self) -> &[Arc<Entry>] {
        &self.children
    }

    /// Same folder (same id, same name) holding a different set of children.
    pub(crate) fn with_children(&self, children: Vec<Arc<Entry>>) -> Self {
        FolderEntry {
            id: self.id,
            name: self.name.clone(),
            children,
        }
    }
}

/// A node of the explorer tree: either a leaf file or a folder with ordered children.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Entry {
    File(FileEntry),
    Folder(FolderEntry),
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Entry::File(FileEntry {
            id: NodeId::next(),
            name: name.into(),
        })
    }

    pub fn folder(name: impl Into<String>, children: impl IntoIterator<Item = Entry>) -> Self {
        Entry::Folder(FolderEntry {
            id: NodeId::next(),
            name: name.into(),
            children: children.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn id(&self) -> NodeId {
        match self {
            Entry::File(file) => file.id,
            Entry::Folder(folder) => folder.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => &file.name,
            Entry::Folder(folder) => &folder.name,
        }
    }

    /// Children in display order. Files have none.
    pub fn children(&self) -> &[Arc<Entry>] {
        match self {
            Entry::File(_) => &[],
            Entry::Folder(folder) => &folder.children,
        }
    }

    /// Copy of this node under a new name. The id and the children are kept.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        match self {
            Entry::File(file) => Entry::File(FileEntry {
                id: file.id,
                name: name.into(),
            }),
            Entry::Folder(folder) => Entry::Folder(FolderEntry {
                id: folder.id,
                name: name.into(),
                children: folder.children.clone(),
            }),
        }
    }

    pub fn find(&self, id: NodeId) -> Option<&Entry> {
        self.iter().find(|entry| entry.id() == id)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order walk over this subtree.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        self.stack
            .extend(entry.children().iter().rev().map(|child| child.as_ref()));
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entry {
        Entry::folder(
            "Root",
            [
                Entry::folder("Documents", [Entry::file("a.txt"), Entry::file("b.txt")]),
                Entry::file("c.txt"),
            ],
        )
    }

    #[test]
    fn ids_are_unique_even_for_identical_values() {
        let first = Entry::folder("Same", [Entry::file("x")]);
        let second = Entry::folder("Same", [Entry::file("x")]);
        assert_ne!(first.id(), second.id());
        assert_ne!(first, second);
    }

    #[test]
    fn discriminator_follows_the_variant() {
        assert!(Entry::folder("empty", []).is_folder());
        assert!(Entry::file("leaf").is_file());
        assert!(!Entry::file("looks like a folder/").is_folder());
    }

    #[test]
    fn files_have_no_children() {
        assert!(Entry::file("leaf").children().is_empty());
    }

    #[test]
    fn iter_walks_in_pre_order() {
        let root = sample();
        let names: Vec<_> = root.iter().map(Entry::name).collect();
        assert_eq!(names, ["Root", "Documents", "a.txt", "b.txt", "c.txt"]);
        assert_eq!(root.size(), 5);
    }

    #[test]
    fn find_locates_nested_nodes_by_id() {
        let root = sample();
        let nested = root.children()[0].children()[1].id();
        let found = root.find(nested).expect("nested node should be found");
        assert_eq!(found.name(), "b.txt");
        assert!(root.find(root.id()).is_some());
        assert!(root.find(Entry::file("elsewhere").id()).is_none());
    }

    #[test]
    fn renamed_keeps_identity_and_children() {
        let root = sample();
        let documents = root.children()[0].as_ref();
        let renamed = documents.renamed("Papers");
        assert_eq!(renamed.id(), documents.id());
        assert_eq!(renamed.name(), "Papers");
        assert!(Arc::ptr_eq(&renamed.children()[0], &documents.children()[0]));
    }

    #[test]
    fn node_id_displays_with_hash_prefix() {
        let entry = Entry::file("x");
        assert!(entry.id().to_string().starts_with('#'));
    }
}
