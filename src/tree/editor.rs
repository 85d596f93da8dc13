//! Structural edits on an immutable explorer tree.
//!
//! Every edit takes the current root and hands back a new one. Only the nodes on
//! the path from the edited node up to the root are rebuilt; every other subtree
//! is the very same `Arc` as before. Rebuilt ancestors keep their ids, so
//! anything keyed by [`NodeId`] (expansion state, pending intents) stays valid.

use std::sync::Arc;

use derive_more::Display;
use snafu::Snafu;
use tracing::debug;

use crate::tree::{Entry, NodeId};

/// An edit request, addressed by node identity.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Edit {
    #[display("rename {target} to {new_name:?}")]
    Rename { target: NodeId, new_name: String },
    #[display("remove {target}")]
    Remove { target: NodeId },
    #[display("insert {new_name:?} into {parent}")]
    Insert { parent: NodeId, new_name: String },
}

impl Edit {
    /// The node the edit is looked up by.
    pub fn target(&self) -> NodeId {
        match self {
            Edit::Rename { target, .. } | Edit::Remove { target } => *target,
            Edit::Insert { parent, .. } => *parent,
        }
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum EditError {
    #[snafu(display("Node {} is no longer part of the tree", target))]
    StaleReference { target: NodeId },
    #[snafu(display("The root {} cannot be renamed or removed", target))]
    InvalidRoot { target: NodeId },
    #[snafu(display("Cannot insert into {}, it is not a folder", target))]
    NotAFolder { target: NodeId },
}

enum Rebuilt {
    Unchanged,
    Replaced(Arc<Entry>),
    Removed,
}

/// Applies `edit` to the tree under `root`, reporting why it was refused if it was.
pub fn apply(root: &Arc<Entry>, edit: &Edit) -> Result<Arc<Entry>, EditError> {
    let target = edit.target();
    if root.id() == target && !matches!(edit, Edit::Insert { .. }) {
        return InvalidRootSnafu { target }.fail();
    }

    match rebuild(root, edit)? {
        Rebuilt::Replaced(new_root) => Ok(new_root),
        Rebuilt::Unchanged => StaleReferenceSnafu { target }.fail(),
        // Guarded above, the root is never the removal target here
        Rebuilt::Removed => InvalidRootSnafu { target }.fail(),
    }
}

pub fn rename(root: &Arc<Entry>, target: NodeId, new_name: impl Into<String>) -> Arc<Entry> {
    let edit = Edit::Rename {
        target,
        new_name: new_name.into(),
    };
    apply_or_keep(root, &edit)
}

pub fn remove(root: &Arc<Entry>, target: NodeId) -> Arc<Entry> {
    apply_or_keep(root, &Edit::Remove { target })
}

pub fn insert(root: &Arc<Entry>, parent: NodeId, new_name: impl Into<String>) -> Arc<Entry> {
    let edit = Edit::Insert {
        parent,
        new_name: new_name.into(),
    };
    apply_or_keep(root, &edit)
}

/// Refused edits leave the tree exactly as it was.
fn apply_or_keep(root: &Arc<Entry>, edit: &Edit) -> Arc<Entry> {
    apply(root, edit).unwrap_or_else(|error| {
        debug!("Skipping edit '{}': {}", edit, error);
        Arc::clone(root)
    })
}

fn rebuild(node: &Arc<Entry>, edit: &Edit) -> Result<Rebuilt, EditError> {
    if node.id() == edit.target() {
        return edit_target(node, edit);
    }

    let Entry::Folder(folder) = node.as_ref() else {
        return Ok(Rebuilt::Unchanged);
    };

    for (index, child) in folder.children().iter().enumerate() {
        let children = match rebuild(child, edit)? {
            Rebuilt::Unchanged => continue,
            Rebuilt::Replaced(new_child) => {
                let mut children = folder.children().to_vec();
                children[index] = new_child;
                children
            }
            Rebuilt::Removed => {
                let mut children = folder.children().to_vec();
                children.remove(index);
                children
            }
        };
        let rebuilt = Entry::Folder(folder.with_children(children));
        return Ok(Rebuilt::Replaced(Arc::new(rebuilt)));
    }

    Ok(Rebuilt::Unchanged)
}

fn edit_target(node: &Arc<Entry>, edit: &Edit) -> Result<Rebuilt, EditError> {
    match edit {
        Edit::Rename { new_name, .. } => {
            Ok(Rebuilt::Replaced(Arc::new(node.renamed(new_name.as_str()))))
        }
        Edit::Remove { .. } => Ok(Rebuilt::Removed),
        Edit::Insert { new_name, .. } => match node.as_ref() {
            Entry::Folder(folder) => {
                let mut children = folder.children().to_vec();
                children.push(Arc::new(Entry::file(new_name.as_str())));
                Ok(Rebuilt::Replaced(Arc::new(Entry::Folder(
                    folder.with_children(children),
                ))))
            }
            Entry::File(_) => NotAFolderSnafu { target: node.id() }.fail(),
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::fixture::Fixture;

    fn builtin() -> Arc<Entry> {
        Arc::new(
            Fixture::builtin()
                .expect("built-in fixture should parse")
                .into_root(),
        )
    }

    fn child<'a>(folder: &'a Entry, name: &str) -> &'a Arc<Entry> {
        folder
            .children()
            .iter()
            .find(|entry| entry.name() == name)
            .unwrap_or_else(|| panic!("no child named {name} in {}", folder.name()))
    }

    fn names(folder: &Entry) -> Vec<&str> {
        folder.children().iter().map(|entry| entry.name()).collect()
    }

    #[rstest]
    #[case::rename(Edit::Rename { target: Entry::file("stray").id(), new_name: "x".into() })]
    #[case::remove(Edit::Remove { target: Entry::file("stray").id() })]
    #[case::insert(Edit::Insert { parent: Entry::folder("stray", []).id(), new_name: "x".into() })]
    fn absent_targets_are_no_ops(#[case] edit: Edit) {
        let root = builtin();

        let result = apply(&root, &edit);
        assert_eq!(
            result,
            Err(EditError::StaleReference {
                target: edit.target()
            })
        );

        let kept = apply_or_keep(&root, &edit);
        assert!(Arc::ptr_eq(&kept, &root));
    }

    #[test]
    fn rename_changes_only_the_target_leaf() {
        let root = builtin();
        let desktop = child(&root, "Desktop");
        let video = child(desktop, "videopal.mp4");

        let renamed = rename(&root, video.id(), "holiday.mp4");

        assert_eq!(renamed.size(), root.size());
        assert_eq!(names(child(&renamed, "Desktop")), ["Screenshot1.jpg", "holiday.mp4"]);
        assert_eq!(
            renamed.find(video.id()).map(Entry::name),
            Some("holiday.mp4")
        );
        let before: Vec<_> = root.iter().map(|e| (e.id(), e.name().to_owned())).collect();
        let after: Vec<_> = renamed
            .iter()
            .map(|e| (e.id(), e.name().to_owned()))
            .collect();
        let differing: Vec<_> = before.iter().zip(&after).filter(|(b, a)| b != a).collect();
        assert_eq!(differing.len(), 1);
    }

    #[test]
    fn untouched_siblings_are_shared() {
        let root = builtin();
        let documents = child(&root, "Documents");
        let desktop = child(&root, "Desktop");
        let screenshot = child(desktop, "Screenshot1.jpg");

        let edited = remove(&root, screenshot.id());

        assert!(!Arc::ptr_eq(&edited, &root));
        assert_eq!(edited.id(), root.id());
        assert!(Arc::ptr_eq(child(&edited, "Documents"), documents));
        assert!(Arc::ptr_eq(
            child(&edited, "Applications"),
            child(&root, "Applications")
        ));
        assert!(!Arc::ptr_eq(child(&edited, "Desktop"), desktop));
        assert_eq!(child(&edited, "Desktop").id(), desktop.id());
    }

    #[test]
    fn remove_leaf_shrinks_the_tree_and_keeps_order() {
        let root = builtin();
        let documents = child(&root, "Documents");
        let middle = child(documents, "Document2.jpg");

        let edited = remove(&root, middle.id());

        assert_eq!(edited.size(), root.size() - 1);
        assert_eq!(
            names(child(&edited, "Documents")),
            ["Document1.jpg", "Document3.jpg"]
        );
        assert!(edited.find(middle.id()).is_none());
    }

    #[test]
    fn insert_appends_a_leaf_at_the_end() {
        let root = builtin();
        let applications = child(&root, "Applications");

        let edited = insert(&root, applications.id(), "newfile.txt");
        let applications = child(&edited, "Applications");

        assert_eq!(applications.children().len(), 5);
        let last = applications.children().last().expect("appended child");
        assert_eq!(last.name(), "newfile.txt");
        assert!(last.is_file());
        assert!(Arc::ptr_eq(child(&edited, "Documents"), child(&root, "Documents")));
    }

    #[test]
    fn insert_into_root_is_allowed() {
        let root = builtin();
        let edited = insert(&root, root.id(), "notes.md");
        assert_eq!(names(&edited).last(), Some(&"notes.md"));
    }

    #[test]
    fn insert_accepts_empty_names() {
        let root = builtin();
        let edited = insert(&root, root.id(), "");
        assert_eq!(edited.size(), root.size() + 1);
    }

    #[test]
    fn insert_into_a_file_is_rejected() {
        let root = builtin();
        let chromedriver = child(&root, "chromedriver.dmg");
        let edit = Edit::Insert {
            parent: chromedriver.id(),
            new_name: "x".into(),
        };

        assert_eq!(
            apply(&root, &edit),
            Err(EditError::NotAFolder {
                target: chromedriver.id()
            })
        );
        assert!(Arc::ptr_eq(&insert(&root, chromedriver.id(), "x"), &root));
    }

    #[rstest]
    #[case::remove(|root: &Arc<Entry>| Edit::Remove { target: root.id() })]
    #[case::rename(|root: &Arc<Entry>| Edit::Rename { target: root.id(), new_name: "Other".into() })]
    fn root_cannot_be_removed_or_renamed(#[case] make_edit: fn(&Arc<Entry>) -> Edit) {
        let root = builtin();
        let edit = make_edit(&root);

        assert_eq!(
            apply(&root, &edit),
            Err(EditError::InvalidRoot { target: root.id() })
        );
        assert!(Arc::ptr_eq(&apply_or_keep(&root, &edit), &root));
    }

    #[test]
    fn duplicate_names_are_told_apart_by_identity() {
        let root = Arc::new(Entry::folder(
            "Root",
            [
                Entry::folder("twin", [Entry::file("same.txt")]),
                Entry::folder("twin", [Entry::file("same.txt")]),
            ],
        ));
        let second = root.children()[1].clone();

        let edited = remove(&root, second.children()[0].id());

        assert_eq!(edited.children()[0].children().len(), 1);
        assert!(edited.children()[1].children().is_empty());
    }

    #[test]
    fn downloads_scenario() {
        let root = builtin();
        let downloads = child(&root, "Downloads");
        let drivers = child(downloads, "Drivers");
        let printer = child(drivers, "Printerdriver.dmg");

        let root = remove(&root, printer.id());
        let drivers_now = child(child(&root, "Downloads"), "Drivers");
        assert_eq!(names(drivers_now), ["cameradriver.dmg"]);

        let root = rename(&root, drivers.id(), "Installers");
        let downloads_now = child(&root, "Downloads");
        assert_eq!(names(downloads_now), ["Installers"]);
        assert_eq!(names(&downloads_now.children()[0]), ["cameradriver.dmg"]);
        assert_eq!(
            names(&root),
            ["Documents", "Desktop", "Downloads", "Applications", "chromedriver.dmg"]
        );

        let root = remove(&root, downloads.id());
        assert_eq!(
            names(&root),
            ["Documents", "Desktop", "Applications", "chromedriver.dmg"]
        );
        assert!(root.find(drivers.id()).is_none());
    }

    #[test]
    fn editing_a_removed_node_is_a_no_op() {
        let root = builtin();
        let desktop = child(&root, "Desktop").clone();

        let root = remove(&root, desktop.id());
        let after_rename = rename(&root, desktop.id(), "Back");
        let after_insert = insert(&root, desktop.id(), "ghost.txt");

        assert!(Arc::ptr_eq(&after_rename, &root));
        assert!(Arc::ptr_eq(&after_insert, &root));
    }

    #[test]
    fn edit_display_names_the_target() {
        let edit = Edit::Remove {
            target: Entry::file("x").id(),
        };
        assert!(edit.to_string().starts_with("remove #"));
    }
}
