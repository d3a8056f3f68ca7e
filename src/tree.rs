use std::collections::HashMap;

use crate::error::{MalformedPath, PathIssue};
use crate::model::{DirNode, FileNode, FileRecord, Node};

/// Result of one build pass: the synthetic root plus every record that
/// could not be placed.
#[derive(Clone, Debug)]
pub struct BuildReport {
    pub root: DirNode,
    pub skipped: Vec<MalformedPath>,
}

// Mutable accumulator used during the walk. Slots keep first-seen order;
// the index maps child name to its slot.
#[derive(Default)]
struct Level {
    index: HashMap<String, usize>,
    slots: Vec<Slot>,
}

enum Slot {
    Dir(String, Level),
    File(FileNode),
}

impl Level {
    /// Slot for a directory child, created on first sight. None if the
    /// name is already taken by a file.
    fn dir_slot(&mut self, name: &str) -> Option<&mut Level> {
        let idx = match self.index.get(name).copied() {
            Some(i) => i,
            None => {
                self.index.insert(name.to_string(), self.slots.len());
                self.slots.push(Slot::Dir(name.to_string(), Level::default()));
                self.slots.len() - 1
            }
        };
        match &mut self.slots[idx] {
            Slot::Dir(_, level) => Some(level),
            Slot::File(_) => None,
        }
    }
}

/// Build the nested directory tree from a flat record list. Pure function:
/// malformed or conflicting records are reported, not raised, and the
/// first write always wins.
pub fn build(records: &[FileRecord]) -> BuildReport {
    let mut root = Level::default();
    let mut skipped = Vec::new();

    'records: for rec in records {
        let skip = |issue: PathIssue| MalformedPath {
            path: rec.path.clone(),
            issue,
        };

        if rec.path.is_empty() {
            skipped.push(skip(PathIssue::EmptyPath));
            continue;
        }

        let segments: Vec<&str> = rec.path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            skipped.push(skip(PathIssue::EmptySegment));
            continue;
        }

        let (leaf, dirs) = match segments.split_last() {
            Some(parts) => parts,
            None => {
                skipped.push(skip(PathIssue::EmptyPath));
                continue;
            }
        };

        let mut cur = &mut root;
        for dir in dirs {
            match cur.dir_slot(dir) {
                Some(next) => cur = next,
                None => {
                    skipped.push(skip(PathIssue::DirOverFile));
                    continue 'records;
                }
            }
        }

        if let Some(&idx) = cur.index.get(*leaf) {
            let issue = match cur.slots[idx] {
                Slot::Dir(..) => PathIssue::FileOverDir,
                Slot::File(_) => PathIssue::Duplicate,
            };
            skipped.push(skip(issue));
            continue;
        }

        cur.index.insert(leaf.to_string(), cur.slots.len());
        cur.slots.push(Slot::File(FileNode {
            name: leaf.to_string(),
            loc: rec.loc,
            changes: rec.changes,
            authors: rec.authors,
        }));
    }

    BuildReport {
        root: into_dir("root".to_string(), root),
        skipped,
    }
}

fn into_dir(name: String, level: Level) -> DirNode {
    DirNode {
        name,
        children: level
            .slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Dir(n, inner) => Node::Dir(into_dir(n, inner)),
                Slot::File(f) => Node::File(f),
            })
            .collect(),
    }
}
