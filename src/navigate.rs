use crate::model::{DirNode, Node};

/// Drill position within the tree, as path segments from the root. The
/// empty path is the root itself. Reset whenever a new dataset lands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    path: Vec<String>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn reset(&mut self) {
        self.path.clear();
    }

    // How many stored segments still match `root`.
    fn valid_depth(&self, root: &DirNode) -> usize {
        let mut cur = root;
        for (i, seg) in self.path.iter().enumerate() {
            match cur.child(seg) {
                Some(Node::Dir(d)) => cur = d,
                _ => return i,
            }
        }
        self.path.len()
    }

    /// The node the view is focused on. A path that no longer matches the
    /// tree resolves to its deepest surviving ancestor, never an error.
    pub fn resolve<'t>(&self, root: &'t DirNode) -> &'t DirNode {
        let mut cur = root;
        for seg in &self.path {
            match cur.child(seg) {
                Some(Node::Dir(d)) => cur = d,
                _ => break,
            }
        }
        cur
    }

    /// Enter a child directory of the focused node. Files and unknown
    /// names are ignored. Returns whether the position moved.
    pub fn drill_down(&mut self, root: &DirNode, name: &str) -> bool {
        // Clamp first so a stale tail is dropped instead of grown.
        self.path.truncate(self.valid_depth(root));
        match self.resolve(root).child(name) {
            Some(Node::Dir(_)) => {
                self.path.push(name.to_string());
                true
            }
            _ => false,
        }
    }

    /// One level up. The root is a floor: popping there is a no-op.
    pub fn drill_up(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Keep only the first `depth` segments. Out-of-range depths clamp to
    /// the current length instead of failing.
    pub fn jump_to(&mut self, depth: usize) {
        if depth < self.path.len() {
            self.path.truncate(depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRecord;
    use crate::tree;

    fn sample_tree() -> DirNode {
        let records = vec![
            FileRecord {
                path: "src/ui/button.rs".to_string(),
                loc: 250,
                changes: 38,
                authors: 4,
            },
            FileRecord {
                path: "src/app.rs".to_string(),
                loc: 100,
                changes: 5,
                authors: 2,
            },
            FileRecord {
                path: "docs/api.md".to_string(),
                loc: 350,
                changes: 8,
                authors: 1,
            },
        ];
        tree::build(&records).root
    }

    #[test]
    fn drill_down_enters_directories() {
        let root = sample_tree();
        let mut nav = NavState::new();
        assert!(nav.drill_down(&root, "src"));
        assert!(nav.drill_down(&root, "ui"));
        assert_eq!(nav.path(), ["src", "ui"]);
        assert_eq!(nav.resolve(&root).name, "ui");
    }

    #[test]
    fn drill_down_into_a_file_is_a_no_op() {
        let root = sample_tree();
        let mut nav = NavState::new();
        assert!(nav.drill_down(&root, "src"));
        assert!(!nav.drill_down(&root, "app.rs"));
        assert_eq!(nav.path(), ["src"]);
    }

    #[test]
    fn drill_down_unknown_name_is_a_no_op() {
        let root = sample_tree();
        let mut nav = NavState::new();
        assert!(!nav.drill_down(&root, "nope"));
        assert!(nav.path().is_empty());
    }

    #[test]
    fn drill_up_at_root_is_a_no_op() {
        let root = sample_tree();
        let mut nav = NavState::new();
        assert!(!nav.drill_up());
        assert!(nav.path().is_empty());

        nav.drill_down(&root, "src");
        assert!(nav.drill_up());
        assert!(nav.path().is_empty());
    }

    #[test]
    fn jump_truncates_and_clamps() {
        let root = sample_tree();
        let mut nav = NavState::new();
        nav.drill_down(&root, "src");
        nav.drill_down(&root, "ui");

        nav.jump_to(5);
        assert_eq!(nav.path(), ["src", "ui"]);

        nav.jump_to(1);
        assert_eq!(nav.path(), ["src"]);

        nav.jump_to(0);
        assert!(nav.path().is_empty());
    }

    #[test]
    fn stale_path_resolves_to_deepest_survivor() {
        let root = sample_tree();
        let mut nav = NavState::new();
        nav.drill_down(&root, "src");
        nav.drill_down(&root, "ui");

        // Reload dropped the ui directory.
        let reloaded = tree::build(&[FileRecord {
            path: "src/app.rs".to_string(),
            loc: 100,
            changes: 5,
            authors: 2,
        }])
        .root;

        assert_eq!(nav.resolve(&reloaded).name, "src");
    }

    #[test]
    fn drill_down_clamps_a_stale_tail_first() {
        let root = sample_tree();
        let mut nav = NavState::new();
        nav.drill_down(&root, "src");
        nav.drill_down(&root, "ui");

        // "ui" is gone; drilling into "sub" of the survivor must not keep
        // the dead segment around.
        let reloaded = tree::build(&[
            FileRecord {
                path: "src/sub/a.rs".to_string(),
                loc: 1,
                changes: 0,
                authors: 0,
            },
            FileRecord {
                path: "src/app.rs".to_string(),
                loc: 100,
                changes: 5,
                authors: 2,
            },
        ])
        .root;

        assert!(nav.drill_down(&reloaded, "sub"));
        assert_eq!(nav.path(), ["src", "sub"]);
    }

    #[test]
    fn resolve_on_empty_path_is_the_root() {
        let root = sample_tree();
        let nav = NavState::new();
        assert_eq!(nav.resolve(&root).name, "root");
        assert!(nav.path().is_empty());
    }
}
