use crate::model::{DirNode, Metric, Node, Tile};

// Five severity steps per axis, lightest to hottest. Hex values are what
// the rendering surface draws verbatim.
const CHANGES_PALETTE: [&str; 5] = ["#c8e6c9", "#81c784", "#ffb74d", "#ff8a65", "#e57373"];
const AUTHORS_PALETTE: [&str; 5] = ["#bbdefb", "#90caf9", "#ffb74d", "#ff8a65", "#e57373"];

// Ascending tier bounds: value <= bounds[i] lands in step i, anything
// above the last bound is the hottest step.
const CHANGES_TIERS: [u64; 4] = [10, 20, 30, 40];
const AUTHORS_TIERS: [u64; 4] = [1, 2, 3, 4];

/// Severity color for a metric value. Total over all values of both axes;
/// there is no unmapped input and no fallback color.
pub fn bucket_color(value: u64, metric: Metric) -> &'static str {
    let (tiers, palette) = match metric {
        Metric::Changes => (&CHANGES_TIERS, &CHANGES_PALETTE),
        Metric::Authors => (&AUTHORS_TIERS, &AUTHORS_PALETTE),
    };
    for (i, bound) in tiers.iter().enumerate() {
        if value <= *bound {
            return palette[i];
        }
    }
    palette[palette.len() - 1]
}

#[derive(Clone, Copy, Debug, Default)]
struct SubtreeTotals {
    loc: u64,
    metric: u64,
    files: u64,
}

fn subtree_totals(node: &Node, metric: Metric) -> SubtreeTotals {
    match node {
        Node::File(f) => SubtreeTotals {
            loc: f.loc,
            metric: f.metric(metric),
            files: 1,
        },
        Node::Dir(d) => {
            let mut totals = SubtreeTotals::default();
            for child in &d.children {
                let t = subtree_totals(child, metric);
                totals.loc += t.loc;
                totals.metric += t.metric;
                totals.files += t.files;
            }
            totals
        }
    }
}

/// Project the direct children of `dir` into display tiles. A directory
/// tile reports the leaf sums of its whole subtree; its fill is bucketed
/// on the mean metric value per leaf, not the raw sum.
pub fn tiles(dir: &DirNode, metric: Metric) -> Vec<Tile> {
    dir.children
        .iter()
        .map(|child| match child {
            Node::File(f) => Tile {
                name: f.name.clone(),
                loc: f.loc,
                metric_value: f.metric(metric),
                fill: bucket_color(f.metric(metric), metric),
                has_children: false,
            },
            Node::Dir(d) => {
                let totals = subtree_totals(child, metric);
                let mean = if totals.files == 0 {
                    0
                } else {
                    totals.metric / totals.files
                };
                Tile {
                    name: d.name.clone(),
                    loc: totals.loc,
                    metric_value: totals.metric,
                    fill: bucket_color(mean, metric),
                    has_children: true,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileNode;

    fn file(name: &str, loc: u64, changes: u64, authors: u64) -> Node {
        Node::File(FileNode {
            name: name.to_string(),
            loc,
            changes,
            authors,
        })
    }

    fn dir(name: &str, children: Vec<Node>) -> DirNode {
        DirNode {
            name: name.to_string(),
            children,
        }
    }

    #[test]
    fn change_buckets_are_boundary_exact() {
        assert_eq!(bucket_color(0, Metric::Changes), "#c8e6c9");
        assert_eq!(bucket_color(10, Metric::Changes), "#c8e6c9");
        assert_eq!(bucket_color(11, Metric::Changes), "#81c784");
        assert_eq!(bucket_color(20, Metric::Changes), "#81c784");
        assert_eq!(bucket_color(21, Metric::Changes), "#ffb74d");
        assert_eq!(bucket_color(30, Metric::Changes), "#ffb74d");
        assert_eq!(bucket_color(31, Metric::Changes), "#ff8a65");
        assert_eq!(bucket_color(40, Metric::Changes), "#ff8a65");
        assert_eq!(bucket_color(41, Metric::Changes), "#e57373");
        assert_eq!(bucket_color(u64::MAX, Metric::Changes), "#e57373");
    }

    #[test]
    fn author_buckets_are_boundary_exact() {
        assert_eq!(bucket_color(0, Metric::Authors), "#bbdefb");
        assert_eq!(bucket_color(1, Metric::Authors), "#bbdefb");
        assert_eq!(bucket_color(2, Metric::Authors), "#90caf9");
        assert_eq!(bucket_color(3, Metric::Authors), "#ffb74d");
        assert_eq!(bucket_color(4, Metric::Authors), "#ff8a65");
        assert_eq!(bucket_color(5, Metric::Authors), "#e57373");
    }

    #[test]
    fn leaf_tiles_carry_their_own_values() {
        let d = dir("root", vec![file("a.js", 100, 5, 1), file("b.js", 50, 15, 2)]);
        let tiles = tiles(&d, Metric::Changes);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].name, "a.js");
        assert_eq!(tiles[0].loc, 100);
        assert_eq!(tiles[0].metric_value, 5);
        assert!(!tiles[0].has_children);
        assert_eq!(tiles[1].metric_value, 15);
        assert_eq!(tiles[1].fill, "#81c784");
    }

    #[test]
    fn directory_tile_sums_every_leaf_descendant() {
        // root -> src -> { a.js, nested -> b.js }
        let d = dir(
            "root",
            vec![Node::Dir(dir(
                "src",
                vec![
                    file("a.js", 100, 5, 1),
                    Node::Dir(dir("nested", vec![file("b.js", 50, 15, 3)])),
                ],
            ))],
        );
        let tiles = tiles(&d, Metric::Changes);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].name, "src");
        assert_eq!(tiles[0].loc, 150);
        assert_eq!(tiles[0].metric_value, 20);
        assert!(tiles[0].has_children);
        // mean per leaf is 10, first step
        assert_eq!(tiles[0].fill, "#c8e6c9");
    }

    #[test]
    fn directory_loc_matches_leaf_sum_one_level_up() {
        let d = dir(
            "root",
            vec![Node::Dir(dir(
                "pkg",
                vec![file("a.js", 100, 5, 1), file("b.js", 50, 15, 1)],
            ))],
        );
        let tiles = tiles(&d, Metric::Changes);
        assert_eq!(tiles[0].loc, 150);
    }

    #[test]
    fn empty_directory_projects_no_tiles() {
        let d = dir("root", vec![]);
        assert!(tiles(&d, Metric::Authors).is_empty());
    }

    #[test]
    fn empty_subdirectory_gets_a_cold_tile() {
        let d = dir("root", vec![Node::Dir(dir("empty", vec![]))]);
        let tiles = tiles(&d, Metric::Changes);
        assert_eq!(tiles[0].loc, 0);
        assert_eq!(tiles[0].metric_value, 0);
        assert_eq!(tiles[0].fill, "#c8e6c9");
        assert!(tiles[0].has_children);
    }

    #[test]
    fn built_tree_aggregates_one_level_up() {
        use crate::model::FileRecord;
        use crate::tree;

        let records = vec![
            FileRecord {
                path: "a/b.js".to_string(),
                loc: 10,
                changes: 3,
                authors: 1,
            },
            FileRecord {
                path: "a/c.js".to_string(),
                loc: 20,
                changes: 40,
                authors: 1,
            },
        ];
        let root = tree::build(&records).root;
        let tiles = tiles(&root, Metric::Changes);

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].name, "a");
        assert_eq!(tiles[0].loc, 30);
        assert_eq!(tiles[0].metric_value, 43);
        assert!(tiles[0].has_children);
        // mean over two leaves is 21, third step
        assert_eq!(tiles[0].fill, "#ffb74d");
    }

    #[test]
    fn metric_axis_switches_the_projected_value() {
        let d = dir("root", vec![file("a.js", 10, 30, 4)]);
        assert_eq!(tiles(&d, Metric::Changes)[0].metric_value, 30);
        assert_eq!(tiles(&d, Metric::Authors)[0].metric_value, 4);
        assert_eq!(tiles(&d, Metric::Authors)[0].fill, "#ff8a65");
    }
}
