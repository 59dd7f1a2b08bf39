mod common;

use common::{dots, four_species_tree, synthetic_alignment, three_species_tree};
use phyloclust::build_tree;
use phyloclust::model::{BranchLength, PhyloTree, Sequence, VisualLayout};
use rstest::{fixture, rstest};

#[fixture]
fn tree() -> PhyloTree {
    three_species_tree()
}

// =#========================================================================#=
// HEIGHT & DEPTH
// =#========================================================================#=

#[rstest]
fn test_height(tree: PhyloTree) {
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.weighted_height(), 0.3125);
    assert_eq!(tree.count_all_species(), 3);
}

#[test]
fn test_height_four_species() {
    let tree = four_species_tree();
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.weighted_height(), 0.6875);
}

#[rstest]
#[case("A+B+C", 0, 0.0)]
#[case("A+B", 1, 0.1875)]
#[case("C", 1, 0.1875)]
#[case("A", 2, 0.3125)]
#[case("B", 2, 0.3125)]
fn test_depth(tree: PhyloTree, #[case] label: &str, #[case] depth: usize, #[case] weighted: f64) {
    assert_eq!(tree.depth(label), Some(depth));
    assert_eq!(tree.weighted_depth(label), Some(weighted));

    let index = tree.index_of(label).unwrap();
    assert_eq!(tree.depth_of(index), depth);
    assert_eq!(tree.weighted_depth_of(index), weighted);
}

#[rstest]
fn test_depth_of_unknown_label(tree: PhyloTree) {
    assert_eq!(tree.depth("Moa"), None);
    assert_eq!(tree.weighted_depth("Moa"), None);
    assert!(tree.find_by_label("Moa").is_none());
}

#[rstest]
fn test_branch_length(tree: PhyloTree) {
    let c = tree.index_of("C").unwrap();
    let a = tree.index_of("A").unwrap();
    assert_eq!(tree.branch_length(c), Some(BranchLength::new(0.1875)));
    assert_eq!(tree.branch_length(a), Some(BranchLength::new(0.125)));
    assert_eq!(tree.branch_length(tree.root_index()), None);
}

// =#========================================================================#=
// LEAST COMMON ANCESTOR
// =#========================================================================#=

#[rstest]
#[case("A", "B", "A+B")]
#[case("B", "A", "A+B")]
#[case("A", "C", "A+B+C")]
#[case("C", "B", "A+B+C")]
#[case("A", "A", "A")]
#[case("A", "A+B", "A+B")]
#[case("A+B", "C", "A+B+C")]
#[case("A+B+C", "B", "A+B+C")]
fn test_least_common_ancestor(
    tree: PhyloTree,
    #[case] first: &str,
    #[case] second: &str,
    #[case] expected: &str,
) {
    let ancestor = tree.least_common_ancestor(first, second).unwrap();
    assert_eq!(ancestor.label(), expected);
}

#[rstest]
fn test_least_common_ancestor_unknown(tree: PhyloTree) {
    assert!(tree.least_common_ancestor("A", "Moa").is_none());
    assert!(tree.least_common_ancestor("Moa", "A").is_none());
}

#[test]
fn test_least_common_ancestor_is_common_and_lowest() {
    let tree = build_tree(synthetic_alignment(12, 30)).unwrap();
    let leaves: Vec<&str> = tree.all_leaf_sequences().iter().map(|s| s.name()).collect();

    for first in &leaves {
        for second in &leaves {
            let ancestor = tree.least_common_ancestor(first, second).unwrap();
            let expected_depth = tree.depth(ancestor.label()).unwrap();
            let parts: Vec<&str> = ancestor.label().split('+').collect();
            assert!(parts.contains(first) && parts.contains(second));
            // No child of the ancestor holds both
            if let Some((left, right)) = ancestor.children() {
                for child in [left, right] {
                    let label = tree[child].label();
                    let parts: Vec<&str> = label.split('+').collect();
                    assert!(!(parts.contains(first) && parts.contains(second)));
                }
            }
            assert!(expected_depth <= tree.depth(first).unwrap());
        }
    }
}

// =#========================================================================#=
// DISTANCES
// =#========================================================================#=

#[rstest]
#[case("A", "B", 0.25)]
#[case("A", "C", 0.5)]
#[case("B", "C", 0.5)]
#[case("A", "A", 0.0)]
#[case("A", "A+B", 0.125)]
#[case("C", "A+B+C", 0.1875)]
#[case("A+B", "C", 0.375)]
fn test_evolutionary_distance(
    tree: PhyloTree,
    #[case] first: &str,
    #[case] second: &str,
    #[case] expected: f64,
) {
    assert_eq!(tree.evolutionary_distance(first, second), expected);
    assert_eq!(tree.evolutionary_distance(second, first), expected);
}

#[rstest]
fn test_evolutionary_distance_unknown(tree: PhyloTree) {
    assert_eq!(tree.evolutionary_distance("A", "Moa"), f64::INFINITY);
    assert_eq!(tree.evolutionary_distance("Moa", "Moa"), f64::INFINITY);
}

#[test]
fn test_evolutionary_distance_four_species() {
    let tree = four_species_tree();
    assert_eq!(tree.evolutionary_distance("A", "D"), 1.0625);
    assert_eq!(tree.evolutionary_distance("C", "D"), 0.9375);
    assert_eq!(tree.evolutionary_distance("B", "C"), 0.5);
}

#[test]
fn test_evolutionary_distances_are_symmetric_and_non_negative() {
    let tree = build_tree(synthetic_alignment(10, 25)).unwrap();
    let distances = tree.evolutionary_distances();
    assert_eq!(distances.len(), 100);

    for (first, second, distance) in distances {
        assert!(distance >= 0.0);
        assert_eq!(distance, tree.evolutionary_distance(second, first));
        if first == second {
            assert_eq!(distance, 0.0);
        }
    }
}

#[rstest]
fn test_evolutionary_distances_order(tree: PhyloTree) {
    let distances = tree.evolutionary_distances();
    assert_eq!(distances.len(), 9);
    assert_eq!(distances[0], ("C", "C", 0.0));
    assert_eq!(distances[1], ("C", "B", 0.5));
    assert_eq!(distances[5], ("B", "A", 0.25));
}

#[rstest]
#[case("A", "B", 0.25)]
#[case("A", "C", 0.375)]
#[case("C", "B", 0.375)]
#[case("A", "A", 0.0)]
fn test_cophenetic_distance(
    tree: PhyloTree,
    #[case] first: &str,
    #[case] second: &str,
    #[case] expected: f64,
) {
    assert_eq!(tree.cophenetic_distance(first, second), Some(expected));
}

#[test]
fn test_cophenetic_distance_is_ultrametric() {
    let tree = build_tree(synthetic_alignment(9, 20)).unwrap();
    let leaves: Vec<&str> = tree.all_leaf_sequences().iter().map(|s| s.name()).collect();
    let d = |a: &str, b: &str| tree.cophenetic_distance(a, b).unwrap();

    for &x in &leaves {
        for &y in &leaves {
            assert_eq!(d(x, y), d(y, x));
            for &z in &leaves {
                assert!(d(x, z) <= d(x, y).max(d(y, z)) + 1e-12);
            }
        }
    }
    assert_eq!(tree.cophenetic_distance("S000", "Moa"), None);
}

// =#========================================================================#=
// LEAVES & TRAVERSAL
// =#========================================================================#=

#[rstest]
fn test_all_leaf_sequences(tree: PhyloTree) {
    let names: Vec<&str> = tree.all_leaf_sequences().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);
    assert_eq!(tree.all_leaf_sequences()[2].symbols(), b"ACGT");
}

#[rstest]
fn test_traversals(tree: PhyloTree) {
    let post: Vec<&str> = tree.post_order_iter().map(|v| v.label()).collect();
    assert_eq!(post, vec!["C", "B", "A", "A+B", "A+B+C"]);

    let pre: Vec<&str> = tree.pre_order_iter().map(|v| v.label()).collect();
    assert_eq!(pre, vec!["A+B+C", "C", "A+B", "B", "A"]);
}

#[test]
fn test_concurrent_queries() {
    let tree = four_species_tree();
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["A", "B", "C"]
            .into_iter()
            .map(|label| {
                let tree = &tree;
                scope.spawn(move || tree.evolutionary_distance(label, "D"))
            })
            .collect();
        let distances: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(distances, vec![1.0625, 1.0625, 0.9375]);
    });
}

// =#========================================================================#=
// VISUAL
// =#========================================================================#=

#[rstest]
fn test_visual_string(tree: PhyloTree) {
    let expected = format!(
        "{}A\n{}A+B\n{}B\nA+B+C\n{}C\n",
        dots(100),
        dots(60),
        dots(100),
        dots(60)
    );
    assert_eq!(tree.to_visual_string(&VisualLayout::default()), expected);
}

#[rstest]
fn test_visual_string_custom_layout(tree: PhyloTree) {
    let layout = VisualLayout {
        printing_depth: 10,
        fill: '-',
    };
    assert_eq!(
        tree.to_visual_string(&layout),
        "----------A\n------A+B\n----------B\nA+B+C\n------C\n"
    );
}

#[test]
fn test_visual_string_without_depth() {
    let single = build_tree(vec![Sequence::new("Kea", "AC")]).unwrap();
    assert_eq!(single.to_visual_string(&VisualLayout::default()), "Kea\n");

    let identical = build_tree(vec![Sequence::new("A", "AC"), Sequence::new("B", "AC")]).unwrap();
    assert_eq!(
        identical.to_visual_string(&VisualLayout::with_depth(20)),
        "A\nA+B\nB\n"
    );
}

#[test]
fn test_visual_string_four_species() {
    let tree = four_species_tree();
    // weighted depths: A, B 0.6875; A+B, C 0.5625; A+B+C, D 0.375
    let visual = tree.to_visual_string(&VisualLayout::with_depth(11));
    assert_eq!(
        visual,
        format!(
            "{}A\n{}A+B\n{}B\n{}A+B+C\n{}C\nA+B+C+D\n{}D\n",
            dots(11),
            dots(9),
            dots(11),
            dots(6),
            dots(9),
            dots(6)
        )
    );
}
