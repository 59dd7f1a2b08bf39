mod common;

use common::{four_species_tree, synthetic_alignment, three_species_tree};
use phyloclust::build_tree;
use phyloclust::model::Sequence;
use phyloclust::newick::{NewickStyle, to_newick, write_newick_file};
use std::fs::{self, File};
use tempfile::TempDir;

#[test]
fn test_newick_three_species() {
    let tree = three_species_tree();
    assert_eq!(
        tree.to_newick(&NewickStyle::default()),
        "((A:0.12500,B:0.12500):0.18750,C:0.18750);"
    );
    assert_eq!(
        to_newick(&NewickStyle::Shortest, &tree),
        "((A:0.125,B:0.125):0.1875,C:0.1875);"
    );
    assert_eq!(
        tree.to_newick(&NewickStyle::Fixed(0)),
        "((A:0,B:0):0,C:0);"
    );
}

#[test]
fn test_newick_four_species() {
    let tree = four_species_tree();
    assert_eq!(
        tree.to_newick(&NewickStyle::default()),
        "(((A:0.12500,B:0.12500):0.18750,C:0.18750):0.37500,D:0.37500);"
    );
}

#[test]
fn test_newick_single_leaf() {
    let tree = build_tree(vec![Sequence::new("Kokako", "ACGT")]).unwrap();
    assert_eq!(tree.to_newick(&NewickStyle::default()), "Kokako;");
}

#[test]
fn test_newick_escapes_leaf_labels() {
    let tree = build_tree(vec![
        Sequence::new("Pukeko", "AC"),
        Sequence::new("Baillon's Crake", "AG"),
    ])
    .unwrap();
    assert_eq!(
        tree.to_newick(&NewickStyle::Shortest),
        "('Baillon''s Crake':0.25,Pukeko:0.25);"
    );
}

#[test]
fn test_newick_structure_of_larger_tree() {
    let sequences = synthetic_alignment(30, 50);
    let tree = build_tree(sequences.clone()).unwrap();
    let newick = tree.to_newick(&NewickStyle::default());

    assert!(newick.ends_with(");"));
    assert_eq!(newick.matches('(').count(), tree.num_internal());
    assert_eq!(newick.matches(')').count(), tree.num_internal());
    assert_eq!(newick.matches(':').count(), tree.num_vertices() - 1);

    let mut depth = 0i32;
    for c in newick.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);

    for sequence in &sequences {
        let label = format!("{}:", sequence.name());
        assert_eq!(newick.matches(label.as_str()).count(), 1);
    }
}

#[test]
fn test_write_newick_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trees.tree");
    let trees = vec![three_species_tree(), four_species_tree()];

    write_newick_file(File::create(&path).unwrap(), &trees, &NewickStyle::Shortest).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "((A:0.125,B:0.125):0.1875,C:0.1875);");
    assert_eq!(
        lines[1],
        "(((A:0.125,B:0.125):0.1875,C:0.1875):0.375,D:0.375);"
    );
}
