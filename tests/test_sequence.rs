use phyloclust::model::{AlignmentMismatchError, Sequence, sequence_distance};
use rstest::rstest;

#[rstest]
#[case("ACGT", "ACGT", 0.0)]
#[case("ACGT", "ACGA", 0.25)]
#[case("ACGT", "TCGA", 0.5)]
#[case("ACGT", "TGCA", 1.0)]
#[case("A-GT", "ACGT", 0.25)]
#[case("acgt", "ACGT", 1.0)]
fn test_sequence_distance(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
    let a = Sequence::new("a", a);
    let b = Sequence::new("b", b);
    assert_eq!(sequence_distance(&a, &b).unwrap(), expected);
    assert_eq!(sequence_distance(&b, &a).unwrap(), expected);
}

#[test]
fn test_sequence_distance_of_empty_sequences() {
    let a = Sequence::new("Tui", "");
    let b = Sequence::new("Kea", "");
    assert!(a.is_empty());
    assert_eq!(sequence_distance(&a, &b).unwrap(), 0.0);
}

#[test]
fn test_sequence_distance_length_mismatch() {
    let a = Sequence::new("Tui", "ACGT");
    let b = Sequence::new("Kea", "ACG");

    let err = sequence_distance(&a, &b).unwrap_err();
    assert_eq!(
        err,
        AlignmentMismatchError {
            first: "Tui".to_string(),
            second: "Kea".to_string(),
            first_len: 4,
            second_len: 3,
        }
    );
    assert!(err.to_string().contains("'Tui' has 4 symbols"));
}

#[test]
fn test_sequence_accessors() {
    let seq = Sequence::new(String::from("Takahe"), b"AC-T".to_vec());
    assert_eq!(seq.name(), "Takahe");
    assert_eq!(seq.symbols(), b"AC-T");
    assert_eq!(seq.len(), 4);
    assert!(!seq.is_empty());
}
