use fuq_thermo::{align_rows, Alignment};
use ndarray::{s, Array2};
use proptest::prelude::*;

fn table(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as f64)
}

#[test]
fn matching_row_count_is_identity() {
    let input = table(100, 4);
    let output = align_rows(100, input.clone());
    assert_eq!(output, input);
    assert_eq!(Alignment::between(100, 100), Alignment::Unchanged);
}

#[test]
fn longer_tables_keep_their_first_rows() {
    let input = table(120, 3);
    let output = align_rows(100, input.clone());
    assert_eq!(output.dim(), (100, 3));
    assert_eq!(output, input.slice(s![..100, ..]));
    assert_eq!(Alignment::between(100, 120), Alignment::Truncated { dropped: 20 });
}

#[test]
fn shorter_tables_are_nan_padded() {
    let input = table(80, 3);
    let output = align_rows(100, input.clone());
    assert_eq!(output.dim(), (100, 3));
    assert_eq!(output.slice(s![..80, ..]), input);
    assert!(output.slice(s![80.., ..]).iter().all(|v| v.is_nan()));
    assert_eq!(Alignment::between(100, 80), Alignment::Padded { missing: 20 });
}

#[test]
fn empty_replicate_becomes_all_nan() {
    let output = align_rows(5, Array2::zeros((0, 2)));
    assert_eq!(output.dim(), (5, 2));
    assert!(output.iter().all(|v| v.is_nan()));
}

proptest! {
    #[test]
    fn output_always_has_target_rows(rows in 0usize..64, target in 0usize..64, cols in 1usize..6) {
        let input = table(rows, cols);
        let output = align_rows(target, input.clone());
        prop_assert_eq!(output.dim(), (target, cols));
        let kept = rows.min(target);
        prop_assert_eq!(output.slice(s![..kept, ..]), input.slice(s![..kept, ..]));
        prop_assert!(output.slice(s![kept.., ..]).iter().all(|v| v.is_nan()));
    }
}
