use std::fs;

use fuq_qoi::{existing_copies, next_copy_start};
use tempfile::tempdir;

#[test]
fn empty_run_dir_starts_at_zero() {
    let dir = tempdir().unwrap();
    assert_eq!(next_copy_start(dir.path(), "copy_", false, 0).unwrap(), 0);
}

#[test]
fn numbering_continues_after_highest_copy() {
    let dir = tempdir().unwrap();
    for name in ["copy_0", "copy_1", "copy_10", "copy_x", "other_20"] {
        fs::create_dir_all(dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("copy_99"), "not a directory").unwrap();

    assert_eq!(existing_copies(dir.path(), "copy_").unwrap(), vec![0, 1, 10]);
    assert_eq!(next_copy_start(dir.path(), "copy_", false, 0).unwrap(), 11);
}

#[test]
fn overwrite_and_explicit_start() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("copy_4")).unwrap();
    assert_eq!(next_copy_start(dir.path(), "copy_", true, 0).unwrap(), 0);
    assert_eq!(next_copy_start(dir.path(), "copy_", false, 2).unwrap(), 2);
    assert_eq!(next_copy_start(dir.path(), "copy_", true, 8).unwrap(), 8);
}
