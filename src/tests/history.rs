use super::super::history::HistoryStore;
use std::fs;

#[test]
fn push_assigns_one_based_index() {
    let mut h = HistoryStore::new();
    assert_eq!(h.push("echo a"), Some(1));
    assert_eq!(h.push("echo b"), Some(2));
    assert_eq!(h.push(""), None);
    assert_eq!(h.len(), 2);
}

#[test]
fn last_n_reports_true_positions() {
    let mut h = HistoryStore::new();
    for cmd in ["echo a", "echo b", "echo c"] {
        h.push(cmd);
    }
    let got: Vec<_> = h.last_n(2).collect();
    assert_eq!(got, vec![(2, "echo b"), (3, "echo c")]);
}

#[test]
fn last_n_larger_than_store_returns_everything() {
    let mut h = HistoryStore::new();
    h.push("only");
    let got: Vec<_> = h.last_n(10).collect();
    assert_eq!(got, vec![(1, "only")]);
}

#[test]
fn write_then_read_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hist");

    let mut h = HistoryStore::new();
    h.push("echo a");
    h.push("echo b");
    h.write_file(&path).unwrap();

    let mut h2 = HistoryStore::new();
    h2.read_file(&path).unwrap();
    assert_eq!(h2.len(), 2);
}

#[test]
fn append_only_flushes_unwritten_portion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hist");

    let mut h = HistoryStore::new();
    h.push("echo a");
    h.append_file(&path).unwrap();
    h.push("echo b");
    h.append_file(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "echo a\necho b\n");
}

#[test]
fn write_does_not_advance_append_mark() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hist");

    let mut h = HistoryStore::new();
    h.push("echo a");
    h.write_file(&path).unwrap();
    // -w does not advance the -a mark, so -a still has "echo a" to flush.
    let append_path = dir.path().join("appended");
    h.append_file(&append_path).unwrap();
    assert_eq!(fs::read_to_string(&append_path).unwrap(), "echo a\n");
}
