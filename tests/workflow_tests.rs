// Integration tests for the select / preview / apply workflow against a real folder

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use folder_translate::lister::{FolderLister, FsLister};
use folder_translate::renamer::{FsRenamer, Renamer};
use folder_translate::translator::Translator;
use folder_translate::{
    ConfigBuilder, FileSystemError, ItemError, ItemFailure, PreviewEntry, ProviderError,
    TranslateConfig, WorkflowController, WorkflowError, WorkflowState,
};

struct Dictionary(HashMap<String, Result<String, ProviderError>>);

impl Dictionary {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Dictionary(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Ok(v.to_string())))
                .collect(),
        )
    }

    fn failing(mut self, word: &str, err: ProviderError) -> Self {
        self.0.insert(word.to_string(), Err(err));
        self
    }
}

impl Translator for Dictionary {
    fn translate(&self, api_key: &str, text: &str, target_lang: &str) -> Result<String, ProviderError> {
        assert_eq!(api_key, "test-key");
        assert_eq!(target_lang, "JA");
        self.0.get(text).cloned().unwrap_or_else(|| Ok(text.to_string()))
    }
}

/// Counts calls so tests can assert that nothing touched the disk.
struct CountingRenamer<'a>(&'a std::cell::Cell<usize>);

impl Renamer for CountingRenamer<'_> {
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        self.0.set(self.0.get() + 1);
        FsRenamer.rename(from, to)
    }
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), name).unwrap();
}

fn controller(dict: Dictionary) -> WorkflowController<FsLister, Dictionary, FsRenamer> {
    WorkflowController::new(TranslateConfig::default(), FsLister::default(), dict, FsRenamer)
}

#[test]
fn test_preview_has_one_entry_per_child_in_listing_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c", "a", "b"] {
        touch(dir.path(), name);
    }
    fs::create_dir(dir.path().join("d")).unwrap();
    touch(&dir.path().join("d"), "nested");

    let mut wf = controller(Dictionary::new(&[]));
    wf.select_folder(dir.path()).unwrap();
    let report = wf.preview("test-key", |_| {}).unwrap();

    let listed = FsLister::default().list(dir.path()).unwrap().names;
    let originals: Vec<_> = report
        .preview
        .entries()
        .iter()
        .map(|e| e.original_name.clone())
        .collect();

    assert_eq!(report.preview.len(), 4);
    assert_eq!(originals, listed);
    assert!(report.failures.is_empty());
    assert_eq!(wf.state(), WorkflowState::Previewed);
}

#[test]
fn test_failed_translation_does_not_block_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["bird", "cat", "dog"] {
        touch(dir.path(), name);
    }

    let dict = Dictionary::new(&[("cat", "猫"), ("dog", "犬")])
        .failing("bird", ProviderError::Network("timed out".to_string()));
    let mut wf = controller(dict);
    wf.select_folder(dir.path()).unwrap();

    let mut fractions = Vec::new();
    let report = wf.preview("test-key", |p| fractions.push(p.fraction())).unwrap();

    assert_eq!(report.preview.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "bird");
    assert_eq!(fractions.last(), Some(&1.0));
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_apply_with_empty_preview_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let calls = std::cell::Cell::new(0);
    let mut wf = WorkflowController::new(
        TranslateConfig::default(),
        FsLister::default(),
        Dictionary::new(&[]),
        CountingRenamer(&calls),
    );
    wf.select_folder(dir.path()).unwrap();

    let report = wf.preview("test-key", |_| {}).unwrap();
    assert!(report.preview.is_empty());

    let folder = wf.selection().unwrap().to_path_buf();
    let result = wf.apply(&folder, &report.preview, true, |_| {});

    assert!(matches!(result, Err(WorkflowError::Validation(_))));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_unchanged_name_is_a_noop_success() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "東京");

    let calls = std::cell::Cell::new(0);
    let mut wf = WorkflowController::new(
        TranslateConfig::default(),
        FsLister::default(),
        Dictionary::new(&[]),
        CountingRenamer(&calls),
    );
    wf.select_folder(dir.path()).unwrap();
    let preview = wf.preview("test-key", |_| {}).unwrap().preview;
    let folder = wf.selection().unwrap().to_path_buf();

    let report = wf.apply(&folder, &preview, true, |_| {}).unwrap();

    assert!(report.is_success());
    assert_eq!(calls.get(), 0);
    assert!(dir.path().join("東京").exists());
}

#[test]
fn test_end_to_end_rename() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "dog");
    touch(dir.path(), "cat");

    let mut wf = controller(Dictionary::new(&[("dog", "犬"), ("cat", "猫")]));
    wf.select_folder(dir.path()).unwrap();
    let preview = wf.preview("test-key", |_| {}).unwrap().preview;

    // FsLister sorts, so "cat" comes first
    assert_eq!(
        preview.entries(),
        &[
            PreviewEntry {
                original_name: "cat".to_string(),
                translated_name: "猫".to_string()
            },
            PreviewEntry {
                original_name: "dog".to_string(),
                translated_name: "犬".to_string()
            },
        ]
    );

    let folder = wf.selection().unwrap().to_path_buf();
    let report = wf.apply(&folder, &preview, true, |_| {}).unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(report.renamed.len(), 2);
    assert_eq!(fs::read_to_string(dir.path().join("犬")).unwrap(), "dog");
    assert_eq!(fs::read_to_string(dir.path().join("猫")).unwrap(), "cat");
    assert!(!dir.path().join("dog").exists());

    assert_eq!(wf.state(), WorkflowState::Idle);
    assert!(wf.selection().is_none());
    assert!(wf.current_preview().is_none());
}

#[test]
fn test_end_to_end_destination_exists() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "dog");

    let mut wf = controller(Dictionary::new(&[("dog", "犬")]));
    wf.select_folder(dir.path()).unwrap();
    let preview = wf.preview("test-key", |_| {}).unwrap().preview;

    // Something claims the name between preview and apply
    fs::write(dir.path().join("犬"), "squatter").unwrap();

    let folder = wf.selection().unwrap().to_path_buf();
    let report = wf.apply(&folder, &preview, true, |_| {}).unwrap();

    assert_eq!(
        report.failures,
        vec![ItemFailure::new("dog", FileSystemError::AlreadyExists)]
    );
    assert_eq!(wf.state(), WorkflowState::PartiallyApplied);
    assert_eq!(wf.selection(), Some(folder.as_path()));
    assert_eq!(fs::read_to_string(dir.path().join("犬")).unwrap(), "squatter");
    assert!(dir.path().join("dog").exists());
}

#[test]
fn test_unconfirmed_apply_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "dog");

    let mut wf = controller(Dictionary::new(&[("dog", "犬")]));
    wf.select_folder(dir.path()).unwrap();
    let preview = wf.preview("test-key", |_| {}).unwrap().preview;
    let folder = wf.selection().unwrap().to_path_buf();

    let result = wf.apply(&folder, &preview, false, |_| {});

    assert!(matches!(result, Err(WorkflowError::Cancelled)));
    assert!(dir.path().join("dog").exists());
    assert_eq!(wf.state(), WorkflowState::Previewed);
}

#[test]
fn test_preview_for_another_folder_is_rejected() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    touch(first.path(), "dog");
    touch(second.path(), "dog");

    let mut wf = controller(Dictionary::new(&[("dog", "犬")]));
    wf.select_folder(first.path()).unwrap();
    let preview = wf.preview("test-key", |_| {}).unwrap().preview;

    wf.select_folder(second.path()).unwrap();
    let result = wf.apply(second.path(), &preview, true, |_| {});

    assert!(matches!(result, Err(WorkflowError::Validation(_))));
    assert!(first.path().join("dog").exists());
    assert!(second.path().join("dog").exists());
}

#[test]
fn test_hidden_entries_can_be_excluded() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), ".git");
    touch(dir.path(), "dog");

    let config = ConfigBuilder::new().include_hidden(false).build().unwrap();
    let lister = FsLister::new(config.listing);
    let mut wf = WorkflowController::new(config, lister, Dictionary::new(&[("dog", "犬")]), FsRenamer);
    wf.select_folder(dir.path()).unwrap();

    let report = wf.preview("test-key", |_| {}).unwrap();
    assert_eq!(report.preview.len(), 1);
    assert_eq!(report.preview.entries()[0].original_name, "dog");
}

#[test]
fn test_keep_extension_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "invoice.pdf");

    let config = ConfigBuilder::new().keep_extension(true).build().unwrap();
    let mut wf = WorkflowController::new(
        config,
        FsLister::default(),
        Dictionary::new(&[("invoice", "請求書")]),
        FsRenamer,
    );
    wf.select_folder(dir.path()).unwrap();
    let preview = wf.preview("test-key", |_| {}).unwrap().preview;
    let folder = wf.selection().unwrap().to_path_buf();

    wf.apply(&folder, &preview, true, |_| {}).unwrap();
    assert!(dir.path().join("請求書.pdf").exists());
}

#[test]
fn test_translation_cannot_escape_the_folder() {
    let parent = tempfile::tempdir().unwrap();
    let dir = parent.path().join("work");
    fs::create_dir(&dir).unwrap();
    touch(&dir, "dog");

    let config = ConfigBuilder::new().sanitize(false).build().unwrap();
    let mut wf = WorkflowController::new(
        config,
        FsLister::default(),
        Dictionary::new(&[("dog", "../犬")]),
        FsRenamer,
    );
    wf.select_folder(&dir).unwrap();
    let report = wf.preview("test-key", |_| {}).unwrap();

    assert!(report.preview.is_empty());
    assert!(matches!(
        report.failures[0].error,
        ItemError::Provider(ProviderError::InvalidName(_))
    ));
}

#[test]
fn test_missing_folder_reported_at_selection() {
    let dir = tempfile::tempdir().unwrap();
    let mut wf = controller(Dictionary::new(&[]));

    let result = wf.select_folder(dir.path().join("nope"));
    assert!(matches!(result, Err(WorkflowError::Validation(_))));
    assert_eq!(wf.state(), WorkflowState::Idle);
}

#[test]
fn test_folder_removed_before_preview_is_a_listing_error() {
    let parent = tempfile::tempdir().unwrap();
    let dir = parent.path().join("gone");
    fs::create_dir(&dir).unwrap();

    let mut wf = controller(Dictionary::new(&[]));
    wf.select_folder(&dir).unwrap();
    fs::remove_dir(&dir).unwrap();

    assert!(matches!(
        wf.preview("test-key", |_| {}),
        Err(WorkflowError::Listing { .. })
    ));
}

#[cfg(unix)]
#[test]
fn test_undecodable_name_is_reported_as_a_failure() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff")), "").unwrap();
    touch(dir.path(), "dog");

    let mut wf = controller(Dictionary::new(&[("dog", "犬")]));
    wf.select_folder(dir.path()).unwrap();
    let report = wf.preview("test-key", |_| {}).unwrap();

    assert_eq!(report.preview.len(), 1);
    assert_eq!(report.preview.entries()[0].original_name, "dog");
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].name.starts_with("bad"));
    assert_eq!(
        report.failures[0].error,
        ItemError::Provider(ProviderError::UndecodableName)
    );
}
