use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{normalize_target_lang, TranslateConfig};
use crate::error::{ItemFailure, ProviderError, WorkflowError, WorkflowResult};
use crate::lister::FolderLister;
use crate::names::{sanitize_filename, split_extension, validate_name};
use crate::renamer::Renamer;
use crate::translator::Translator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub original_name: String,
    pub translated_name: String,
}

impl PreviewEntry {
    pub fn is_unchanged(&self) -> bool {
        self.original_name == self.translated_name
    }
}

/// Proposed renames for one folder snapshot, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSet {
    folder: PathBuf,
    generation: u64,
    entries: Vec<PreviewEntry>,
}

impl PreviewSet {
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn entries(&self) -> &[PreviewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PreviewReport {
    pub preview: PreviewSet,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub renamed: Vec<PreviewEntry>,
    pub unchanged: Vec<PreviewEntry>,
    pub failures: Vec<ItemFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Translating,
    Renaming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub phase: Phase,
    pub done: usize,
    pub total: usize,
    pub current: String,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    FolderSelected,
    Previewed,
    /// Some renames of the last batch failed; the folder stays selected.
    PartiallyApplied,
}

pub struct WorkflowController<L, T, R> {
    config: TranslateConfig,
    lister: L,
    translator: T,
    renamer: R,
    selection: Option<PathBuf>,
    preview: Option<PreviewSet>,
    state: WorkflowState,
    generation: u64,
}

impl<L, T, R> WorkflowController<L, T, R>
where
    L: FolderLister,
    T: Translator,
    R: Renamer,
{
    pub fn new(config: TranslateConfig, lister: L, translator: T, renamer: R) -> Self {
        Self {
            config,
            lister,
            translator,
            renamer,
            selection: None,
            preview: None,
            state: WorkflowState::Idle,
            generation: 0,
        }
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    pub fn current_preview(&self) -> Option<&PreviewSet> {
        self.preview.as_ref()
    }

    /// Changes the locale names are translated into. A preview made for the
    /// old language can no longer be applied.
    pub fn set_target_lang(&mut self, lang: &str) -> WorkflowResult<()> {
        let lang = normalize_target_lang(lang).ok_or_else(|| {
            WorkflowError::validation(format!("Invalid target language: {}", lang.trim()))
        })?;
        if lang == self.config.target_lang {
            return Ok(());
        }

        info!("Target language {} -> {}", self.config.target_lang, lang);
        self.config.target_lang = lang;
        if self.preview.take().is_some() {
            self.state = WorkflowState::FolderSelected;
        }
        Ok(())
    }

    pub fn select_folder(&mut self, path: impl AsRef<Path>) -> WorkflowResult<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(WorkflowError::validation(format!(
                "Not a directory: {}",
                path.display()
            )));
        }

        let path = std::path::absolute(path).map_err(|e| {
            WorkflowError::validation(format!("Cannot resolve {}: {}", path.display(), e))
        })?;

        info!("Selected folder {:?}", path);
        self.selection = Some(path);
        self.preview = None;
        self.state = WorkflowState::FolderSelected;
        Ok(())
    }

    /// Translates every child of the selected folder. Items that fail to
    /// translate are reported in `failures` and left out of the preview.
    pub fn preview(
        &mut self,
        api_key: &str,
        mut on_progress: impl FnMut(Progress),
    ) -> WorkflowResult<PreviewReport> {
        let folder = self
            .selection
            .clone()
            .ok_or_else(|| WorkflowError::validation("Select a folder first"))?;

        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(WorkflowError::validation("Enter an API key first"));
        }

        let listing = self
            .lister
            .list(&folder)
            .map_err(|source| WorkflowError::Listing {
                path: folder.clone(),
                source,
            })?;
        let names = listing.names;

        let total = names.len();
        info!("Translating {} item(s) in {:?} to {}", total, folder, self.config.target_lang);

        let mut entries = Vec::with_capacity(total);
        let mut failures: Vec<_> = listing
            .undecodable
            .into_iter()
            .map(|name| ItemFailure::new(name, ProviderError::UndecodableName))
            .collect();

        for (i, name) in names.into_iter().enumerate() {
            on_progress(Progress {
                phase: Phase::Translating,
                done: i,
                total,
                current: name.clone(),
            });

            match self.translate_name(api_key, &name) {
                Ok(translated_name) => entries.push(PreviewEntry {
                    original_name: name,
                    translated_name,
                }),
                Err(e) => {
                    warn!("Translation of '{}' failed: {}", name, e);
                    failures.push(ItemFailure::new(name, e));
                }
            }
        }

        on_progress(Progress {
            phase: Phase::Translating,
            done: total,
            total,
            current: String::new(),
        });

        self.generation += 1;
        let preview = PreviewSet {
            folder,
            generation: self.generation,
            entries,
        };

        self.preview = Some(preview.clone());
        self.state = WorkflowState::Previewed;

        Ok(PreviewReport { preview, failures })
    }

    fn translate_name(&self, api_key: &str, name: &str) -> Result<String, ProviderError> {
        let (source, suffix) = if self.config.keep_extension {
            split_extension(name)
        } else {
            (name, "")
        };

        let translated = self
            .translator
            .translate(api_key, source, &self.config.target_lang)?;

        let translated = if self.config.sanitize {
            sanitize_filename(&translated)
        } else {
            translated
        };

        if translated.trim().is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }

        let full = format!("{}{}", translated, suffix);
        validate_name(&full)?;
        Ok(full)
    }

    /// Renames every entry of `preview` inside `folder`. Failed items are
    /// collected and the batch carries on; nothing is rolled back.
    pub fn apply(
        &mut self,
        folder: &Path,
        preview: &PreviewSet,
        confirmed: bool,
        mut on_progress: impl FnMut(Progress),
    ) -> WorkflowResult<ApplyReport> {
        let selection = self
            .selection
            .as_deref()
            .ok_or_else(|| WorkflowError::validation("Select a folder first"))?;

        if preview.is_empty() {
            return Err(WorkflowError::validation("Run a preview first"));
        }

        let is_current = self
            .preview
            .as_ref()
            .is_some_and(|p| p.generation == preview.generation);
        if !is_current || preview.folder != selection || !same_folder(folder, selection) {
            return Err(WorkflowError::validation(
                "Preview is out of date for the selected folder, run it again",
            ));
        }

        if !confirmed {
            return Err(WorkflowError::Cancelled);
        }

        let folder = selection.to_path_buf();
        let total = preview.len();
        info!("Renaming {} item(s) in {:?}", total, folder);

        let mut report = ApplyReport::default();

        for (i, entry) in preview.entries().iter().enumerate() {
            on_progress(Progress {
                phase: Phase::Renaming,
                done: i,
                total,
                current: entry.original_name.clone(),
            });

            if entry.is_unchanged() {
                report.unchanged.push(entry.clone());
                continue;
            }

            let from = folder.join(&entry.original_name);
            let to = folder.join(&entry.translated_name);

            match self.renamer.rename(&from, &to) {
                Ok(()) => report.renamed.push(entry.clone()),
                Err(e) => {
                    warn!(
                        "Renaming '{}' to '{}' failed: {}",
                        entry.original_name, entry.translated_name, e
                    );
                    report
                        .failures
                        .push(ItemFailure::new(entry.original_name.clone(), e));
                }
            }
        }

        on_progress(Progress {
            phase: Phase::Renaming,
            done: total,
            total,
            current: String::new(),
        });

        // The batch consumed this preview either way
        self.preview = None;

        if report.is_success() {
            info!("Renamed {} item(s)", report.renamed.len());
            self.selection = None;
            self.state = WorkflowState::Idle;
        } else {
            warn!(
                "{} of {} rename(s) failed",
                report.failures.len(),
                total
            );
            self.state = WorkflowState::PartiallyApplied;
        }

        Ok(report)
    }
}

fn same_folder(a: &Path, b: &Path) -> bool {
    a == b || std::path::absolute(a).is_ok_and(|a| a == b)
}
