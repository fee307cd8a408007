use std::path::PathBuf;

use tracing::error;

use crate::error::{ItemFailure, WorkflowError};
use crate::workflow::{ApplyReport, PreviewReport, Progress};
use super::app::App;
use super::models::{FileItem, ItemStatus, ProcessingStats};

impl App {
    /// Selects the folder typed on the setup screen and translates its children.
    pub fn run_preview(&mut self, on_progress: impl FnMut(Progress)) {
        match self.try_preview(on_progress) {
            Ok(report) => {
                let failed = report.failures.len();
                self.load_preview(report);
                self.show_setup = false;

                if failed > 0 {
                    self.set_status_message(format!("{} name(s) could not be translated", failed));
                } else {
                    self.set_status_message(format!("Translated {} name(s)", self.files.len()));
                }
            }
            Err(e) => {
                error!("Preview failed: {}", e);
                self.set_status_message(format!("Error: {}", e));
            }
        }
    }

    fn try_preview(&mut self, on_progress: impl FnMut(Progress)) -> Result<PreviewReport, WorkflowError> {
        let folder = PathBuf::from(self.folder_input.trim());
        if folder.as_os_str().is_empty() {
            return Err(WorkflowError::validation("Select a folder first"));
        }

        self.workflow.select_folder(&folder)?;
        self.workflow.set_target_lang(&self.lang_input)?;
        self.workflow.preview(&self.api_key_input, on_progress)
    }

    fn load_preview(&mut self, report: PreviewReport) {
        let PreviewReport { preview, failures } = report;

        let mut files: Vec<FileItem> = preview
            .entries()
            .iter()
            .map(|entry| FileItem {
                original_name: entry.original_name.clone(),
                translated_name: Some(entry.translated_name.clone()),
                status: if entry.is_unchanged() {
                    ItemStatus::Unchanged
                } else {
                    ItemStatus::Pending
                },
                error_message: None,
            })
            .collect();

        files.extend(failures.iter().map(|failure| FileItem {
            original_name: failure.name.clone(),
            translated_name: None,
            status: ItemStatus::Failed,
            error_message: Some(failure.error.to_string()),
        }));

        self.stats = ProcessingStats {
            total: files.len(),
            failed: failures.len(),
            ..Default::default()
        };
        self.files = files;
        self.failures = failures;
        self.preview = Some(preview);
        self.finished = false;

        self.scroll_state = self.scroll_state.content_length(self.files.len());
        if self.files.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    /// Applies the current preview; `confirmed` is the user's answer to the prompt.
    pub fn run_apply(&mut self, confirmed: bool, on_progress: impl FnMut(Progress)) {
        self.show_confirm = false;

        let Some(preview) = self.preview.clone() else {
            self.set_status_message("Nothing to rename, run a preview first".to_string());
            return;
        };

        match self
            .workflow
            .apply(preview.folder(), &preview, confirmed, on_progress)
        {
            Ok(report) => {
                self.record_apply(report);
                self.preview = None;
                self.finished = true;
            }
            Err(WorkflowError::Cancelled) => {
                self.set_status_message("Rename cancelled".to_string());
            }
            Err(e) => {
                error!("Rename batch rejected: {}", e);
                self.set_status_message(format!("Error: {}", e));
            }
        }
    }

    fn record_apply(&mut self, report: ApplyReport) {
        for entry in &report.renamed {
            self.set_file_status(&entry.original_name, ItemStatus::Renamed, None);
        }
        for entry in &report.unchanged {
            self.set_file_status(&entry.original_name, ItemStatus::Unchanged, None);
        }
        for ItemFailure { name, error } in &report.failures {
            self.set_file_status(name, ItemStatus::Failed, Some(error.to_string()));
        }

        // stats.failed also counts translation failures from the preview
        let failed_renames = report.failures.len();
        self.stats.renamed = report.renamed.len();
        self.stats.unchanged = report.unchanged.len();
        self.stats.failed += failed_renames;
        self.failures.extend(report.failures);

        if failed_renames == 0 {
            self.set_status_message(format!("Renamed {} item(s)", self.stats.renamed));
        } else {
            self.set_status_message(format!(
                "{} rename(s) failed, see the failure list",
                failed_renames
            ));
        }
    }

    fn set_file_status(&mut self, name: &str, status: ItemStatus, error: Option<String>) {
        if let Some(file) = self.files.iter_mut().find(|f| f.original_name == name) {
            file.status = status;
            file.error_message = error;
        }
    }
}
