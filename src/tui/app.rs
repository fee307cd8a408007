use std::time::{Duration, Instant};

use ratatui::widgets::{ListState, ScrollbarState};

use crate::error::ItemFailure;
use crate::lister::FsLister;
use crate::renamer::FsRenamer;
use crate::translator::Translator;
use crate::workflow::{PreviewSet, WorkflowController};
use super::models::{FileItem, ProcessingStats, SetupField};

pub type Session = WorkflowController<FsLister, Box<dyn Translator>, FsRenamer>;

pub struct App {
    pub workflow: Session,
    pub files: Vec<FileItem>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    pub preview: Option<PreviewSet>,
    pub failures: Vec<ItemFailure>,
    pub show_failures: bool,
    pub show_help: bool,
    pub show_preview: bool,
    pub show_setup: bool,
    pub show_confirm: bool,
    pub setup_field: SetupField,
    pub folder_input: String,
    pub api_key_input: String,
    pub lang_input: String,
    pub finished: bool,
    pub stats: ProcessingStats,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(workflow: Session) -> Self {
        let lang_input = workflow.config().target_lang.clone();

        Self {
            workflow,
            files: Vec::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
            preview: None,
            failures: Vec::new(),
            show_failures: false,
            show_help: false,
            show_preview: true,
            show_setup: true,
            show_confirm: false,
            setup_field: SetupField::Folder,
            folder_input: String::new(),
            api_key_input: String::new(),
            lang_input,
            finished: false,
            stats: ProcessingStats::default(),
            status_message: None,
            status_message_time: None,
        }
    }

    pub fn with_inputs(workflow: Session, folder: Option<String>, api_key: Option<String>) -> Self {
        let mut app = Self::new(workflow);
        app.folder_input = folder.unwrap_or_default();
        app.api_key_input = api_key.unwrap_or_default();

        // Start on the first field that still needs input
        if !app.folder_input.is_empty() {
            app.setup_field = if app.api_key_input.is_empty() {
                SetupField::ApiKey
            } else {
                SetupField::TargetLang
            };
        }
        app
    }

    pub fn next(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.files.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.select(i);
    }

    pub fn previous(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.files.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.select(i);
    }

    fn select(&mut self, i: usize) {
        self.list_state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i);
    }

    pub fn selected_file(&self) -> Option<&FileItem> {
        self.list_state.selected().and_then(|i| self.files.get(i))
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_failures(&mut self) {
        self.show_failures = !self.show_failures;
    }

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message_if_expired(&mut self) {
        if let (Some(_), Some(time)) = (&self.status_message, self.status_message_time) {
            if time.elapsed() > Duration::from_secs(5) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
