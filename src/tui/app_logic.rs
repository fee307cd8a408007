use crossterm::event::KeyCode;

use super::app::App;
use super::models::SetupField;

impl App {
    fn current_input(&mut self) -> &mut String {
        match self.setup_field {
            SetupField::Folder => &mut self.folder_input,
            SetupField::ApiKey => &mut self.api_key_input,
            SetupField::TargetLang => &mut self.lang_input,
        }
    }

    pub fn handle_setup_input(&mut self, c: char) {
        match self.setup_field {
            SetupField::TargetLang => {
                if (c.is_ascii_alphabetic() || c == '-') && self.lang_input.len() < 8 {
                    self.lang_input.push(c.to_ascii_uppercase());
                }
            }
            _ => {
                if !c.is_control() {
                    self.current_input().push(c);
                }
            }
        }
    }

    pub fn handle_setup_backspace(&mut self) {
        self.current_input().pop();
    }

    pub fn handle_setup_navigation(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Tab => self.setup_field = self.setup_field.next(),
            KeyCode::Up | KeyCode::BackTab => self.setup_field = self.setup_field.previous(),
            _ => {}
        }
    }

    /// Setup is complete once every field has something in it.
    pub fn setup_ready(&self) -> bool {
        !self.folder_input.trim().is_empty()
            && !self.api_key_input.trim().is_empty()
            && !self.lang_input.trim().is_empty()
    }

    /// Returns to the setup screen to pick another folder or key.
    pub fn back_to_setup(&mut self) {
        self.show_setup = true;
        self.show_confirm = false;
        self.setup_field = SetupField::Folder;
    }

    pub fn request_confirmation(&mut self) {
        match &self.preview {
            Some(preview) if !preview.is_empty() && !self.finished => self.show_confirm = true,
            _ => self.set_status_message("Nothing to rename, run a preview first".to_string()),
        }
    }

    pub fn masked_api_key(&self) -> String {
        "*".repeat(self.api_key_input.chars().count())
    }
}
