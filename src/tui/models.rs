#[derive(Debug, Clone)]
pub struct FileItem {
    pub original_name: String,
    /// `None` when the name could not be translated.
    pub translated_name: Option<String>,
    pub status: ItemStatus,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemStatus {
    Pending,
    Unchanged,
    Renamed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetupField {
    Folder,
    ApiKey,
    TargetLang,
}

impl SetupField {
    pub fn next(self) -> Self {
        match self {
            SetupField::Folder => SetupField::ApiKey,
            SetupField::ApiKey => SetupField::TargetLang,
            SetupField::TargetLang => SetupField::Folder,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SetupField::Folder => SetupField::TargetLang,
            SetupField::ApiKey => SetupField::Folder,
            SetupField::TargetLang => SetupField::ApiKey,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct ProcessingStats {
    pub total: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub failed: usize,
}
