//! Translate the names of a folder's immediate children and rename them after review.
//!
//! The [`workflow::WorkflowController`] drives the select / preview / apply cycle
//! over three seams: a [`lister::FolderLister`], a [`translator::Translator`] and a
//! [`renamer::Renamer`]. Per-item failures never abort a batch; they are collected
//! and returned alongside the results.

pub mod config;
pub mod error;
pub mod lister;
pub mod names;
pub mod renamer;
pub mod translator;
pub mod tui;
pub mod workflow;

pub use config::{ConfigBuilder, ListingPolicy, TranslateConfig};
pub use error::{FileSystemError, ItemError, ItemFailure, ProviderError, WorkflowError};
pub use workflow::{
    ApplyReport, Phase, PreviewEntry, PreviewReport, PreviewSet, Progress, WorkflowController,
    WorkflowState,
};
