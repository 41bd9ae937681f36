//! View model for the single page. Pure data: coordinators mutate it, renderers read it.

pub mod loading;
pub mod markup;
pub mod results;
pub mod status;
pub mod terminal;
pub mod toast;

use loading::LoadingOverlay;
use results::{CopyButton, ResultsView};
use status::StatusBanner;
use toast::ToastStack;

/// What the drop zone shows once a file is staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropZone {
    /// Visual "active drop target" state while something is dragged over.
    pub drag_active: bool,
    pub clickable: bool,
    pub selection: Option<FileSelection>,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub status: StatusBanner,
    pub toasts: ToastStack,
    pub loading: LoadingOverlay,
    pub drop_zone: DropZone,
    pub upload_enabled: bool,
    pub tailor_enabled: bool,
    pub results: ResultsView,
    pub copy_button: CopyButton,
}

impl Page {
    pub fn enable_upload(&mut self) {
        self.upload_enabled = true;
        self.drop_zone.clickable = true;
    }
}
