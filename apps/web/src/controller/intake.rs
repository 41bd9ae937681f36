//! File Intake: click-to-browse, drag-and-drop, validation and staging.

use tracing::{debug, info, warn};

use super::Controller;
use crate::models::file::{is_accepted_filename, StagedFile, CHOOSER_ACCEPT_FILTER};
use crate::ui::toast::ToastLevel;
use crate::ui::FileSelection;

pub const INVALID_FILE_MESSAGE: &str = "Please select a .txt, .md, or .pdf file.";

/// Asks the shell to open its native file chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileChooserRequest {
    pub accept: &'static str,
    pub multiple: bool,
}

impl Controller {
    pub fn on_drop_zone_clicked(&self) -> FileChooserRequest {
        FileChooserRequest {
            accept: CHOOSER_ACCEPT_FILTER,
            multiple: false,
        }
    }

    pub fn on_drag_over(&self) {
        self.with_state(|s| s.page.drop_zone.drag_active = true);
    }

    pub fn on_drag_leave(&self) {
        self.with_state(|s| s.page.drop_zone.drag_active = false);
    }

    /// Only the first dropped file is considered.
    pub fn on_files_dropped(&self, files: Vec<StagedFile>) -> bool {
        self.with_state(|s| s.page.drop_zone.drag_active = false);
        match files.into_iter().next() {
            Some(file) => self.stage_file(file),
            None => false,
        }
    }

    pub fn on_file_chosen(&self, file: StagedFile) -> bool {
        self.stage_file(file)
    }

    /// Validates and stages `file`. A rejected file leaves any earlier staging in place.
    pub fn stage_file(&self, file: StagedFile) -> bool {
        if !is_accepted_filename(&file.name) {
            warn!("Rejected file with unsupported extension: {}", file.name);
            self.show_toast(INVALID_FILE_MESSAGE, ToastLevel::Error);
            return false;
        }

        info!("Staged {} ({} bytes)", file.name, file.size_bytes());
        self.with_state(|s| {
            s.page.drop_zone.selection = Some(FileSelection {
                name: file.name.clone(),
                size_label: file.size_label(),
            });
            s.page.enable_upload();
            if let Some(previous) = s.session.stage(file) {
                debug!("Discarded previously staged {}", previous.name);
            }
        });
        true
    }
}
