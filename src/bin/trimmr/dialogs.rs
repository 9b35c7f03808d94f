//! Native file pickers and message boxes.
//!
//! All of these block the UI loop until the user dismisses them.

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use trimmr::imaging::SUPPORTED_EXTENSIONS;

/// Asks for source images. Cancelling yields an empty list.
pub fn pick_images() -> Vec<PathBuf> {
    FileDialog::new()
        .set_title("Select Images")
        .add_filter("Image files", SUPPORTED_EXTENSIONS)
        .pick_files()
        .unwrap_or_default()
}

pub fn pick_output_folder() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select Output Folder")
        .pick_folder()
}

pub fn show_error(title: &str, message: &str) {
    show(MessageLevel::Error, title, message);
}

pub fn show_info(title: &str, message: &str) {
    show(MessageLevel::Info, title, message);
}

fn show(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
