use std::path::PathBuf;
use thiserror::Error;

/// Everything a user action can fail with. None of these are fatal: the user
/// fixes the cause and tries again.
#[derive(Error, Debug)]
pub enum TrimError {
    #[error("No images selected.")]
    NoImagesSelected,
    #[error("No output folder selected.")]
    NoOutputFolder,
    #[error("No image is being trimmed.")]
    NoImageShown,
    #[error("Could not open '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Could not write '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TrimError {
    /// Title for the message box this error is shown in.
    pub fn title(&self) -> &'static str {
        match self {
            TrimError::NoImagesSelected | TrimError::NoOutputFolder | TrimError::NoImageShown => {
                "Error"
            }
            TrimError::Decode { .. } => "Unreadable image",
            TrimError::Encode { .. } | TrimError::Io { .. } => "Save failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrimError>;
