//! The batch being trimmed: selected sources, position, output folder.

use crate::error::{Result, TrimError};
use std::path::{Path, PathBuf};

/// Result of moving past the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another image is waiting at the new index.
    Next,
    /// The last image was passed and the selection has been cleared.
    Finished,
}

#[derive(Debug, Default, Clone)]
pub struct Session {
    images: Vec<PathBuf>,
    index: usize,
    output_dir: Option<PathBuf>,
}

impl Session {
    pub fn new(images: Vec<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        Self {
            images,
            index: 0,
            output_dir,
        }
    }

    /// Replaces the selection. An empty selection (cancelled dialog) changes
    /// nothing and returns false.
    pub fn select_images(&mut self, paths: Vec<PathBuf>) -> bool {
        if paths.is_empty() {
            return false;
        }
        self.images = paths;
        self.index = 0;
        true
    }

    /// Sets the output folder. `None` (cancelled dialog) changes nothing.
    pub fn select_output_folder(&mut self, dir: Option<PathBuf>) -> bool {
        match dir {
            Some(dir) => {
                self.output_dir = Some(dir);
                true
            }
            None => false,
        }
    }

    /// Rewinds to the first image once both inputs are present.
    pub fn start(&mut self) -> Result<()> {
        if self.images.is_empty() {
            return Err(TrimError::NoImagesSelected);
        }
        if self.output_dir.is_none() {
            return Err(TrimError::NoOutputFolder);
        }
        self.index = 0;
        Ok(())
    }

    /// Moves to the next image, clearing the selection after the last one.
    pub fn advance(&mut self) -> Advance {
        self.index += 1;
        if self.index < self.images.len() {
            Advance::Next
        } else {
            self.clear();
            Advance::Finished
        }
    }

    /// Forgets the selected images. The output folder is kept for the next batch.
    pub fn clear(&mut self) {
        self.images.clear();
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based position of the current image, as used in file names.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn current(&self) -> Option<&Path> {
        self.images.get(self.index).map(PathBuf::as_path)
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// "Image i of n", or `None` when nothing is selected.
    pub fn counter_label(&self) -> Option<String> {
        (!self.images.is_empty())
            .then(|| format!("Image {} of {}", self.position(), self.images.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_cancelled_selection_keeps_previous() {
        let mut session = Session::default();
        assert!(session.select_images(paths(&["a.png", "b.png"])));
        assert!(!session.select_images(Vec::new()));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_new_selection_resets_index() {
        let mut session = Session::new(paths(&["a.png", "b.png", "c.png"]), None);
        session.advance();
        assert_eq!(session.index(), 1);
        session.select_images(paths(&["d.png"]));
        assert_eq!(session.index(), 0);
        assert_eq!(session.current(), Some(Path::new("d.png")));
    }

    #[test]
    fn test_start_requires_images_then_folder() {
        let mut session = Session::default();
        assert!(matches!(session.start(), Err(TrimError::NoImagesSelected)));
        session.select_images(paths(&["a.png"]));
        assert!(matches!(session.start(), Err(TrimError::NoOutputFolder)));
        assert!(!session.select_output_folder(None));
        assert!(session.select_output_folder(Some(PathBuf::from("/tmp/out"))));
        assert!(session.start().is_ok());
    }

    #[test]
    fn test_advance_past_last_clears() {
        let mut session = Session::new(paths(&["a.png", "b.png"]), Some(PathBuf::from("out")));
        assert_eq!(session.counter_label().as_deref(), Some("Image 1 of 2"));
        assert_eq!(session.advance(), Advance::Next);
        assert_eq!(session.counter_label().as_deref(), Some("Image 2 of 2"));
        assert_eq!(session.advance(), Advance::Finished);
        assert!(session.is_empty());
        assert_eq!(session.current(), None);
        assert_eq!(session.counter_label(), None);
        assert_eq!(session.output_dir(), Some(Path::new("out")));
    }
}
