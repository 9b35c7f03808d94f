//! Naming and writing of trimmed output files.

use crate::error::{Result, TrimError};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// `<prefix>_<index>_<timestamp>.png`
pub fn output_file_name(prefix: &str, index: usize, timestamp: u64) -> String {
    format!("{prefix}_{index}_{timestamp}.png")
}

/// Seconds since the Unix epoch, or 0 if the clock is before it.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Creates the first unused output file in `dir` at or after `timestamp`.
///
/// Several saves of the same image within one second would otherwise share a
/// name, so the timestamp is advanced until a file can be created. Creation
/// fails on an existing file, so nothing is ever overwritten.
pub fn create_output_file(
    dir: &Path,
    prefix: &str,
    index: usize,
    timestamp: u64,
) -> Result<(File, PathBuf)> {
    let mut timestamp = timestamp;
    loop {
        let path = dir.join(output_file_name(prefix, index, timestamp));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => timestamp += 1,
            Err(source) => return Err(TrimError::Io { path, source }),
        }
    }
}

/// Encodes `image` as PNG into `file`.
pub fn write_png(image: &RgbaImage, file: File, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(file);
    PngEncoder::new(&mut writer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| TrimError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|source| TrimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes one trimmed image into `dir` and returns where it went.
///
/// `index` is the 1-based position of the source in the selection.
pub fn export_crop(
    image: &RgbaImage,
    dir: &Path,
    prefix: &str,
    index: usize,
    timestamp: u64,
) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(TrimError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(ErrorKind::NotFound, "not a directory"),
        });
    }
    let (file, path) = create_output_file(dir, prefix, index, timestamp)?;
    write_png(image, file, &path)?;
    log::info!("Saved {}x{} crop to {}", image.width(), image.height(), path.display());
    Ok(path)
}
