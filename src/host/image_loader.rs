use crossbeam_channel::{Receiver, Sender};
use exif::{In, Reader, Tag};
use image::{DynamicImage, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ImageLoadError;
use crate::ports::{ImageHost, LoadOutcome};

pub type SourceImage = Arc<RgbaImage>;

// --- Helper: List and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, ImageLoadError> {
    let io_error = |source| ImageLoadError::Io {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            match ext.to_lowercase().as_str() {
                "png" | "jpg" | "jpeg" | "bmp" | "gif" => paths.push(path),
                _ => {}
            }
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(ImageLoadError::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

// --- Load Image, Apply EXIF Rotation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> Result<RgbaImage, ImageLoadError> {
    let file_bytes = fs::read(image_path).map_err(|source| ImageLoadError::Io {
        path: image_path.to_path_buf(),
        source,
    })?;

    let image = image::load_from_memory(&file_bytes).map_err(|source| ImageLoadError::Decode {
        path: image_path.to_path_buf(),
        source,
    })?;

    let orientation = read_orientation(image_path, &file_bytes);
    Ok(apply_orientation(image, orientation).to_rgba8())
}

/// EXIF orientation of a JPEG, 1 (upright) when absent or unreadable.
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u32 {
    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "jpg" && extension != "jpeg" {
        return 1;
    }

    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(e) => {
            // Not fatal: the image is shown unrotated
            warn!(path = ?image_path, error = %e, "could not read EXIF data");
            1
        }
    }
}

// 1 = upright, 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
// Mirrored orientations are shown as-is.
fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        3 => image.rotate180(),
        6 => image.rotate90(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Decodes requested files on the rayon pool.
///
/// Outcomes arrive over a channel in the order decoding finished, which is
/// generally not the order they were requested in.
pub struct ThreadedImageHost {
    sender: Sender<LoadOutcome<SourceImage>>,
    receiver: Receiver<LoadOutcome<SourceImage>>,
}

impl ThreadedImageHost {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }
}

impl Default for ThreadedImageHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageHost for ThreadedImageHost {
    type Image = SourceImage;

    fn request(&mut self, name: &str, base_path: &str) {
        let path = Path::new(base_path).join(name);
        let name = name.to_string();
        let sender = self.sender.clone();

        rayon::spawn(move || {
            let outcome = match load_image_with_exif_rotation(&path) {
                Ok(image) => {
                    debug!(?path, width = image.width(), height = image.height(), "decoded");
                    LoadOutcome::Loaded {
                        name,
                        image: Arc::new(image),
                    }
                }
                Err(e) => LoadOutcome::Failed {
                    name,
                    reason: e.to_string(),
                },
            };

            // The host may already be gone; nobody is left to tell.
            let _ = sender.send(outcome);
        });
    }

    fn poll(&mut self) -> Option<LoadOutcome<SourceImage>> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::time::{Duration, Instant};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn poll_until(host: &mut ThreadedImageHost, count: usize) -> Vec<LoadOutcome<SourceImage>> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut outcomes = Vec::new();
        while outcomes.len() < count && Instant::now() < deadline {
            match host.poll() {
                Some(outcome) => outcomes.push(outcome),
                None => std::thread::sleep(Duration::from_millis(5)),
            }
        }
        outcomes
    }

    #[test]
    fn test_sorted_paths_keep_only_images() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png", 2, 2);
        write_png(dir.path(), "a.png", 2, 2);
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let paths = load_sorted_image_paths(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_directory_without_images_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "#").unwrap();

        assert!(matches!(
            load_sorted_image_paths(dir.path()),
            Err(ImageLoadError::NoImages(_))
        ));
    }

    #[test]
    fn test_png_decodes_without_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 6, 2);

        let image = load_image_with_exif_rotation(&path).unwrap();

        assert_eq!(image.dimensions(), (6, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            load_image_with_exif_rotation(&path),
            Err(ImageLoadError::Decode { .. })
        ));
    }

    #[test]
    fn test_orientation_rotates_quarter_turns() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(6, 2));

        assert_eq!(apply_orientation(image.clone(), 6).to_rgba8().dimensions(), (2, 6));
        assert_eq!(apply_orientation(image.clone(), 8).to_rgba8().dimensions(), (2, 6));
        assert_eq!(apply_orientation(image, 3).to_rgba8().dimensions(), (6, 2));
    }

    #[test]
    fn test_threaded_host_reports_loads_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "1.png", 3, 3);
        let base = dir.path().to_str().unwrap();
        let mut host = ThreadedImageHost::new();

        host.request("1.png", base);
        host.request("missing.png", base);
        let outcomes = poll_until(&mut host, 2);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().any(|o| matches!(
            o,
            LoadOutcome::Loaded { name, image } if name == "1.png" && image.dimensions() == (3, 3)
        )));
        assert!(outcomes.iter().any(|o| matches!(
            o,
            LoadOutcome::Failed { name, .. } if name == "missing.png"
        )));
    }
}
