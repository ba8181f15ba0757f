//! Asset catalog and image validation
//!
//! Assets live under `<root>/images/{cars,maps,obstacles}/<name>.png`. The
//! simulation never sees pixels: each loaded image becomes an opaque
//! [`AssetHandle`] plus its natural size, read from the PNG header.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Extensions accepted as image files before the header is inspected
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Category of image asset (one subdirectory each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Car,
    Map,
    Obstacle,
}

impl AssetKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Car => "cars",
            AssetKind::Map => "maps",
            AssetKind::Obstacle => "obstacles",
        }
    }
}

/// Opaque reference to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(u32);

impl AssetHandle {
    pub const fn from_id(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// A validated image with its natural size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedAsset {
    pub handle: AssetHandle,
    pub kind: AssetKind,
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Names of the images available in each asset directory
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    root: PathBuf,
    pub cars: Vec<String>,
    pub maps: Vec<String>,
    pub obstacles: Vec<String>,
    next_handle: u32,
}

impl AssetCatalog {
    /// Scan an asset root. Missing directories produce empty name lists.
    pub fn scan(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let images = root.join("images");
        let catalog = Self {
            cars: image_names(&images.join(AssetKind::Car.dir_name())),
            maps: image_names(&images.join(AssetKind::Map.dir_name())),
            obstacles: image_names(&images.join(AssetKind::Obstacle.dir_name())),
            root,
            next_handle: 0,
        };
        log::info!(
            "Asset catalog {}: {} cars, {} maps, {} obstacles",
            catalog.root.display(),
            catalog.cars.len(),
            catalog.maps.len(),
            catalog.obstacles.len()
        );
        catalog
    }

    /// Path of a named image of the given kind
    pub fn path_of(&self, kind: AssetKind, name: &str) -> PathBuf {
        self.root
            .join("images")
            .join(kind.dir_name())
            .join(format!("{name}.png"))
    }

    /// Validate and register a named image
    pub fn load(&mut self, kind: AssetKind, name: &str) -> Result<LoadedAsset, AssetError> {
        let path = self.path_of(kind, name);
        self.load_path(kind, name, path)
    }

    /// Validate and register an image at an explicit path
    pub fn load_path(
        &mut self,
        kind: AssetKind,
        name: &str,
        path: PathBuf,
    ) -> Result<LoadedAsset, AssetError> {
        let (width, height) = read_image_size(&path)?;
        let handle = AssetHandle(self.next_handle);
        self.next_handle += 1;
        log::debug!(
            "Loaded {:?} '{}' ({}x{}) as handle {}",
            kind,
            name,
            width,
            height,
            handle.0
        );
        Ok(LoadedAsset {
            handle,
            kind,
            name: name.to_string(),
            path,
            width,
            height,
        })
    }
}

/// Stems of all `.png` files in a directory, sorted
pub fn image_names(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            log::warn!("Directory '{}' not found.", dir.display());
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

/// Whether a path carries a recognised image extension
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Validate an image file and read its width and height from the PNG header
pub fn read_image_size(path: &Path) -> Result<(u32, u32), AssetError> {
    if !path.exists() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    if !is_image_file(path) {
        return Err(AssetError::UnsupportedFormat(path.to_path_buf()));
    }

    let io_err = |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut header = Vec::with_capacity(24);
    file.by_ref()
        .take(24)
        .read_to_end(&mut header)
        .map_err(io_err)?;

    parse_png_header(&header).map_err(|e| match e {
        HeaderError::Signature => AssetError::NotPng(path.to_path_buf()),
        HeaderError::Malformed => AssetError::MalformedHeader(path.to_path_buf()),
    })
}

#[derive(Debug, PartialEq, Eq)]
enum HeaderError {
    Signature,
    Malformed,
}

/// Signature, then the IHDR chunk: length (4), type (4), width (4), height (4)
fn parse_png_header(bytes: &[u8]) -> Result<(u32, u32), HeaderError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
        return Err(HeaderError::Signature);
    }
    if bytes.len() < 24 || &bytes[12..16] != b"IHDR" {
        return Err(HeaderError::Malformed);
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    // PNG dimensions are limited to 2^31 - 1
    let limit = i32::MAX as u32;
    if width == 0 || height == 0 || width > limit || height > limit {
        return Err(HeaderError::Malformed);
    }
    Ok((width, height))
}

/// Minimal PNG header bytes (signature + IHDR) for a given size
#[cfg(test)]
pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

/// Scratch asset tree under the system temp directory
#[cfg(test)]
pub(crate) struct TempAssets {
    pub root: PathBuf,
}

#[cfg(test)]
impl TempAssets {
    pub fn new(label: &str) -> Self {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "car-racing-{}-{}-{}",
            label,
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_dir_all(&root);
        for kind in [AssetKind::Car, AssetKind::Map, AssetKind::Obstacle] {
            std::fs::create_dir_all(root.join("images").join(kind.dir_name())).unwrap();
        }
        Self { root }
    }

    pub fn add_png(&self, kind: AssetKind, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self
            .root
            .join("images")
            .join(kind.dir_name())
            .join(format!("{name}.png"));
        std::fs::write(&path, png_header(width, height)).unwrap();
        path
    }

    pub fn add_file(&self, kind: AssetKind, file_name: &str, contents: &[u8]) -> PathBuf {
        let path = self
            .root
            .join("images")
            .join(kind.dir_name())
            .join(file_name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// A complete asset set: bmw car, winter 800x600 map, two obstacles
    pub fn standard(label: &str) -> Self {
        let assets = Self::new(label);
        assets.add_png(AssetKind::Car, "bmw", 50, 100);
        assets.add_png(AssetKind::Car, "audi", 50, 100);
        assets.add_png(AssetKind::Map, "winter", 800, 600);
        assets.add_png(AssetKind::Map, "summer", 800, 600);
        assets.add_png(AssetKind::Obstacle, "cone", 40, 40);
        assets.add_png(AssetKind::Obstacle, "truck", 60, 120);
        assets
    }
}

#[cfg(test)]
impl Drop for TempAssets {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
