use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::APP_DIR_NAME;
use crate::error::{FlightMapError, Result};

/// Title of the KML file dialog.
pub const KML_PICKER_TITLE: &str = "Please select a KML file";

/// Host platforms, each with its own way of naming file types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// File type filter for KML, expressed the way the platform expects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KmlFileType {
    pub platform: Platform,
    /// UTI, MIME type or extension, depending on the platform.
    pub identifiers: Vec<&'static str>,
}

impl KmlFileType {
    pub fn for_platform(platform: Platform) -> Self {
        let identifiers = match platform {
            Platform::Ios => vec!["org.opengis.kml"],
            Platform::Android => vec!["application/vnd.google-earth.kml+xml"],
            Platform::Windows => vec![".kml"],
            Platform::MacOs | Platform::Linux => vec!["kml"],
        };
        Self {
            platform,
            identifiers,
        }
    }

    /// Bare extensions for desktop dialogs.
    pub fn extensions(&self) -> Vec<&'static str> {
        match self.platform {
            Platform::Ios | Platform::Android => vec!["kml"],
            _ => self
                .identifiers
                .iter()
                .map(|id| id.trim_start_matches('.'))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickRequest {
    pub title: String,
    pub file_type: KmlFileType,
}

impl PickRequest {
    pub fn kml() -> Self {
        Self {
            title: KML_PICKER_TITLE.to_string(),
            file_type: KmlFileType::for_platform(Platform::current()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub file_name: String,
    pub path: PathBuf,
}

impl PickedFile {
    /// Derives the display name from the path.
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { file_name, path }
    }
}

/// Lets the user choose a file. `Ok(None)` means the user cancelled.
pub trait FilePicker {
    fn pick_file(&mut self, request: &PickRequest) -> Result<Option<PickedFile>>;
}

/// Copy a picked file into the private cache directory, replacing an earlier
/// copy of the same name, and return the copy's path.
pub fn stage_in_cache(file: &PickedFile, cache_dir: &Path) -> Result<PathBuf> {
    let name = Path::new(&file.file_name)
        .file_name()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            FlightMapError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("picked file has no usable name: {:?}", file.file_name),
            ))
        })?;
    std::fs::create_dir_all(cache_dir)?;
    let target = cache_dir.join(name);
    // Copying a file onto itself would truncate it.
    let same_file = match (file.path.canonicalize(), target.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if !same_file {
        std::fs::copy(&file.path, &target)?;
    }
    debug!(from = %file.path.display(), to = %target.display(), "Staged picked file");
    Ok(target)
}

/// `<cache dir>/flightmap`, or a directory under the system temp dir.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
