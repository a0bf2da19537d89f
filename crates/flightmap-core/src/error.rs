use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightMapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid KML: {0}")]
    InvalidKml(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid pixel buffer: {width}x{height} with {len} bytes")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    #[error("Region {width}x{height} at ({x}, {y}) is outside the {buffer_width}x{buffer_height} image")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        buffer_width: u32,
        buffer_height: u32,
    },

    #[error("No pictures directory available on this platform")]
    NoPicturesDir,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Map engine error: {0}")]
    Render(String),

    #[error("Map display is not available")]
    EngineDisconnected,
}

/// Coarse classification used when surfacing an error to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading, copying or writing a file failed.
    Io,
    /// The map engine could not parse, render, animate or export.
    Render,
}

impl ErrorKind {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Io => "File Error",
            ErrorKind::Render => "Map Error",
        }
    }
}

impl FlightMapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlightMapError::Io(_)
            | FlightMapError::NoPicturesDir
            | FlightMapError::InvalidConfig(_)
            | FlightMapError::ConfigParse(_)
            | FlightMapError::ConfigWrite(_) => ErrorKind::Io,
            FlightMapError::Xml(_)
            | FlightMapError::InvalidKml(_)
            | FlightMapError::ImageError(_)
            | FlightMapError::InvalidBuffer { .. }
            | FlightMapError::RegionOutOfBounds { .. }
            | FlightMapError::Render(_)
            | FlightMapError::EngineDisconnected => ErrorKind::Render,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightMapError>;
