use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use crate::config::ExportConfig;
use crate::consts::BYTES_PER_PIXEL;
use crate::error::{FlightMapError, Result};

/// Channel order of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Blue, green, red, alpha. What the map display exports.
    Bgra8888,
    Rgba8888,
}

/// An owned, tightly packed 8-bit four-channel image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(FlightMapError::InvalidBuffer {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A buffer filled with one colour, given in the buffer's own channel order.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: [u8; 4]) -> Result<Self> {
        let count = width as usize * height as usize;
        let data = pixel.repeat(count);
        Self::new(width, height, format, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw channels of the pixel at (x, y) in the buffer's own order.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy out a sub-rectangle; the rectangle must lie inside the buffer.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        let out_of_bounds = width == 0
            || height == 0
            || x.checked_add(width).map_or(true, |r| r > self.width)
            || y.checked_add(height).map_or(true, |b| b > self.height);
        if out_of_bounds {
            return Err(FlightMapError::RegionOutOfBounds {
                x,
                y,
                width,
                height,
                buffer_width: self.width,
                buffer_height: self.height,
            });
        }

        let stride = self.width as usize * BYTES_PER_PIXEL;
        let row_len = width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in y as usize..(y + height) as usize {
            let start = row * stride + x as usize * BYTES_PER_PIXEL;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Self::new(width, height, self.format, data)
    }

    /// Bytes in RGBA order regardless of the buffer's format.
    pub fn to_rgba(&self) -> Vec<u8> {
        match self.format {
            PixelFormat::Rgba8888 => self.data.clone(),
            PixelFormat::Bgra8888 => {
                let mut out = self.data.clone();
                for px in out.chunks_exact_mut(BYTES_PER_PIXEL) {
                    px.swap(0, 2);
                }
                out
            }
        }
    }
}

/// Encode as PNG at maximum compression. PNG is lossless, so this is the
/// highest quality setting.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let rgba = buffer.to_rgba();
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(
        &rgba,
        buffer.width(),
        buffer.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Encode and write to `path`, replacing any existing file.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let bytes = encode_png(buffer)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Destination of "Save Image": the configured directory, else the user's
/// pictures directory, else their home directory.
pub fn default_output_path(config: &ExportConfig) -> Result<PathBuf> {
    let dir = config
        .directory
        .clone()
        .or_else(dirs::picture_dir)
        .or_else(dirs::home_dir)
        .ok_or(FlightMapError::NoPicturesDir)?;
    Ok(dir.join(&config.file_name))
}
