//! Decoded raster image ready to be placed on a page.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("raster {width}x{height} needs {expected} RGB bytes, got {found}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

/// 8-bit RGB pixels, row-major, no alpha channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(RasterError::BufferSize {
                width,
                height,
                expected,
                found: rgb.len(),
            });
        }
        Ok(Self { width, height, rgb })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}
