/*!
    Image geometry: dimensions plus pixel format.
*/

use std::fmt;

use crate::{Error, PixelFormat, Result};

/**
    Width, height and pixel format of an image.

    Both dimensions are non-zero and fit in a C `int`, so a geometry can
    always be handed to the native scaler without further checks.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageGeometry {
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl ImageGeometry {
    /**
        Create a new geometry, validating the dimensions.
    */
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_geometry(format!(
                "{width}x{height} has a zero dimension"
            )));
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::invalid_geometry(format!(
                "{width}x{height} exceeds the native size limit"
            )));
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }

    /**
        Image width in pixels.
    */
    pub const fn width(&self) -> u32 {
        self.width
    }

    /**
        Image height in pixels.
    */
    pub const fn height(&self) -> u32 {
        self.height
    }

    /**
        Pixel format.
    */
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /**
        Same dimensions with a different pixel format.
    */
    pub const fn with_format(self, format: PixelFormat) -> Self {
        Self { format, ..self }
    }
}

impl fmt::Display for ImageGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}
