/*!
    Scale context configuration.
*/

use ffmpeg_types::{ImageGeometry, PixelFormat, Result};

use crate::ScalingMethod;

/**
    Configuration for a [`ScaleContext`](crate::ScaleContext).

    The source and destination geometry are fixed for the lifetime of the
    context; every frame scaled through it must match them.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleConfig {
    /// Geometry of the frames fed to the scaler.
    pub src: ImageGeometry,
    /// Geometry of the frames the scaler writes.
    pub dst: ImageGeometry,
    /// Resampling filter.
    pub method: ScalingMethod,
}

impl ScaleConfig {
    /**
        Create a new config using the default scaling method.
    */
    pub fn new(src: ImageGeometry, dst: ImageGeometry) -> Self {
        Self {
            src,
            dst,
            method: ScalingMethod::default(),
        }
    }

    /**
        Create a config converting `src` to RGBA at the given size.
    */
    pub fn to_rgba(src: ImageGeometry, width: u32, height: u32) -> Result<Self> {
        let dst = ImageGeometry::new(width, height, PixelFormat::Rgba)?;
        Ok(Self::new(src, dst))
    }

    /**
        Create a config converting `src` to YUV 4:2:0 at the given size,
        the usual input format for video encoders.
    */
    pub fn to_yuv420p(src: ImageGeometry, width: u32, height: u32) -> Result<Self> {
        let dst = ImageGeometry::new(width, height, PixelFormat::Yuv420p)?;
        Ok(Self::new(src, dst))
    }

    /**
        Create a config for packed RGBA images of the given size, as fed to
        [`ScaleContext::scale_rgba`](crate::ScaleContext::scale_rgba).
    */
    pub fn from_rgba(width: u32, height: u32, dst: ImageGeometry) -> Result<Self> {
        let src = ImageGeometry::new(width, height, PixelFormat::Rgba)?;
        Ok(Self::new(src, dst))
    }

    /**
        Set the scaling method.
    */
    pub fn with_method(mut self, method: ScalingMethod) -> Self {
        self.method = method;
        self
    }

    /**
        Returns true if the destination has different dimensions than the
        source, meaning the filter kernel actually resamples.
    */
    pub fn is_resizing(&self) -> bool {
        self.src.width() != self.dst.width() || self.src.height() != self.dst.height()
    }
}
