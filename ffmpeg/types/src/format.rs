/*!
    Pixel formats and their plane layouts.
*/

use std::fmt;
use std::str::FromStr;

use crate::{Error, PLANE_PADDING};

/**
    Number of bytes in one palette plane (256 entries of 4 bytes).
*/
pub const PALETTE_SIZE: usize = 256 * 4;

/**
    Video pixel formats.

    This is a subset of formats commonly fed to or produced by the scaler.
    Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit little-endian samples in 16-bit words
    Yuv420p10,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed BGRA, 32bpp (common for display on macOS/Windows)
    Bgra,
    /// Packed ARGB, 32bpp
    Argb,
    /// Packed ABGR, 32bpp
    Abgr,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Single luma plane, 8bpp
    Gray8,
    /// 8-bit palette indices plus a 256-entry RGBA palette plane
    Pal8,
}

/**
    Byte layout of a single plane for a given image size.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Bytes of pixel data in one row, excluding padding.
    pub row_bytes: usize,
    /// Number of rows in the plane.
    pub rows: usize,
}

impl PlaneLayout {
    /**
        Minimum buffer length for this plane when rows are `stride` bytes apart.
    */
    pub fn min_len(self, stride: usize) -> Option<usize> {
        if self.rows == 0 {
            return Some(0);
        }
        (self.rows - 1)
            .checked_mul(stride)?
            .checked_add(self.row_bytes)
    }

    /**
        Buffer length for this plane including [`PLANE_PADDING`] bytes of
        slack past the end of the last row.
    */
    pub fn padded_len(self, stride: usize) -> Option<usize> {
        self.min_len(stride)?.checked_add(PLANE_PADDING)
    }
}

impl PixelFormat {
    /**
        Every format, in declaration order.
    */
    pub const ALL: [PixelFormat; 13] = [
        Self::Yuv420p,
        Self::Yuv422p,
        Self::Yuv444p,
        Self::Yuv420p10,
        Self::Nv12,
        Self::Rgba,
        Self::Bgra,
        Self::Argb,
        Self::Abgr,
        Self::Rgb24,
        Self::Bgr24,
        Self::Gray8,
        Self::Pal8,
    ];

    /**
        Returns true if every pixel is a single 4-byte unit in one plane.
    */
    pub const fn is_packed_32(self) -> bool {
        matches!(self, Self::Rgba | Self::Bgra | Self::Argb | Self::Abgr)
    }

    /**
        Returns the number of planes used by this format.
    */
    pub const fn plane_count(self) -> usize {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p | Self::Yuv420p10 => 3,
            Self::Nv12 | Self::Pal8 => 2,
            Self::Rgba
            | Self::Bgra
            | Self::Argb
            | Self::Abgr
            | Self::Rgb24
            | Self::Bgr24
            | Self::Gray8 => 1,
        }
    }

    /**
        Returns the layout of `plane` for an image of `width` x `height`,
        or `None` if the format has no such plane.

        Chroma dimensions round up, matching FFmpeg's `-((-w) >> shift)`.
    */
    pub fn plane_layout(self, plane: usize, width: usize, height: usize) -> Option<PlaneLayout> {
        if plane >= self.plane_count() {
            return None;
        }
        let half_w = width.div_ceil(2);
        let half_h = height.div_ceil(2);
        let (row_bytes, rows) = match (self, plane) {
            (Self::Yuv420p, 0) | (Self::Yuv422p, 0) | (Self::Yuv444p, _) => (width, height),
            (Self::Yuv420p, _) => (half_w, half_h),
            (Self::Yuv422p, _) => (half_w, height),
            (Self::Yuv420p10, 0) => (width * 2, height),
            (Self::Yuv420p10, _) => (half_w * 2, half_h),
            (Self::Nv12, 0) => (width, height),
            (Self::Nv12, _) => (half_w * 2, half_h),
            (Self::Pal8, 0) | (Self::Gray8, _) => (width, height),
            (Self::Pal8, _) => (PALETTE_SIZE, 1),
            (Self::Rgba | Self::Bgra | Self::Argb | Self::Abgr, _) => (width * 4, height),
            (Self::Rgb24 | Self::Bgr24, _) => (width * 3, height),
        };
        Some(PlaneLayout { row_bytes, rows })
    }

    /**
        Lowercase FFmpeg-style name of this format.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yuv420p => "yuv420p",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
            Self::Yuv420p10 => "yuv420p10le",
            Self::Nv12 => "nv12",
            Self::Rgba => "rgba",
            Self::Bgra => "bgra",
            Self::Argb => "argb",
            Self::Abgr => "abgr",
            Self::Rgb24 => "rgb24",
            Self::Bgr24 => "bgr24",
            Self::Gray8 => "gray",
            Self::Pal8 => "pal8",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown_name("pixel format", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_32_formats() {
        let packed: Vec<_> = PixelFormat::ALL
            .into_iter()
            .filter(|f| f.is_packed_32())
            .collect();
        assert_eq!(
            packed,
            [
                PixelFormat::Rgba,
                PixelFormat::Bgra,
                PixelFormat::Argb,
                PixelFormat::Abgr
            ]
        );
    }

    #[test]
    fn yuv420p_odd_dimensions_round_chroma_up() {
        let f = PixelFormat::Yuv420p;
        assert_eq!(
            f.plane_layout(0, 5, 3),
            Some(PlaneLayout {
                row_bytes: 5,
                rows: 3
            })
        );
        assert_eq!(
            f.plane_layout(1, 5, 3),
            Some(PlaneLayout {
                row_bytes: 3,
                rows: 2
            })
        );
        assert_eq!(f.plane_layout(2, 5, 3), f.plane_layout(1, 5, 3));
        assert_eq!(f.plane_layout(3, 5, 3), None);
    }

    #[test]
    fn nv12_interleaves_chroma() {
        let uv = PixelFormat::Nv12.plane_layout(1, 6, 4).unwrap();
        assert_eq!(uv.row_bytes, 6);
        assert_eq!(uv.rows, 2);
    }

    #[test]
    fn pal8_has_palette_plane() {
        let palette = PixelFormat::Pal8.plane_layout(1, 100, 100).unwrap();
        assert_eq!(palette.row_bytes, PALETTE_SIZE);
        assert_eq!(palette.rows, 1);
    }

    #[test]
    fn plane_layout_min_len() {
        let layout = PlaneLayout {
            row_bytes: 12,
            rows: 3,
        };
        assert_eq!(layout.min_len(16), Some(16 * 2 + 12));
        assert_eq!(layout.padded_len(16), Some(16 * 2 + 12 + PLANE_PADDING));
        assert_eq!(layout.min_len(usize::MAX), None);
    }

    #[test]
    fn parse_and_display_names() {
        for format in PixelFormat::ALL {
            assert_eq!(format.to_string().parse::<PixelFormat>().unwrap(), format);
        }
        assert_eq!("RGBA".parse::<PixelFormat>().unwrap(), PixelFormat::Rgba);
        assert!("rgb565".parse::<PixelFormat>().is_err());
    }
}
