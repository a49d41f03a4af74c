/*!
    Bounds-checked views over packed 4-byte-per-pixel buffers.
*/

use crate::{Error, Result};

/**
    Bytes per pixel in a packed 32-bit buffer.
*/
pub const BYTES_PER_PIXEL: usize = 4;

/**
    Validate a view layout, returning the number of bytes the view spans.
*/
fn validate(len: usize, width: usize, height: usize, stride: usize) -> Result<usize> {
    let row_bytes = width
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(|| Error::invalid_geometry(format!("row of {width} pixels overflows")))?;
    if stride < row_bytes {
        return Err(Error::InvalidStride { stride, row_bytes });
    }
    let needed = match height {
        0 => 0,
        h => (h - 1)
            .checked_mul(stride)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or_else(|| {
                Error::invalid_geometry(format!("{height} rows of {stride} bytes overflows"))
            })?,
    };
    if len < needed {
        return Err(Error::BufferTooSmall { needed, have: len });
    }
    Ok(needed)
}

/**
    Shared view over a packed 4-byte-per-pixel image (RGBA and friends).

    Rows start `stride` bytes apart; bytes between the end of a row and the
    start of the next are padding and never read.
*/
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PixelBuffer<'a> {
    /**
        Create a view with an explicit row stride in bytes.

        Fails if `stride` is shorter than a row or `data` is shorter than
        the last row's end.
    */
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /**
        Create a view over tightly packed rows (`stride = 4 * width`).
    */
    pub fn packed(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        let stride = width.saturating_mul(BYTES_PER_PIXEL);
        Self::new(data, width, height, stride)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /**
        Distance in bytes between the starts of consecutive rows.
    */
    pub fn stride(&self) -> usize {
        self.stride
    }

    /**
        The underlying bytes, including any row padding.
    */
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /**
        Pixel bytes of row `y`, without padding.

        # Panics

        Panics if `y >= height`.
    */
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row {y} out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * BYTES_PER_PIXEL]
    }

    /**
        The 4 bytes of the pixel at (`x`, `y`).

        # Panics

        Panics if the position is outside the image.
    */
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width, "column {x} out of bounds");
        let row = self.row(y);
        let offset = x * BYTES_PER_PIXEL;
        [row[offset], row[offset + 1], row[offset + 2], row[offset + 3]]
    }
}

/**
    Exclusive view over a packed 4-byte-per-pixel image.

    Same layout rules as [`PixelBuffer`].
*/
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PixelBufferMut<'a> {
    /**
        Create a mutable view with an explicit row stride in bytes.
    */
    pub fn new(data: &'a mut [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /**
        Create a mutable view over tightly packed rows.
    */
    pub fn packed(data: &'a mut [u8], width: usize, height: usize) -> Result<Self> {
        let stride = width.saturating_mul(BYTES_PER_PIXEL);
        Self::new(data, width, height, stride)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &*self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /**
        Reborrow as a shared view.
    */
    pub fn as_buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

static_assertions::assert_impl_all!(PixelBuffer<'static>: Send, Sync, Copy);
static_assertions::assert_impl_all!(PixelBufferMut<'static>: Send, Sync);
