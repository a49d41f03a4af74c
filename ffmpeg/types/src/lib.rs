/*!
    Shared types for the ffmpeg scaling crates.

    This crate defines the vocabulary used on both sides of the scaler: the
    frames and buffers handed to it and the errors it reports. It has no
    dependency on FFmpeg, so buffer handling and rotation can be used and
    tested without native libraries.

    # Core Types

    - [`ImageGeometry`] - Validated width, height and pixel format
    - [`VideoFrame`] and [`Plane`] - Owned multi-plane frames with timestamps
    - [`PixelBuffer`] and [`PixelBufferMut`] - Bounds-checked views over
      packed 4-byte-per-pixel images
    - [`Pts`] - Timestamps in time_base units

    # Format Types

    - [`PixelFormat`] - Video pixel formats and their [`PlaneLayout`]s

    # Pixel Operations

    - [`rotate_180`] - In-place 180° rotation of a packed 32-bit image

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod buffer;
mod error;
mod format;
mod frame;
mod geometry;
mod rotate;
mod timestamp;

pub use buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferMut};
pub use error::{Error, Result};
pub use format::{PALETTE_SIZE, PixelFormat, PlaneLayout};
pub use frame::{PLANE_PADDING, Plane, STRIDE_ALIGN, VideoFrame};
pub use geometry::ImageGeometry;
pub use rotate::rotate_180;
pub use timestamp::Pts;
