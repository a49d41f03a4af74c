/*!
    Pixel format conversion between our types and FFmpeg's.
*/

use ffmpeg_next::{ffi, format::Pixel};

use ffmpeg_types::PixelFormat;

/**
    Convert our PixelFormat to FFmpeg's pixel format.
*/
pub fn pixel_format_to_ffmpeg(format: PixelFormat) -> Option<Pixel> {
    match format {
        PixelFormat::Yuv420p => Some(Pixel::YUV420P),
        PixelFormat::Yuv422p => Some(Pixel::YUV422P),
        PixelFormat::Yuv444p => Some(Pixel::YUV444P),
        PixelFormat::Yuv420p10 => Some(Pixel::YUV420P10LE),
        PixelFormat::Nv12 => Some(Pixel::NV12),
        PixelFormat::Rgba => Some(Pixel::RGBA),
        PixelFormat::Bgra => Some(Pixel::BGRA),
        PixelFormat::Argb => Some(Pixel::ARGB),
        PixelFormat::Abgr => Some(Pixel::ABGR),
        PixelFormat::Rgb24 => Some(Pixel::RGB24),
        PixelFormat::Bgr24 => Some(Pixel::BGR24),
        PixelFormat::Gray8 => Some(Pixel::GRAY8),
        PixelFormat::Pal8 => Some(Pixel::PAL8),
        _ => None,
    }
}

/**
    Convert FFmpeg's pixel format to our PixelFormat.
*/
pub fn pixel_format_from_ffmpeg(format: Pixel) -> Option<PixelFormat> {
    match format {
        Pixel::YUV420P => Some(PixelFormat::Yuv420p),
        Pixel::YUV422P => Some(PixelFormat::Yuv422p),
        Pixel::YUV444P => Some(PixelFormat::Yuv444p),
        Pixel::YUV420P10LE => Some(PixelFormat::Yuv420p10),
        Pixel::NV12 => Some(PixelFormat::Nv12),
        Pixel::RGBA => Some(PixelFormat::Rgba),
        Pixel::BGRA => Some(PixelFormat::Bgra),
        Pixel::ARGB => Some(PixelFormat::Argb),
        Pixel::ABGR => Some(PixelFormat::Abgr),
        Pixel::RGB24 => Some(PixelFormat::Rgb24),
        Pixel::BGR24 => Some(PixelFormat::Bgr24),
        Pixel::GRAY8 => Some(PixelFormat::Gray8),
        Pixel::PAL8 => Some(PixelFormat::Pal8),
        _ => None,
    }
}

pub(crate) fn to_av_pixel_format(format: PixelFormat) -> Option<ffi::AVPixelFormat> {
    pixel_format_to_ffmpeg(format).map(ffi::AVPixelFormat::from)
}

/**
    Returns true if libswscale accepts `format` as a source format.
*/
pub fn is_supported_input(format: PixelFormat) -> bool {
    // SAFETY: a pure table lookup on a valid AVPixelFormat value.
    to_av_pixel_format(format).is_some_and(|f| unsafe { ffi::sws_isSupportedInput(f) } > 0)
}

/**
    Returns true if libswscale can produce `format` as a destination format.
*/
pub fn is_supported_output(format: PixelFormat) -> bool {
    // SAFETY: a pure table lookup on a valid AVPixelFormat value.
    to_av_pixel_format(format).is_some_and(|f| unsafe { ffi::sws_isSupportedOutput(f) } > 0)
}
