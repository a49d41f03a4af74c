/*!
    libswscale bindings for the ffmpeg scaling crates.

    This crate wraps a libswscale conversion context and marshals frames and
    packed RGBA buffers into it. Resampling and colour conversion happen
    entirely inside libswscale; this crate validates buffers, builds the
    plane pointer and stride arrays, and manages the context's lifetime.

    # Scaling Frames

    ```ignore
    use ffmpeg_scale::{ScaleConfig, ScaleContext, ScalingMethod};
    use ffmpeg_types::{ImageGeometry, PixelFormat, VideoFrame};

    // Convert 1920x1080 NV12 frames to 1280x720 RGBA
    let src = ImageGeometry::new(1920, 1080, PixelFormat::Nv12)?;
    let config = ScaleConfig::to_rgba(src, 1280, 720)?.with_method(ScalingMethod::Lanczos);
    let mut ctx = ScaleContext::new(config)?;

    let mut rgba = VideoFrame::alloc(ctx.destination())?;
    ctx.scale(&decoded, &mut rgba, false)?;
    ```

    # Scaling RGBA Images

    ```ignore
    use ffmpeg_scale::{ScaleConfig, ScaleContext};
    use ffmpeg_types::{ImageGeometry, PixelBuffer, PixelFormat, VideoFrame};

    // Feed a screenshot to an encoder expecting YUV 4:2:0
    let dst = ImageGeometry::new(1280, 720, PixelFormat::Yuv420p)?;
    let mut ctx = ScaleContext::new(ScaleConfig::from_rgba(2560, 1440, dst)?)?;

    let src = PixelBuffer::packed(&pixels, 2560, 1440)?;
    let mut frame = VideoFrame::alloc(dst)?;
    ctx.scale_rgba(&src, &mut frame)?;
    ```

    # Batch Rescaling

    [`rescale_all`] scales a whole sequence of frames, preserving order and
    timestamps. It either returns every output or none of them.

    # Context Lifetime

    The native context is freed when the [`ScaleContext`] is dropped, or
    explicitly through [`ScaleContext::release`]. A context may move between
    threads but is never shared, since scaling needs `&mut self`.
*/

pub use ffmpeg_types::{
    Error, ImageGeometry, PixelBuffer, PixelBufferMut, PixelFormat, Pts, Result, VideoFrame,
    rotate_180,
};

mod config;
mod context;
mod method;
mod pixel;
mod rescale;

pub use config::ScaleConfig;
pub use context::ScaleContext;
pub use method::ScalingMethod;
pub use pixel::{
    is_supported_input, is_supported_output, pixel_format_from_ffmpeg, pixel_format_to_ffmpeg,
};
pub use rescale::{rescale_all, rescale_all_with};
