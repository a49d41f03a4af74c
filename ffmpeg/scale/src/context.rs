/*!
    libswscale conversion context.
*/

use std::borrow::Cow;
use std::ffi::c_int;
use std::fmt;
use std::ptr::{self, NonNull};

use ffmpeg_next::ffi;
use image::RgbaImage;
use tracing::{debug, trace, warn};

use ffmpeg_types::{
    Error, ImageGeometry, PixelBuffer, PixelFormat, Result, VideoFrame, rotate_180,
};

use crate::pixel::{is_supported_input, is_supported_output, to_av_pixel_format};
use crate::{ScaleConfig, ScalingMethod};

/**
    Number of plane slots libswscale reads from pointer and stride arrays.
*/
const MAX_PLANES: usize = 4;

/**
    A libswscale conversion context.

    Converts frames of one fixed geometry into another, possibly changing
    size and pixel format. The context is created once and reused for any
    number of frames; the native context is freed when this value is
    dropped or [`released`](Self::release).

    Scaling takes `&mut self`, so one context is never used from two
    threads at once. The context can be moved between threads.
*/
pub struct ScaleContext {
    ctx: NonNull<ffi::SwsContext>,
    config: ScaleConfig,
}

impl ScaleContext {
    /**
        Create a new conversion context.

        Fails with [`Error::UnsupportedFormat`] if libswscale does not accept
        the source format as input or the destination format as output,
        and with [`Error::ContextCreation`] if the native constructor
        returns null for any other reason.
    */
    pub fn new(config: ScaleConfig) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::scaler(e.to_string()))?;

        let ScaleConfig { src, dst, method } = config;
        let src_format = native_format(src.format(), is_supported_input(src.format()), "input")?;
        let dst_format = native_format(dst.format(), is_supported_output(dst.format()), "output")?;

        // SAFETY: geometry dimensions are non-zero and fit in c_int; filters
        // and extra parameters may be null.
        let raw = unsafe {
            ffi::sws_getContext(
                src.width() as c_int,
                src.height() as c_int,
                src_format,
                dst.width() as c_int,
                dst.height() as c_int,
                dst_format,
                method.flags().bits(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null(),
            )
        };

        let ctx = context_from_raw(raw, &config)?;

        debug!(%src, %dst, %method, resizing = config.is_resizing(), "created scale context");
        Ok(Self { ctx, config })
    }

    /**
        Get the configuration this context was created with.
    */
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /**
        Geometry every source frame must have.
    */
    pub fn source(&self) -> ImageGeometry {
        self.config.src
    }

    /**
        Geometry every destination frame must have.
    */
    pub fn destination(&self) -> ImageGeometry {
        self.config.dst
    }

    pub fn method(&self) -> ScalingMethod {
        self.config.method
    }

    /**
        Scale `src` into `dst`, plane to plane.

        When `rotate` is set, the result is rotated by 180° in place after
        scaling; this needs a packed 32-bit destination format such as RGBA
        and is checked before any pixels are written.

        Both frames must be allocated and match the context's geometry.
    */
    pub fn scale(&mut self, src: &VideoFrame, dst: &mut VideoFrame, rotate: bool) -> Result<()> {
        if !src.is_allocated() {
            warn!(src = %src.geometry(), "source frame has no planes");
            return Err(Error::FrameNotAllocated);
        }
        self.check_frames(src.geometry(), dst)?;
        if rotate && !dst.format().is_packed_32() {
            warn!(dst = %dst.geometry(), "rotation needs a packed 32-bit destination");
            return Err(Error::unsupported_format(format!(
                "cannot rotate {} output, a packed 32-bit format is required",
                dst.format()
            )));
        }

        let (src_data, src_stride) = source_planes(src.planes())?;
        self.run(&src_data, &src_stride, dst)?;

        if rotate {
            rotate_180(&mut dst.pixel_buffer_mut()?);
        }
        Ok(())
    }

    /**
        Scale a packed RGBA image into `dst`'s plane layout.

        The source is a single interleaved plane whose row stride is taken
        from the view. The context must have been created with an RGBA
        source of the same size, and `dst` must be allocated with the
        context's destination geometry. Nothing is passed to the native
        scaler unless all of that holds.

        A view that ends right after its last row is copied into a
        zero-padded scratch buffer first, since the native scaler may read
        a little past the end of the image.
    */
    pub fn scale_rgba(&mut self, src: &PixelBuffer<'_>, dst: &mut VideoFrame) -> Result<()> {
        let width = u32::try_from(src.width())
            .map_err(|_| Error::invalid_geometry("source width exceeds u32"))?;
        let height = u32::try_from(src.height())
            .map_err(|_| Error::invalid_geometry("source height exceeds u32"))?;
        let geometry = ImageGeometry::new(width, height, PixelFormat::Rgba)?;
        self.check_frames(geometry, dst)?;

        let padded_len = PixelFormat::Rgba
            .plane_layout(0, src.width(), src.height())
            .and_then(|layout| layout.padded_len(src.stride()))
            .ok_or_else(|| Error::invalid_geometry("source size overflows"))?;
        let data = with_read_slack(src.data(), padded_len)?;

        let (src_data, src_stride) = source_planes(std::iter::once((&*data, src.stride())))?;
        self.run(&src_data, &src_stride, dst)
    }

    /**
        Scale an [`RgbaImage`] into `dst`'s plane layout.

        Same as [`scale_rgba`](Self::scale_rgba) with a tightly packed view
        over the image's pixels.
    */
    pub fn scale_image(&mut self, image: &RgbaImage, dst: &mut VideoFrame) -> Result<()> {
        let src = PixelBuffer::packed(
            image.as_raw(),
            image.width() as usize,
            image.height() as usize,
        )?;
        self.scale_rgba(&src, dst)
    }

    /**
        Free the native context.

        Equivalent to dropping the context; consuming it makes any later
        use a compile error.
    */
    pub fn release(self) {
        drop(self);
    }

    /**
        Check an input geometry and a destination frame against the context.
    */
    fn check_frames(&self, src: ImageGeometry, dst: &VideoFrame) -> Result<()> {
        if !dst.is_allocated() {
            warn!(dst = %dst.geometry(), "destination frame has no planes");
            return Err(Error::FrameNotAllocated);
        }
        expect_geometry(self.config.src, src)?;
        expect_geometry(self.config.dst, dst.geometry())
    }

    /**
        Run the native scaler over the whole source image.
    */
    fn run(
        &mut self,
        src_data: &[*const u8; MAX_PLANES],
        src_stride: &[c_int; MAX_PLANES],
        dst: &mut VideoFrame,
    ) -> Result<()> {
        let mut dst_data = [ptr::null_mut(); MAX_PLANES];
        let mut dst_stride: [c_int; MAX_PLANES] = [0; MAX_PLANES];
        for (index, (bytes, stride)) in dst.planes_mut().take(MAX_PLANES).enumerate() {
            dst_data[index] = bytes.as_mut_ptr();
            dst_stride[index] = native_stride(stride)?;
        }

        trace!(src = %self.config.src, dst = %self.config.dst, "sws_scale");

        // SAFETY: every plane pointer comes from a buffer validated against
        // the geometry the context was created with, with PLANE_PADDING bytes
        // past its last row for the scaler's wide loads, and stays borrowed
        // for the duration of the call. Unused slots are null with zero stride.
        let ret = unsafe {
            ffi::sws_scale(
                self.ctx.as_ptr(),
                src_data.as_ptr(),
                src_stride.as_ptr(),
                0,
                self.config.src.height() as c_int,
                dst_data.as_ptr(),
                dst_stride.as_ptr(),
            )
        };

        if ret < 0 {
            let e = ffmpeg_next::Error::from(ret);
            warn!(error = %e, "sws_scale failed");
            return Err(Error::scaler(e.to_string()));
        }
        Ok(())
    }
}

impl Drop for ScaleContext {
    fn drop(&mut self) {
        // SAFETY: the pointer came from sws_getContext and is freed only here.
        unsafe { ffi::sws_freeContext(self.ctx.as_ptr()) };
        debug!(src = %self.config.src, dst = %self.config.dst, "released scale context");
    }
}

// SAFETY: libswscale contexts carry no thread affinity. All access goes
// through &mut self, so the context is never shared between threads.
unsafe impl Send for ScaleContext {}

static_assertions::assert_impl_all!(ScaleContext: Send);
static_assertions::assert_not_impl_any!(ScaleContext: Sync, Clone);

impl fmt::Debug for ScaleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleContext")
            .field("src", &self.config.src)
            .field("dst", &self.config.dst)
            .field("method", &self.config.method)
            .finish_non_exhaustive()
    }
}

fn native_format(format: PixelFormat, supported: bool, role: &str) -> Result<ffi::AVPixelFormat> {
    match to_av_pixel_format(format) {
        Some(av_format) if supported => Ok(av_format),
        _ => Err(Error::unsupported_format(format!(
            "{format} is not supported as scaler {role}"
        ))),
    }
}

fn context_from_raw(
    raw: *mut ffi::SwsContext,
    config: &ScaleConfig,
) -> Result<NonNull<ffi::SwsContext>> {
    NonNull::new(raw).ok_or_else(|| {
        let ScaleConfig { src, dst, method } = config;
        warn!(%src, %dst, %method, "sws_getContext returned null");
        Error::context_creation(format!("{src} -> {dst} using {method}"))
    })
}

/**
    Borrow `data` if it is at least `len` bytes, otherwise copy it into a
    zero-extended scratch buffer of exactly `len` bytes.
*/
fn with_read_slack(data: &[u8], len: usize) -> Result<Cow<'_, [u8]>> {
    if data.len() >= len {
        return Ok(Cow::Borrowed(data));
    }
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(len)?;
    scratch.extend_from_slice(data);
    scratch.resize(len, 0);
    trace!(have = data.len(), len, "copied source into padded scratch buffer");
    Ok(Cow::Owned(scratch))
}

fn native_stride(stride: usize) -> Result<c_int> {
    c_int::try_from(stride)
        .map_err(|_| Error::invalid_geometry(format!("stride of {stride} bytes exceeds c_int")))
}

fn expect_geometry(expected: ImageGeometry, actual: ImageGeometry) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        warn!(%expected, %actual, "frame does not match scale context");
        Err(Error::GeometryMismatch { expected, actual })
    }
}

/**
    Collect source plane pointers and strides into the fixed-size arrays
    libswscale reads.
*/
fn source_planes<'a>(
    planes: impl Iterator<Item = (&'a [u8], usize)>,
) -> Result<([*const u8; MAX_PLANES], [c_int; MAX_PLANES])> {
    let mut data = [ptr::null(); MAX_PLANES];
    let mut stride: [c_int; MAX_PLANES] = [0; MAX_PLANES];
    for (index, (bytes, plane_stride)) in planes.take(MAX_PLANES).enumerate() {
        data[index] = bytes.as_ptr();
        stride[index] = native_stride(plane_stride)?;
    }
    Ok((data, stride))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_types::PLANE_PADDING;

    fn geometry(width: u32, height: u32, format: PixelFormat) -> ImageGeometry {
        ImageGeometry::new(width, height, format).unwrap()
    }

    fn gradient(width: u32, height: u32) -> VideoFrame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 16) as u8, (y * 32) as u8, (x + y) as u8, 255]);
            }
        }
        VideoFrame::from_rgba(data, width, height).unwrap()
    }

    fn identity_context(g: ImageGeometry) -> ScaleContext {
        ScaleContext::new(ScaleConfig::new(g, g).with_method(ScalingMethod::Point)).unwrap()
    }

    #[test]
    fn create_and_release() {
        let src = geometry(64, 48, PixelFormat::Yuv420p);
        let ctx = ScaleContext::new(ScaleConfig::to_rgba(src, 32, 24).unwrap()).unwrap();
        assert_eq!(ctx.source(), src);
        assert_eq!(ctx.destination(), geometry(32, 24, PixelFormat::Rgba));
        assert_eq!(ctx.method(), ScalingMethod::Bilinear);
        ctx.release();
    }

    #[test]
    fn every_method_creates_a_context() {
        let src = geometry(32, 32, PixelFormat::Rgba);
        for method in ScalingMethod::ALL {
            let config = ScaleConfig::to_yuv420p(src, 16, 16)
                .unwrap()
                .with_method(method);
            assert!(ScaleContext::new(config).is_ok(), "{method}");
        }
    }

    #[test]
    fn unsupported_destination_format_fails() {
        let src = geometry(16, 16, PixelFormat::Rgba);
        let config = ScaleConfig::new(src, src.with_format(PixelFormat::Pal8));
        let err = ScaleContext::new(config).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }), "{err}");
    }

    #[test]
    fn null_native_context_is_a_creation_error() {
        let g = geometry(16, 16, PixelFormat::Rgba);
        let config = ScaleConfig::new(g, g);
        let err = context_from_raw(ptr::null_mut(), &config).unwrap_err();
        match err {
            Error::ContextCreation { message } => {
                assert_eq!(message, "16x16 rgba -> 16x16 rgba using bilinear");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identity_scale_copies_pixels() {
        let g = geometry(8, 4, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let src = gradient(8, 4);
        let mut dst = VideoFrame::alloc(g).unwrap();

        ctx.scale(&src, &mut dst, false).unwrap();

        let (before, after) = (src.pixel_buffer().unwrap(), dst.pixel_buffer().unwrap());
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(after.pixel(x, y), before.pixel(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn scale_with_rotation() {
        let g = geometry(8, 5, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let src = gradient(8, 5);
        let mut dst = VideoFrame::alloc(g).unwrap();

        ctx.scale(&src, &mut dst, true).unwrap();

        let (before, after) = (src.pixel_buffer().unwrap(), dst.pixel_buffer().unwrap());
        for y in 0..5 {
            for x in 0..8 {
                assert_eq!(after.pixel(7 - x, 4 - y), before.pixel(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn rotation_requires_packed_output() {
        let src = geometry(8, 8, PixelFormat::Rgba);
        let mut ctx = ScaleContext::new(ScaleConfig::to_yuv420p(src, 8, 8).unwrap()).unwrap();
        let mut dst = VideoFrame::alloc(ctx.destination()).unwrap();
        let err = ctx.scale(&gradient(8, 8), &mut dst, true).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn scale_rgba_into_yuv420p() {
        let rgba = vec![255u8; 16 * 16 * 4];
        let src = PixelBuffer::packed(&rgba, 16, 16).unwrap();
        let dst_geometry = geometry(8, 8, PixelFormat::Yuv420p);
        let mut ctx = ScaleContext::new(ScaleConfig::from_rgba(16, 16, dst_geometry).unwrap())
            .unwrap();
        let mut dst = VideoFrame::alloc(dst_geometry).unwrap();

        ctx.scale_rgba(&src, &mut dst).unwrap();

        // White in limited-range YUV: luma near 235, neutral chroma.
        let luma_stride = dst.plane_stride(0).unwrap();
        let luma = dst.plane_data(0).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let v = luma[y * luma_stride + x];
                assert!((230..=240).contains(&v), "luma {v} at ({x}, {y})");
            }
        }
        for plane in 1..3 {
            let stride = dst.plane_stride(plane).unwrap();
            let chroma = dst.plane_data(plane).unwrap();
            for y in 0..4 {
                for x in 0..4 {
                    let v = chroma[y * stride + x];
                    assert!((124..=132).contains(&v), "chroma {v} in plane {plane}");
                }
            }
        }
    }

    #[test]
    fn scale_rgba_honours_source_stride() {
        let (width, height, stride) = (4usize, 2usize, 32usize);
        let mut rgba = vec![0u8; stride * height];
        for y in 0..height {
            for x in 0..width {
                let offset = y * stride + x * 4;
                rgba[offset..offset + 4].copy_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        let src = PixelBuffer::new(&rgba, width, height, stride).unwrap();
        let g = geometry(4, 2, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let mut dst = VideoFrame::alloc(g).unwrap();

        ctx.scale_rgba(&src, &mut dst).unwrap();

        let out = dst.pixel_buffer().unwrap();
        assert_eq!(out.pixel(3, 1), [3, 1, 7, 255]);
        assert_eq!(out.pixel(0, 0), [0, 0, 7, 255]);
    }

    #[test]
    fn tight_source_is_copied_with_slack() {
        let tight = vec![7u8; 4 * 2 * 4];
        let padded = with_read_slack(&tight, tight.len() + PLANE_PADDING).unwrap();
        assert!(matches!(padded, Cow::Owned(_)));
        assert_eq!(padded.len(), tight.len() + PLANE_PADDING);
        assert_eq!(&padded[..tight.len()], &tight[..]);
        assert!(padded[tight.len()..].iter().all(|&b| b == 0));

        let roomy = vec![7u8; 4 * 2 * 4 + PLANE_PADDING];
        let borrowed = with_read_slack(&roomy, roomy.len()).unwrap();
        assert!(matches!(borrowed, Cow::Borrowed(_)));
    }

    #[test]
    fn scale_rgba_accepts_tight_source() {
        // The slice ends exactly at the last pixel, as from an RgbaImage.
        let rgba: Vec<u8> = (0..8 * 8).flat_map(|n| [n as u8, 0, 0, 255]).collect();
        let src = PixelBuffer::packed(&rgba, 8, 8).unwrap();
        assert_eq!(src.data().len(), 8 * 8 * 4);
        let g = geometry(8, 8, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let mut dst = VideoFrame::alloc(g).unwrap();

        ctx.scale_rgba(&src, &mut dst).unwrap();

        let out = dst.pixel_buffer().unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(out.pixel(7, 7), [63, 0, 0, 255]);
    }

    #[test]
    fn scale_image_from_rgba_image() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        let g = geometry(4, 4, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let mut dst = VideoFrame::alloc(g).unwrap();

        ctx.scale_image(&image, &mut dst).unwrap();

        let out = dst.pixel_buffer().unwrap();
        assert_eq!(out.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(out.pixel(3, 3), [10, 20, 30, 255]);
    }

    #[test]
    fn scale_rgba_rejects_unallocated_destination() {
        let rgba = vec![0u8; 4 * 4 * 4];
        let src = PixelBuffer::packed(&rgba, 4, 4).unwrap();
        let dst_geometry = geometry(2, 2, PixelFormat::Yuv420p);
        let mut ctx =
            ScaleContext::new(ScaleConfig::from_rgba(4, 4, dst_geometry).unwrap()).unwrap();
        let mut dst = VideoFrame::empty(dst_geometry);

        let err = ctx.scale_rgba(&src, &mut dst).unwrap_err();
        assert!(matches!(err, Error::FrameNotAllocated));
        assert!(!dst.is_allocated());
    }

    #[test]
    fn scale_rgba_rejects_mismatched_source() {
        let rgba = vec![0u8; 8 * 8 * 4];
        let src = PixelBuffer::packed(&rgba, 8, 8).unwrap();
        let dst_geometry = geometry(2, 2, PixelFormat::Yuv420p);
        let mut ctx =
            ScaleContext::new(ScaleConfig::from_rgba(4, 4, dst_geometry).unwrap()).unwrap();
        let mut dst = VideoFrame::alloc(dst_geometry).unwrap();

        let err = ctx.scale_rgba(&src, &mut dst).unwrap_err();
        assert!(matches!(err, Error::GeometryMismatch { .. }));
    }

    #[test]
    fn scale_rejects_mismatched_destination() {
        let g = geometry(4, 4, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let mut dst = VideoFrame::alloc(g.with_format(PixelFormat::Bgra)).unwrap();

        let err = ctx.scale(&gradient(4, 4), &mut dst, false).unwrap_err();
        match err {
            Error::GeometryMismatch { expected, actual } => {
                assert_eq!(expected, g);
                assert_eq!(actual.format(), PixelFormat::Bgra);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn scale_rejects_unallocated_source() {
        let g = geometry(4, 4, PixelFormat::Rgba);
        let mut ctx = identity_context(g);
        let mut dst = VideoFrame::alloc(g).unwrap();
        let err = ctx.scale(&VideoFrame::empty(g), &mut dst, false).unwrap_err();
        assert!(matches!(err, Error::FrameNotAllocated));
    }

    #[test]
    fn context_is_reusable() {
        let g = geometry(8, 8, PixelFormat::Rgba);
        let mut ctx = ScaleContext::new(ScaleConfig::to_yuv420p(g, 4, 4).unwrap()).unwrap();
        for _ in 0..3 {
            let mut dst = VideoFrame::alloc(ctx.destination()).unwrap();
            ctx.scale(&gradient(8, 8), &mut dst, false).unwrap();
        }
    }

    #[test]
    fn debug_output() {
        let g = geometry(2, 2, PixelFormat::Rgba);
        let ctx = identity_context(g);
        let debug = format!("{ctx:?}");
        assert!(debug.starts_with("ScaleContext"));
        assert!(debug.contains("Point"));
    }
}
