/*!
    Multi-plane video frame type.
*/

use crate::{Error, ImageGeometry, PixelBuffer, PixelBufferMut, PixelFormat, Pts, Result};

/**
    Row alignment, in bytes, of planes allocated by [`VideoFrame::alloc`].
*/
pub const STRIDE_ALIGN: usize = 64;

/**
    Extra zeroed bytes at the end of every frame plane, so SIMD code in
    the native scaler may read slightly past the last row.
*/
pub const PLANE_PADDING: usize = 64;

/**
    One plane of pixel data and the distance in bytes between its rows.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    pub data: Vec<u8>,
    pub stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self { data, stride }
    }
}

/**
    A video frame: geometry, zero or more plane buffers, and timestamps.

    A frame created with [`VideoFrame::empty`] has a geometry but no
    planes, the same state as an FFmpeg frame before its buffers are
    allocated. Scaling into such a frame is rejected. Once allocated, the
    planes always match the layout of the geometry's pixel format and end
    with at least [`PLANE_PADDING`] bytes past the last row.
*/
#[derive(Clone, Debug)]
pub struct VideoFrame {
    geometry: ImageGeometry,
    planes: Vec<Plane>,
    /// Presentation timestamp (None for frames without timing).
    pub pts: Option<Pts>,
    /// Decode timestamp (None for frames without timing).
    pub dts: Option<Pts>,
}

impl VideoFrame {
    /**
        Create a frame with the given geometry and no plane buffers.
    */
    pub fn empty(geometry: ImageGeometry) -> Self {
        Self {
            geometry,
            planes: Vec::new(),
            pts: None,
            dts: None,
        }
    }

    /**
        Create a frame with zeroed, aligned plane buffers.

        Allocation failure is reported as [`Error::Allocation`] instead of
        aborting the process.
    */
    pub fn alloc(geometry: ImageGeometry) -> Result<Self> {
        let mut frame = Self::empty(geometry);
        frame.allocate()?;
        Ok(frame)
    }

    /**
        Allocate plane buffers for this frame's geometry, replacing any
        existing planes.
    */
    pub fn allocate(&mut self) -> Result<()> {
        let (width, height) = self.dimensions();
        let format = self.geometry.format();

        let mut planes = Vec::new();
        planes.try_reserve_exact(format.plane_count())?;
        for layout in (0..).map_while(|i| format.plane_layout(i, width, height)) {
            let stride = layout
                .row_bytes
                .checked_next_multiple_of(STRIDE_ALIGN)
                .ok_or_else(|| Error::invalid_geometry("plane row too large to align"))?;
            let len = stride
                .checked_mul(layout.rows)
                .and_then(|n| n.checked_add(PLANE_PADDING))
                .ok_or_else(|| Error::invalid_geometry("plane size overflows"))?;

            let mut data = Vec::new();
            data.try_reserve_exact(len)?;
            data.resize(len, 0);
            planes.push(Plane { data, stride });
        }

        self.planes = planes;
        Ok(())
    }

    /**
        Create a frame from caller-provided planes.

        The number of planes must match the format, each stride must cover
        a full row, and each plane must reach the end of its last row.
        Planes without [`PLANE_PADDING`] bytes of slack after the last row
        are zero-extended.
    */
    pub fn from_planes(geometry: ImageGeometry, mut planes: Vec<Plane>) -> Result<Self> {
        let (width, height) = (geometry.width() as usize, geometry.height() as usize);
        let format = geometry.format();
        if planes.len() != format.plane_count() {
            return Err(Error::invalid_geometry(format!(
                "{format} needs {} planes, got {}",
                format.plane_count(),
                planes.len()
            )));
        }

        for (index, plane) in planes.iter_mut().enumerate() {
            let Some(layout) = format.plane_layout(index, width, height) else {
                break;
            };
            if plane.stride < layout.row_bytes {
                return Err(Error::InvalidStride {
                    stride: plane.stride,
                    row_bytes: layout.row_bytes,
                });
            }
            let needed = layout
                .min_len(plane.stride)
                .ok_or_else(|| Error::invalid_geometry("plane size overflows"))?;
            if plane.data.len() < needed {
                return Err(Error::BufferTooSmall {
                    needed,
                    have: plane.data.len(),
                });
            }

            let padded = layout
                .padded_len(plane.stride)
                .ok_or_else(|| Error::invalid_geometry("plane size overflows"))?;
            if plane.data.len() < padded {
                plane.data.try_reserve_exact(padded - plane.data.len())?;
                plane.data.resize(padded, 0);
            }
        }

        Ok(Self {
            geometry,
            planes,
            pts: None,
            dts: None,
        })
    }

    /**
        Create a single-plane RGBA frame from tightly packed rows.
    */
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let geometry = ImageGeometry::new(width, height, PixelFormat::Rgba)?;
        let stride = width as usize * 4;
        Self::from_planes(geometry, vec![Plane::new(data, stride)])
    }

    /**
        Set presentation and decode timestamps, returning the frame.
    */
    pub fn with_timestamps(mut self, pts: Option<Pts>, dts: Option<Pts>) -> Self {
        self.pts = pts;
        self.dts = dts;
        self
    }

    /**
        Copy presentation and decode timestamps from another frame.
    */
    pub fn copy_timestamps_from(&mut self, other: &VideoFrame) {
        self.pts = other.pts;
        self.dts = other.dts;
    }

    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    pub fn width(&self) -> u32 {
        self.geometry.width()
    }

    pub fn height(&self) -> u32 {
        self.geometry.height()
    }

    pub fn format(&self) -> PixelFormat {
        self.geometry.format()
    }

    /**
        Returns true if plane buffers are present.
    */
    pub fn is_allocated(&self) -> bool {
        !self.planes.is_empty()
    }

    /**
        Number of allocated planes (zero for an empty frame).
    */
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /**
        Bytes of plane `index`, including row padding.
    */
    pub fn plane_data(&self, index: usize) -> Option<&[u8]> {
        self.planes.get(index).map(|p| p.data.as_slice())
    }

    /**
        Mutable bytes of plane `index`, including row padding.
    */
    pub fn plane_data_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        self.planes.get_mut(index).map(|p| p.data.as_mut_slice())
    }

    /**
        Row stride in bytes of plane `index`.
    */
    pub fn plane_stride(&self, index: usize) -> Option<usize> {
        self.planes.get(index).map(|p| p.stride)
    }

    /**
        All planes as (bytes, stride) pairs.
    */
    pub fn planes(&self) -> impl Iterator<Item = (&[u8], usize)> {
        self.planes.iter().map(|p| (p.data.as_slice(), p.stride))
    }

    /**
        All planes as mutable (bytes, stride) pairs.
    */
    pub fn planes_mut(&mut self) -> impl Iterator<Item = (&mut [u8], usize)> {
        self.planes
            .iter_mut()
            .map(|p| (p.data.as_mut_slice(), p.stride))
    }

    /**
        View plane 0 as a packed 4-byte-per-pixel buffer.

        Only available for 32-bit packed formats such as RGBA.
    */
    pub fn pixel_buffer(&self) -> Result<PixelBuffer<'_>> {
        self.check_packed_32()?;
        let (width, height) = self.dimensions();
        let plane = self.planes.first().ok_or(Error::FrameNotAllocated)?;
        PixelBuffer::new(&plane.data, width, height, plane.stride)
    }

    /**
        Mutable view of plane 0 as a packed 4-byte-per-pixel buffer.
    */
    pub fn pixel_buffer_mut(&mut self) -> Result<PixelBufferMut<'_>> {
        self.check_packed_32()?;
        let (width, height) = self.dimensions();
        let plane = self.planes.first_mut().ok_or(Error::FrameNotAllocated)?;
        PixelBufferMut::new(&mut plane.data, width, height, plane.stride)
    }

    fn check_packed_32(&self) -> Result<()> {
        if self.format().is_packed_32() {
            Ok(())
        } else {
            Err(Error::unsupported_format(format!(
                "{} is not a packed 32-bit format",
                self.format()
            )))
        }
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }
}

// Ensure frames are Send + Sync
static_assertions::assert_impl_all!(VideoFrame: Send, Sync);
