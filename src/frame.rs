use crate::{
    Converted, InvalidNumberOfPlanesError, Layout, Yuv420Image,
    plane_decs::{PlaneDesc, YUV_420_888_PLANES},
    planes::read_planes,
    repack::repack_frame,
};
use std::fmt;

/// Role of a plane inside a YUV_420_888 frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    Y,
    U,
    V,
}

impl PlaneKind {
    fn index(self) -> usize {
        match self {
            PlaneKind::Y => 0,
            PlaneKind::U => 1,
            PlaneKind::V => 2,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => PlaneKind::Y,
            1 => PlaneKind::U,
            _ => PlaneKind::V,
        }
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaneKind::Y => "Y",
            PlaneKind::U => "U",
            PlaneKind::V => "V",
        };

        f.write_str(name)
    }
}

/// A single plane of a frame: the backing bytes and how samples are laid out in them
///
/// The plane's dimensions are not stored, they follow from its role in the [`Frame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    /// Bytes between the start of two consecutive rows
    pub row_stride: usize,
    /// Bytes between two consecutive samples of a row
    pub pixel_stride: usize,
}

impl<'a> Plane<'a> {
    pub fn new(data: &'a [u8], row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }
}

/// Everything that can be wrong with the plane geometry of a frame
///
/// A frame failing validation can never be repacked, callers should drop it.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("width and height must be even for 4:2:0 sub sampling, got {width}x{height}")]
    OddDimensions { width: usize, height: usize },

    #[error("geometry of plane {plane} does not fit into the address space")]
    Overflow { plane: PlaneKind },

    #[error("pixel stride for Y plane must be 1 but got {got} instead")]
    LumaPixelStride { got: usize },

    #[error(
        "U and V planes must have the same pixel and row strides but got \
         pixel={u_pixel_stride} row={u_row_stride} for U and pixel={v_pixel_stride} row={v_row_stride} for V"
    )]
    ChromaStrideMismatch {
        u_pixel_stride: usize,
        u_row_stride: usize,
        v_pixel_stride: usize,
        v_row_stride: usize,
    },

    #[error("supported pixel strides for U and V planes are 1 and 2, got {got}")]
    UnsupportedChromaPixelStride { got: usize },

    #[error("invalid row stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: PlaneKind,
        minimum: usize,
        got: usize,
    },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: PlaneKind,
        minimum: usize,
        got: usize,
    },

    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),
}

/// A validated YUV_420_888 frame borrowing its three planes
///
/// Constructing a `Frame` checks every invariant up front, so [`Frame::layout`] and
/// [`Frame::repack`] cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    width: usize,
    height: usize,
    planes: [Plane<'a>; 3],
}

impl<'a> Frame<'a> {
    pub fn new(
        width: usize,
        height: usize,
        y: Plane<'a>,
        u: Plane<'a>,
        v: Plane<'a>,
    ) -> Result<Self, FormatError> {
        let this = Self {
            width,
            height,
            planes: [y, u, v],
        };

        this.validate()?;

        Ok(this)
    }

    /// Borrow the planes of any [`Yuv420Image`] and validate them
    pub fn from_image<I: Yuv420Image + ?Sized>(image: &'a I) -> Result<Self, FormatError> {
        let [y, u, v] = read_planes(image.planes())?;

        Self::new(image.width(), image.height(), y, u, v)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plane(&self, kind: PlaneKind) -> &Plane<'a> {
        &self.planes[kind.index()]
    }

    /// Width and height of the given plane in samples
    pub fn plane_dimensions(&self, kind: PlaneKind) -> (usize, usize) {
        let desc = YUV_420_888_PLANES[kind.index()];

        (desc.width_op.op(self.width), desc.height_op.op(self.height))
    }

    /// Packed layout this frame repacks into, decided by the chroma pixel stride
    pub fn layout(&self) -> Layout {
        if self.plane(PlaneKind::U).pixel_stride == 1 {
            Layout::I420
        } else {
            Layout::NV21
        }
    }

    /// Remove all padding and pack the frame into a single buffer
    ///
    /// `reuse` is only a hint. It is used when its capacity is large enough, otherwise a new
    /// buffer is allocated. Either way every byte of the returned buffer is written.
    pub fn repack(&self, reuse: Option<Vec<u8>>) -> Converted {
        repack_frame(self, reuse)
    }

    fn validate(&self) -> Result<(), FormatError> {
        if self.width == 0 || self.height == 0 {
            return Err(FormatError::InvalidDimensions);
        }

        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(FormatError::OddDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let [y, u, v] = &self.planes;

        if y.pixel_stride != 1 {
            return Err(FormatError::LumaPixelStride {
                got: y.pixel_stride,
            });
        }

        if u.pixel_stride != v.pixel_stride || u.row_stride != v.row_stride {
            return Err(FormatError::ChromaStrideMismatch {
                u_pixel_stride: u.pixel_stride,
                u_row_stride: u.row_stride,
                v_pixel_stride: v.pixel_stride,
                v_row_stride: v.row_stride,
            });
        }

        if Layout::from_chroma_pixel_stride(u.pixel_stride).is_none() {
            return Err(FormatError::UnsupportedChromaPixelStride {
                got: u.pixel_stride,
            });
        }

        for (i, (desc, plane)) in YUV_420_888_PLANES.iter().zip(&self.planes).enumerate() {
            bounds_check(PlaneKind::from_index(i), desc, plane, self.width, self.height)?;
        }

        Ok(())
    }
}

/// Ensure the stride fits a row and the buffer reaches the last sample of the last row
#[deny(clippy::arithmetic_side_effects)]
fn bounds_check(
    kind: PlaneKind,
    desc: &PlaneDesc,
    plane: &Plane<'_>,
    width: usize,
    height: usize,
) -> Result<(), FormatError> {
    let overflow = || FormatError::Overflow { plane: kind };

    // Both are at least 1 since the frame dimensions are even and non zero
    let plane_width = desc.width_op.op(width);
    let plane_height = desc.height_op.op(height);

    let min_stride = plane_width
        .checked_mul(plane.pixel_stride)
        .ok_or_else(overflow)?;

    if min_stride > plane.row_stride {
        return Err(FormatError::InvalidStride {
            plane: kind,
            minimum: min_stride,
            got: plane.row_stride,
        });
    }

    let last_row_start = plane
        .row_stride
        .checked_mul(plane_height.saturating_sub(1))
        .ok_or_else(overflow)?;

    let last_sample = plane
        .pixel_stride
        .checked_mul(plane_width.saturating_sub(1))
        .and_then(|offset| offset.checked_add(last_row_start))
        .ok_or_else(overflow)?;

    let min_len = last_sample.checked_add(1).ok_or_else(overflow)?;

    if min_len > plane.data.len() {
        return Err(FormatError::InvalidPlaneSize {
            plane: kind,
            minimum: min_len,
            got: plane.data.len(),
        });
    }

    Ok(())
}

impl Yuv420Image for Frame<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_> {
        Box::new(self.planes.iter().copied())
    }
}
