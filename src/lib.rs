//! Repack YUV_420_888 camera frames into contiguous I420 or NV21 buffers.
//!
//! Camera APIs hand out frames as three planes, each with its own row stride (which may include
//! padding) and pixel stride (1 for planar chroma, 2 for interleaved chroma). This crate strips
//! the padding and produces a single buffer in the packed layout matching the chroma arrangement.
//!
//! ```
//! use yuv2buf::{Frame, Layout, Plane};
//!
//! // 4x2 frame with 4 bytes of padding after every luma row
//! let y = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8];
//! let u = [9, 10];
//! let v = [11, 12];
//!
//! let frame = Frame::new(
//!     4,
//!     2,
//!     Plane::new(&y, 8, 1),
//!     Plane::new(&u, 2, 1),
//!     Plane::new(&v, 2, 1),
//! )?;
//!
//! let converted = frame.repack(None);
//!
//! assert_eq!(converted.layout(), Layout::I420);
//! assert_eq!(converted.buffer(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
//! # Ok::<(), yuv2buf::FormatError>(())
//! ```

pub use converted::Converted;
pub use crop::{CropError, Cropped, Window};
pub use frame::{FormatError, Frame, Plane, PlaneKind};
pub use image_traits::{Yuv420Image, Yuv420ImageExt};
pub use layout::Layout;
pub use planes::{AnySlice, InvalidNumberOfPlanesError, infer, infer_i420, infer_nv21};

use util::StrictApi;

mod converted;
mod crop;
mod frame;
mod image_traits;
mod layout;
mod plane_decs;
mod planes;
mod repack;
mod reuse;
mod util;

/// Detect which packed layout the given image repacks into
///
/// Fails when the plane geometry is not a supported YUV_420_888 arrangement.
pub fn detect_layout(image: &dyn Yuv420Image) -> Result<Layout, FormatError> {
    Frame::from_image(image).map(|frame| frame.layout())
}

/// Validate the given image and repack it into a single buffer without padding
///
/// `reuse` is a buffer from a previous call, it is taken over when it is large enough.
/// The image is validated before the buffer is touched, but on error `reuse` is dropped.
/// To keep the buffer across invalid frames, validate with [`Frame::from_image`] first and
/// use [`Frame::repack`].
pub fn repack(
    image: &dyn Yuv420Image,
    reuse: Option<Vec<u8>>,
) -> Result<Converted, FormatError> {
    let frame = Frame::from_image(image)?;

    Ok(frame.repack(reuse))
}
