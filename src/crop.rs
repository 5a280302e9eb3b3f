use crate::{Plane, Yuv420Image, plane_decs::YUV_420_888_PLANES};

/// Error indicating an invalid [`Window`] for a given image
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("the given window coordinates go out of the parent's image bounds")]
    WindowSizeOutOfBounds,

    #[error("window origin ({x}, {y}) must be even to stay aligned with the chroma samples")]
    UnalignedWindow { x: usize, y: usize },
}

/// Rect used to mark the "cropping" window
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Wrapper around a [`Yuv420Image`] and a [`Window`] cropping the wrapped image
///
/// Cropping only moves the start of each plane, row and pixel strides are kept.
pub struct Cropped<T>(T, Window);

impl<T: Yuv420Image> Cropped<T> {
    pub fn new(t: T, window: Window) -> Result<Self, CropError> {
        if window.x % 2 != 0 || window.y % 2 != 0 {
            return Err(CropError::UnalignedWindow {
                x: window.x,
                y: window.y,
            });
        }

        let w = window
            .x
            .checked_add(window.width)
            .ok_or(CropError::WindowSizeOutOfBounds)?;

        let h = window
            .y
            .checked_add(window.height)
            .ok_or(CropError::WindowSizeOutOfBounds)?;

        if (w > t.width()) || (h > t.height()) {
            return Err(CropError::WindowSizeOutOfBounds);
        }

        Ok(Self(t, window))
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Yuv420Image> Yuv420Image for Cropped<T> {
    fn width(&self) -> usize {
        self.1.width
    }

    fn height(&self) -> usize {
        self.1.height
    }

    fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_> {
        crop_planes(self.0.planes(), self.1)
    }
}

fn crop_planes<'a>(
    planes: Box<dyn Iterator<Item = Plane<'a>> + 'a>,
    window: Window,
) -> Box<dyn Iterator<Item = Plane<'a>> + 'a> {
    Box::new(
        YUV_420_888_PLANES
            .iter()
            .zip(planes)
            .map(move |(plane_desc, plane)| {
                let x = plane_desc.width_op.op(window.x);
                let y = plane_desc.height_op.op(window.y);

                // An offset past the end leaves an empty plane which fails validation later
                let data = y
                    .checked_mul(plane.row_stride)
                    .zip(x.checked_mul(plane.pixel_stride))
                    .and_then(|(row, col)| row.checked_add(col))
                    .and_then(|offset| plane.data.get(offset..))
                    .unwrap_or_default();

                Plane { data, ..plane }
            }),
    )
}

#[cfg(test)]
mod tests {
    use crate::{Frame, FormatError, Layout, Yuv420ImageExt as _};

    use super::*;

    /// 6x6 I420 source with a row stride of 8, every luma sample holds `row * 16 + column`
    struct PaddedI420 {
        y: Vec<u8>,
        u: Vec<u8>,
        v: Vec<u8>,
        width: usize,
        height: usize,
    }

    impl PaddedI420 {
        fn new(width: usize, height: usize) -> Self {
            let y = (0..height)
                .flat_map(|row| (0..8).map(move |col| (row * 16 + col) as u8))
                .collect();
            let u = (0..height.div_ceil(2))
                .flat_map(|row| (0..8).map(move |col| (0x80 + row * 16 + col) as u8))
                .collect();
            let v = (0..height.div_ceil(2))
                .flat_map(|row| (0..8).map(move |col| (0xC0 + row * 16 + col) as u8))
                .collect();

            Self {
                y,
                u,
                v,
                width,
                height,
            }
        }
    }

    impl Yuv420Image for PaddedI420 {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_> {
            Box::new(
                [
                    Plane::new(&self.y, 8, 1),
                    Plane::new(&self.u, 8, 1),
                    Plane::new(&self.v, 8, 1),
                ]
                .into_iter(),
            )
        }
    }

    #[test]
    fn odd_image_is_rejected_until_cropped() {
        let image = PaddedI420::new(5, 7);

        assert!(matches!(
            Frame::from_image(&image),
            Err(FormatError::OddDimensions {
                width: 5,
                height: 7
            })
        ));

        let cropped = image.crop_even().unwrap();
        assert_eq!((cropped.width(), cropped.height()), (4, 6));

        let frame = Frame::from_image(&cropped).unwrap();
        let converted = frame.repack(None);

        assert_eq!(converted.layout(), Layout::I420);
        assert_eq!(converted.buffer().len(), 4 * 6 * 3 / 2);
        assert_eq!(&converted.buffer()[..4], &[0, 1, 2, 3]);
        assert_eq!(&converted.buffer()[20..24], &[80, 81, 82, 83]);
    }

    #[test]
    fn window_moves_plane_start() {
        let image = PaddedI420::new(6, 6);

        let cropped = image
            .crop(Window {
                x: 2,
                y: 2,
                width: 4,
                height: 4,
            })
            .unwrap();

        let converted = Frame::from_image(&cropped).unwrap().repack(None);
        let planes: Vec<_> = converted.planes().collect();

        assert_eq!(&planes[0].0[..4], &[34, 35, 36, 37]);
        assert_eq!(planes[1].0, &[0x91, 0x92, 0xA1, 0xA2]);
        assert_eq!(planes[2].0, &[0xD1, 0xD2, 0xE1, 0xE2]);
    }

    #[test]
    fn rejects_invalid_windows() {
        let image = PaddedI420::new(6, 6);

        let err = Cropped::new(
            &image,
            Window {
                x: 1,
                y: 0,
                width: 4,
                height: 4,
            },
        )
        .err()
        .unwrap();
        assert!(matches!(err, CropError::UnalignedWindow { x: 1, y: 0 }));

        let err = Cropped::new(
            &image,
            Window {
                x: 4,
                y: 0,
                width: 4,
                height: 4,
            },
        )
        .err()
        .unwrap();
        assert!(matches!(err, CropError::WindowSizeOutOfBounds));
    }
}
