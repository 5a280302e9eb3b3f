use crate::{CropError, Cropped, Plane, Window};

/// Frame as exposed by a camera API, implemented by thin adapters over the host's image type
///
/// Values are read once per call and validated by [`Frame::from_image`](crate::Frame::from_image),
/// an implementation only has to hand out its planes as they are.
pub trait Yuv420Image {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Returns an iterator yielding the Y, U and V planes in that order
    fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_>;
}

/// [`Yuv420Image`] extension methods
pub trait Yuv420ImageExt: Yuv420Image {
    /// Crop the image with the given window
    fn crop(self, window: Window) -> Result<Cropped<Self>, CropError>
    where
        Self: Sized,
    {
        Cropped::new(self, window)
    }

    /// Crop the image to the next lowest even resolution
    fn crop_even(self) -> Result<Cropped<Self>, CropError>
    where
        Self: Sized,
    {
        let width = self.width().saturating_sub(1).next_multiple_of(2);
        let height = self.height().saturating_sub(1).next_multiple_of(2);

        Cropped::new(
            self,
            Window {
                x: 0,
                y: 0,
                width,
                height,
            },
        )
    }
}

impl<T: Yuv420Image + ?Sized> Yuv420ImageExt for T {}

impl<T: Yuv420Image + ?Sized> Yuv420Image for &T {
    fn width(&self) -> usize {
        <T as Yuv420Image>::width(self)
    }

    fn height(&self) -> usize {
        <T as Yuv420Image>::height(self)
    }

    fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_> {
        <T as Yuv420Image>::planes(self)
    }
}

impl<T: Yuv420Image + ?Sized> Yuv420Image for &mut T {
    fn width(&self) -> usize {
        <T as Yuv420Image>::width(self)
    }

    fn height(&self) -> usize {
        <T as Yuv420Image>::height(self)
    }

    fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_> {
        <T as Yuv420Image>::planes(self)
    }
}

impl<T: Yuv420Image + ?Sized> Yuv420Image for Box<T> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn planes(&self) -> Box<dyn Iterator<Item = Plane<'_>> + '_> {
        (**self).planes()
    }
}
