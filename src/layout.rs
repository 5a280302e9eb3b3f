use crate::{StrictApi as _, plane_decs::*};

/// Packed layouts a YUV_420_888 frame can be repacked into
///
/// The layout is never chosen by the caller, it follows from the chroma pixel stride of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layout {
    /// Y, U and V planes, 4:2:0 sub sampling, 8 bits per sample
    I420,

    /// Y and interleaved VU planes, 4:2:0 sub sampling, 8 bits per sample
    NV21,
}

impl Layout {
    /// Layout produced by a source whose chroma planes have the given pixel stride
    ///
    /// Returns `None` for pixel strides other than 1 and 2.
    pub fn from_chroma_pixel_stride(pixel_stride: usize) -> Option<Self> {
        match pixel_stride {
            1 => Some(Layout::I420),
            2 => Some(Layout::NV21),
            _ => None,
        }
    }

    /// Chroma pixel stride of a source frame that repacks into this layout
    pub fn chroma_pixel_stride(self) -> usize {
        match self {
            Layout::I420 => 1,
            Layout::NV21 => 2,
        }
    }

    /// Calculate the size of a packed buffer in this layout for the given image dimensions.
    ///
    /// For even dimensions this is always `width * height * 3 / 2`.
    #[deny(clippy::arithmetic_side_effects)]
    pub fn buffer_size(self, width: usize, height: usize) -> usize {
        self.plane_desc()
            .iter()
            .fold(0, |size, desc| size.strict_add_(desc.packed_size(width, height)))
    }

    /// Calculate the strides of each plane in a packed buffer
    #[deny(clippy::arithmetic_side_effects)]
    pub fn packed_strides(self, width: usize) -> Vec<usize> {
        self.plane_desc()
            .iter()
            .map(|desc| desc.packed_stride(width))
            .collect()
    }

    /// Number of planes in a packed buffer of this layout
    pub fn num_planes(self) -> usize {
        self.plane_desc().len()
    }

    pub(crate) fn plane_desc(&self) -> &'static [PlaneDesc] {
        match self {
            Layout::I420 => &I420_PLANES,
            Layout::NV21 => &NV21_PLANES,
        }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        [Layout::I420, Layout::NV21]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_size_is_three_halves() {
        for layout in Layout::variants() {
            assert_eq!(layout.buffer_size(4, 4), 24);
            assert_eq!(layout.buffer_size(1920, 1080), 1920 * 1080 * 3 / 2);
            assert_eq!(layout.buffer_size(640, 2), 640 * 2 * 3 / 2);
        }
    }

    #[test]
    fn packed_strides() {
        assert_eq!(Layout::I420.packed_strides(640), vec![640, 320, 320]);
        assert_eq!(Layout::NV21.packed_strides(640), vec![640, 640]);
        assert_eq!(Layout::I420.num_planes(), 3);
        assert_eq!(Layout::NV21.num_planes(), 2);
    }

    #[test]
    fn chroma_pixel_stride_round_trips() {
        for layout in Layout::variants() {
            assert_eq!(
                Layout::from_chroma_pixel_stride(layout.chroma_pixel_stride()),
                Some(layout)
            );
        }

        assert_eq!(Layout::from_chroma_pixel_stride(0), None);
        assert_eq!(Layout::from_chroma_pixel_stride(3), None);
        assert_eq!(Layout::from_chroma_pixel_stride(4), None);
    }
}
