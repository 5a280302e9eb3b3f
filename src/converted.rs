use crate::{Layout, planes::infer};

/// A repacked frame: one contiguous buffer without padding and the layout it is packed in
///
/// The buffer can be handed back to the next [`repack`](crate::repack) call through
/// [`Converted::into_buffer`] to avoid allocating per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    layout: Layout,
    width: usize,
    height: usize,
    buffer: Vec<u8>,
}

impl Converted {
    pub(crate) fn new(layout: Layout, width: usize, height: usize, buffer: Vec<u8>) -> Self {
        debug_assert_eq!(buffer.len(), layout.buffer_size(width, height));

        Self {
            layout,
            width,
            height,
            buffer,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    /// Returns an iterator yielding every plane of the packed buffer with its stride
    ///
    /// I420 yields Y, U and V. NV21 yields Y and the interleaved VU plane.
    pub fn planes(&self) -> impl Iterator<Item = (&[u8], usize)> {
        infer(self.layout, &self.buffer[..], self.width, self.height)
            .zip(self.layout.packed_strides(self.width))
    }
}

impl AsRef<[u8]> for Converted {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl From<Converted> for Vec<u8> {
    fn from(converted: Converted) -> Self {
        converted.buffer
    }
}
