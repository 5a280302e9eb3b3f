use crate::{
    Layout, Plane, StrictApi as _,
    plane_decs::{I420_PLANES, NV21_PLANES, PlaneDesc},
    util::ArrayIter,
};
use std::mem::MaybeUninit;

#[derive(Debug, thiserror::Error)]
#[error("got invalid number of planes, expected {expected} but only got {got}")]
pub struct InvalidNumberOfPlanesError {
    pub expected: usize,
    pub got: usize,
}

pub(crate) fn read_planes<'a, const N: usize>(
    mut iter: impl Iterator<Item = Plane<'a>>,
) -> Result<[Plane<'a>; N], InvalidNumberOfPlanesError> {
    let mut out = [Plane::default(); N];

    for (i, out) in out.iter_mut().enumerate() {
        *out = iter.next().ok_or(InvalidNumberOfPlanesError {
            expected: N,
            got: i,
        })?;
    }

    Ok(out)
}

/// Split a packed buffer of the given layout into its planes
///
/// # Panics
///
/// If `buf` is too small for the given dimensions this function will panic
#[deny(clippy::arithmetic_side_effects)]
pub fn infer<S: AnySlice>(
    layout: Layout,
    buf: S,
    width: usize,
    height: usize,
) -> impl Iterator<Item = S> {
    match layout {
        Layout::I420 => ArrayIter::from(infer_i420(buf, width, height)),
        Layout::NV21 => ArrayIter::from(infer_nv21(buf, width, height)),
    }
}

#[deny(clippy::arithmetic_side_effects)]
fn infer_impl<const N: usize, S: AnySlice>(
    plane_decs: [PlaneDesc; N],
    mut buf: S,
    width: usize,
    height: usize,
) -> [S; N] {
    let mut out: [MaybeUninit<S>; N] = [const { MaybeUninit::uninit() }; N];

    for (desc, out) in plane_decs.into_iter().zip(out.iter_mut()) {
        let split_at = desc
            .height_op
            .op(height)
            .strict_mul_(desc.packed_stride(width));

        let (prev, rem) = buf.slice_split_at(split_at);

        out.write(prev);
        buf = rem;
    }

    // Safety: every element was written in the loop above
    out.map(|p| unsafe { p.assume_init() })
}

/// Split a packed I420 buffer into its Y, U and V planes
///
/// # Panics
///
/// If `buf` is too small for the given dimensions this function will panic
#[deny(clippy::arithmetic_side_effects)]
pub fn infer_i420<S: AnySlice>(buf: S, width: usize, height: usize) -> [S; 3] {
    infer_impl(I420_PLANES, buf, width, height)
}

/// Split a packed NV21 buffer into its Y and interleaved VU planes
///
/// # Panics
///
/// If `buf` is too small for the given dimensions this function will panic
#[deny(clippy::arithmetic_side_effects)]
pub fn infer_nv21<S: AnySlice>(buf: S, width: usize, height: usize) -> [S; 2] {
    infer_impl(NV21_PLANES, buf, width, height)
}

/// Helper trait implemented on &[T] and &mut [T]
#[diagnostic::on_unimplemented(message = "AnySlice is only implemented for &[T] and &mut [T].\n\
               When using or Vec<T> or similar try .as_slice() or .as_mut_slice()")]
pub trait AnySlice: sealed::Sealed + Default + Sized {
    fn slice_len(&self) -> usize;
    fn slice_split_at(self, at: usize) -> (Self, Self);
}

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for &[T] {}
    impl<T> Sealed for &mut [T] {}
}

impl<T> AnySlice for &[T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at(at)
    }
}

impl<T> AnySlice for &mut [T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at_mut(at)
    }
}
