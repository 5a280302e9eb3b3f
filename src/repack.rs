use crate::{
    Converted, Frame, Layout, Plane, PlaneKind, StrictApi as _, infer_i420, infer_nv21,
    reuse::prepare_output,
};

pub(crate) fn repack_frame(frame: &Frame<'_>, reuse: Option<Vec<u8>>) -> Converted {
    let layout = frame.layout();
    let (width, height) = (frame.width(), frame.height());
    let chroma_dims = frame.plane_dimensions(PlaneKind::U);

    let mut buffer = prepare_output(reuse, layout.buffer_size(width, height));

    let y = frame.plane(PlaneKind::Y);
    let u = frame.plane(PlaneKind::U);
    let v = frame.plane(PlaneKind::V);

    match layout {
        Layout::I420 => {
            let [dst_y, dst_u, dst_v] = infer_i420(&mut buffer[..], width, height);

            copy_plane(y, (width, height), dst_y);
            copy_plane(u, chroma_dims, dst_u);
            copy_plane(v, chroma_dims, dst_v);
        }
        Layout::NV21 => {
            let [dst_y, dst_vu] = infer_nv21(&mut buffer[..], width, height);

            copy_plane(y, (width, height), dst_y);
            copy_vu(v, u, chroma_dims, dst_vu);
        }
    }

    Converted::new(layout, width, height, buffer)
}

/// Copy a plane with a pixel stride of 1 into `dst`, dropping the row padding
#[deny(clippy::arithmetic_side_effects)]
fn copy_plane(src: &Plane<'_>, (width, height): (usize, usize), dst: &mut [u8]) {
    debug_assert_eq!(src.pixel_stride, 1);

    if src.row_stride == width {
        log::trace!("copying {width}x{height} plane in one go");

        dst.copy_from_slice(&src.data[..width.strict_mul_(height)]);
        return;
    }

    log::trace!(
        "copying {width}x{height} plane row by row, dropping {} bytes per row",
        src.row_stride.abs_diff(width)
    );

    // The last row may end right after its last sample, so chunks instead of chunks_exact
    let src_rows = src.data.chunks(src.row_stride);
    let dst_rows = dst.chunks_exact_mut(width);

    for (src_row, dst_row) in src_rows.zip(dst_rows) {
        dst_row.copy_from_slice(&src_row[..width]);
    }
}

/// Interleave the V and U planes into `dst` as V0 U0 V1 U1 ...
#[deny(clippy::arithmetic_side_effects)]
fn copy_vu(v: &Plane<'_>, u: &Plane<'_>, (width, height): (usize, usize), dst: &mut [u8]) {
    debug_assert_eq!(v.pixel_stride, 2);

    if is_nv21_region(v, u) {
        copy_vu_region(v, u, (width, height), dst);
    } else {
        gather_vu(v, u, (width, height), dst);
    }
}

/// Check whether U starts exactly one byte after V, which means both planes are views
/// of the same interleaved VU region
fn is_nv21_region(v: &Plane<'_>, u: &Plane<'_>) -> bool {
    std::ptr::eq(v.data.as_ptr().wrapping_add(1), u.data.as_ptr())
}

/// Copy an interleaved VU region through the V plane
///
/// The V plane's view ends on the last V sample, so the final U sample is read from the U plane.
#[deny(clippy::arithmetic_side_effects)]
fn copy_vu_region(
    v: &Plane<'_>,
    u: &Plane<'_>,
    (width, height): (usize, usize),
    dst: &mut [u8],
) {
    let row_len = width.strict_mul_(2);
    let last_row_start = v.row_stride.strict_mul_(height.strict_sub_(1));
    let last_u = last_row_start.strict_add_(row_len.strict_sub_(2));

    let (head, tail) = dst.split_at_mut(dst.len().strict_sub_(1));

    if v.row_stride == row_len {
        log::trace!("copying {width}x{height} VU region in one go");

        head.copy_from_slice(&v.data[..head.len()]);
    } else {
        log::trace!("copying {width}x{height} VU region row by row");

        let (rows, last_row) = head.split_at_mut(row_len.strict_mul_(height.strict_sub_(1)));

        let src_rows = v.data.chunks(v.row_stride);
        let dst_rows = rows.chunks_exact_mut(row_len);

        for (src_row, dst_row) in src_rows.zip(dst_rows) {
            dst_row.copy_from_slice(&src_row[..row_len]);
        }

        let last_row_end = last_row_start.strict_add_(last_row.len());
        last_row.copy_from_slice(&v.data[last_row_start..last_row_end]);
    }

    tail[0] = u.data[last_u];
}

/// Interleave V and U samples read from independent buffers
#[deny(clippy::arithmetic_side_effects)]
fn gather_vu(v: &Plane<'_>, u: &Plane<'_>, (width, height): (usize, usize), dst: &mut [u8]) {
    log::trace!("gathering {width}x{height} VU samples from separate planes");

    let row_len = width.strict_mul_(2);

    let v_rows = v.data.chunks(v.row_stride);
    let u_rows = u.data.chunks(u.row_stride);
    let dst_rows = dst.chunks_exact_mut(row_len);

    for ((dst_row, v_row), u_row) in dst_rows.zip(v_rows).zip(u_rows) {
        let v_samples = v_row.iter().step_by(v.pixel_stride);
        let u_samples = u_row.iter().step_by(u.pixel_stride);

        let pairs = dst_row.chunks_exact_mut(2);

        for ((pair, v_sample), u_sample) in pairs.zip(v_samples).zip(u_samples) {
            pair[0] = *v_sample;
            pair[1] = *u_sample;
        }
    }
}
