use crate::StrictApi as _;

/// Description for a Plane which can be used to implement bounds checks, stride calculation and buffer sizes.
///
/// Used for both the source planes of a [`Frame`](crate::Frame) and the planes of a packed output buffer.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,

    /// Bytes per sample in a packed row, 2 for interleaved chroma
    pub(crate) bytes_per_sample: usize,
}

impl PlaneDesc {
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width_op.op(width).strict_mul_(self.bytes_per_sample)
    }

    pub(crate) fn packed_size(&self, width: usize, height: usize) -> usize {
        self.packed_stride(width)
            .strict_mul_(self.height_op.op(height))
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    Div(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::Div(rhs) => lhs / rhs,
            Op::Identity => lhs,
        }
    }
}

/// Planes as delivered by a YUV_420_888 source, in Y, U, V order.
///
/// Sample counts only, the chroma pixel stride is a property of the source.
pub(crate) const YUV_420_888_PLANES: [PlaneDesc; 3] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
        bytes_per_sample: 1,
    },
];

pub(crate) const I420_PLANES: [PlaneDesc; 3] = YUV_420_888_PLANES;

pub(crate) const NV21_PLANES: [PlaneDesc; 2] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
        bytes_per_sample: 2,
    },
];
