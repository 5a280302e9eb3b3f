//! Scratch buffer handling for repacking frames in a capture loop without per-frame allocations

/// Reuse buffer cannot hold a packed frame
#[derive(Debug, thiserror::Error)]
#[error("reuse buffer has a capacity of {capacity} bytes but {required} are required")]
pub(crate) struct CapacityError {
    pub(crate) capacity: usize,
    pub(crate) required: usize,
}

fn check_capacity(capacity: usize, required: usize) -> Result<(), CapacityError> {
    if capacity < required {
        return Err(CapacityError { capacity, required });
    }

    Ok(())
}

/// Produce an output buffer of exactly `size` bytes, taking over `reuse` when it is large enough
///
/// Contents of a reused buffer are left in place, callers must overwrite every byte.
pub(crate) fn prepare_output(reuse: Option<Vec<u8>>, size: usize) -> Vec<u8> {
    let Some(mut buf) = reuse else {
        return vec![0; size];
    };

    match check_capacity(buf.capacity(), size) {
        Ok(()) => {
            buf.truncate(size);
            // Never reallocates, capacity was checked above
            buf.resize(size, 0);
            buf
        }
        Err(e) => {
            log::debug!("Allocating a new output buffer: {e}");
            vec![0; size]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_without_hint() {
        let buf = prepare_output(None, 24);
        assert_eq!(buf.len(), 24);
    }

    #[test]
    fn reuses_large_enough_buffer() {
        let reuse = Vec::with_capacity(64);
        let ptr = reuse.as_ptr();

        let buf = prepare_output(Some(reuse), 24);

        assert_eq!(buf.len(), 24);
        assert_eq!(buf.as_ptr(), ptr);
    }

    #[test]
    fn shrinks_longer_buffer() {
        let reuse = vec![7u8; 100];
        let ptr = reuse.as_ptr();

        let buf = prepare_output(Some(reuse), 24);

        assert_eq!(buf.len(), 24);
        assert_eq!(buf.as_ptr(), ptr);
    }

    #[test]
    fn replaces_small_buffer() {
        let reuse = vec![7u8; 8];
        let buf = prepare_output(Some(reuse), 24);

        assert_eq!(buf.len(), 24);
        assert!(buf.capacity() >= 24);
    }

    #[test]
    fn capacity_error_message() {
        let err = check_capacity(8, 24).unwrap_err();

        assert_eq!(err.capacity, 8);
        assert_eq!(err.required, 24);
        assert_eq!(
            err.to_string(),
            "reuse buffer has a capacity of 8 bytes but 24 are required"
        );
    }
}
