pub(crate) enum ArrayIter<T> {
    Two(std::array::IntoIter<T, 2>),
    Thr(std::array::IntoIter<T, 3>),
}

impl<T> From<[T; 2]> for ArrayIter<T> {
    fn from(value: [T; 2]) -> Self {
        Self::Two(value.into_iter())
    }
}

impl<T> From<[T; 3]> for ArrayIter<T> {
    fn from(value: [T; 3]) -> Self {
        Self::Thr(value.into_iter())
    }
}

impl<S> Iterator for ArrayIter<S> {
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ArrayIter::Two(iter) => iter.next(),
            ArrayIter::Thr(iter) => iter.next(),
        }
    }
}

/// Overflow checked arithmetic that panics instead of wrapping.
///
/// Only used on values that already passed frame validation.
pub(crate) trait StrictApi: Sized {
    fn strict_add_(self, rhs: Self) -> Self;
    fn strict_sub_(self, rhs: Self) -> Self;
    fn strict_mul_(self, rhs: Self) -> Self;
}

impl StrictApi for usize {
    #[track_caller]
    fn strict_add_(self, rhs: Self) -> Self {
        self.checked_add(rhs)
            .unwrap_or_else(|| panic!("attempt to add with overflow: {self} + {rhs}"))
    }

    #[track_caller]
    fn strict_sub_(self, rhs: Self) -> Self {
        self.checked_sub(rhs)
            .unwrap_or_else(|| panic!("attempt to subtract with overflow: {self} - {rhs}"))
    }

    #[track_caller]
    fn strict_mul_(self, rhs: Self) -> Self {
        self.checked_mul(rhs)
            .unwrap_or_else(|| panic!("attempt to multiply with overflow: {self} * {rhs}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_iter_yields_in_order() {
        let iter = ArrayIter::from([1, 2, 3]);
        assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 3]);

        let iter = ArrayIter::from(["y", "vu"]);
        assert_eq!(iter.collect::<Vec<_>>(), vec!["y", "vu"]);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn strict_mul_panics_on_overflow() {
        let _ = usize::MAX.strict_mul_(2);
    }
}
