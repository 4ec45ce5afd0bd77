use std::cmp::Ordering;
use std::fmt::Debug;

/// Numeric value that can be tracked by the median structures
///
/// Heaps and lazy-deletion maps need a total order, which floats only
/// provide through [`f64::total_cmp`]. Values are passed through
/// [`Sample::canonical`] on entry so that representations which compare
/// equal (`0.0` and `-0.0`) share one key.
pub trait Sample: Copy + Debug + PartialOrd {
    /// Total ordering consistent with `PartialOrd` on finite values
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Mean of the two middle elements of an even-sized window
    fn midpoint(lo: Self, hi: Self) -> Self;

    /// Collapse equal-comparing representations onto one value
    fn canonical(self) -> Self {
        self
    }

    fn is_finite(&self) -> bool {
        true
    }
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }

                // Inherent midpoint does not overflow for large finite values.
                fn midpoint(lo: Self, hi: Self) -> Self {
                    <$t>::midpoint(lo, hi)
                }

                fn canonical(self) -> Self {
                    if self == 0.0 { 0.0 } else { self }
                }

                fn is_finite(&self) -> bool {
                    <$t>::is_finite(*self)
                }
            }
        )*
    };
}

macro_rules! impl_int_sample {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl Sample for $t {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                // Truncates toward zero, computed wide so the sum cannot overflow.
                fn midpoint(lo: Self, hi: Self) -> Self {
                    ((lo as $wide + hi as $wide) / 2) as $t
                }
            }
        )*
    };
}

impl_float_sample!(f32, f64);
impl_int_sample!(i32 => i64, i64 => i128, u32 => u64, u64 => u128);

/// Heap key imposing [`Sample::total_cmp`] as `Ord`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ordered<T>(pub(crate) T);

impl<T: Sample> Ordered<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(value.canonical())
    }
}

impl<T: Sample> PartialEq for Ordered<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl<T: Sample> Eq for Ordered<T> {}

impl<T: Sample> PartialOrd for Ordered<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Sample> Ord for Ordered<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
