//! Parallel iteration with a serial fallback.
//!
//! With the `parallel` feature the hydrogen-bond search runs on Rayon's thread pool. Without
//! it, the shims below map the same method names onto ordinary iterators and slice sorts,
//! so callers import `crate::utils::parallel::*` and never branch on the feature.

#[cfg(feature = "parallel")]
pub use rayon::prelude::{IntoParallelRefIterator, ParallelIterator, ParallelSliceMut};

#[cfg(not(feature = "parallel"))]
pub use self::fallback::*;

#[cfg(not(feature = "parallel"))]
mod fallback {
    pub use std::iter::Iterator as ParallelIterator;

    /// `par_iter()` for anything iterable by reference.
    pub trait IntoParallelRefIterator<'data> {
        type Item;
        type Iter: Iterator<Item = Self::Item>;
        fn par_iter(&'data self) -> Self::Iter;
    }

    impl<'data, I: 'data + ?Sized> IntoParallelRefIterator<'data> for I
    where
        &'data I: IntoIterator,
    {
        type Item = <&'data I as IntoIterator>::Item;
        type Iter = <&'data I as IntoIterator>::IntoIter;
        fn par_iter(&'data self) -> Self::Iter {
            self.into_iter()
        }
    }

    /// `par_sort_unstable()` on slices.
    pub trait ParallelSliceMut<T> {
        fn par_sort_unstable(&mut self)
        where
            T: Ord;
    }

    impl<T> ParallelSliceMut<T> for [T] {
        fn par_sort_unstable(&mut self)
        where
            T: Ord,
        {
            self.sort_unstable();
        }
    }
}
