//! Two-dimensional pixel buffers, owned and borrowed.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::iter::repeat;
use core::ops::{Deref, DerefMut};

use inner::Inner;

use crate::Error;

//
// Types
//

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order,
/// such that element (x, y) maps to element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use softras_core::util::buf::*;
/// let mut buf = Buf2::<u32>::new_default(4, 4);
/// // Indexing with [x, y] yields element at row y, column x:
/// buf[[2, 1]] = 123;
/// // Indexing with an usize i yields row with index i as a slice:
/// assert_eq!(&buf[1usize], &[0, 0, 123, 0]);
/// ```
#[derive(Clone)]
#[repr(transparent)]
pub struct Buf2<T>(Inner<T, Vec<T>>);

/// A mutable rectangular view to a `Buf2` or, in general, any `&mut [T]`
/// slice of memory, such as a window surface owned by a frontend.
///
/// A `MutSlice2` may be discontiguous: each row of `width` elements starts
/// `stride` elements after the previous one.
/// ```text
/// +------stride-----+
/// |____w____        |
/// |r0_______|       |
/// |r1_______|   h   |
/// |r2_______|       |
/// +-----------------+
/// ```
#[repr(transparent)]
pub struct MutSlice2<'a, T>(Inner<T, &'a mut [T]>);

//
// Inherent impls
//

impl<T> Buf2<T> {
    /// Returns a buffer with size `w` × `h`, with elements initialized
    /// with values from `init` in row-major order.
    ///
    /// # Panics
    /// If there are fewer than `w * h` elements in `init`.
    pub fn new<I>(w: usize, h: usize, init: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data: Vec<_> = init.into_iter().take(w * h).collect();
        assert_eq!(data.len(), w * h);
        Self(Inner { w, h, stride: w, data, _pd: Default::default() })
    }
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `T::default()`.
    pub fn new_default(w: usize, h: usize) -> Self
    where
        T: Clone + Default,
    {
        Self::new(w, h, repeat(T::default()))
    }

    /// Returns a view of the backing data of `self`.
    pub fn data(&self) -> &[T] {
        &self.0.data
    }
}

impl<'a, T> MutSlice2<'a, T> {
    /// Returns a new `MutSlice2` view to `data` with dimensions `w` and `h`
    /// and stride `stride`.
    ///
    /// # Errors
    /// [`Error::InvalidBuffer`] if `stride < w` or if the last row would
    /// overflow `data`.
    ///
    /// # Examples
    /// ```
    /// # use softras_core::util::buf::MutSlice2;
    /// let mut data = [0u32; 7];
    /// let mut slice = MutSlice2::new(2, 2, 3, &mut data).unwrap();
    /// slice.fill(1);
    /// assert_eq!(data, [1, 1, 0, 1, 1, 0, 0]);
    ///
    /// assert!(MutSlice2::new(4, 2, 3, &mut [0u32; 8]).is_err());
    /// ```
    pub fn new(
        w: usize,
        h: usize,
        stride: usize,
        data: &'a mut [T],
    ) -> Result<Self, Error> {
        Inner::new(w, h, stride, data).map(Self)
    }
}

//
// Foreign trait impls
//

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.0.debug_fmt(f, "Buf2")
    }
}
impl<T> Debug for MutSlice2<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.0.debug_fmt(f, "MutSlice2")
    }
}

impl<T> Deref for Buf2<T> {
    type Target = Inner<T, Vec<T>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<'a, T> Deref for MutSlice2<'a, T> {
    type Target = Inner<T, &'a mut [T]>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Buf2<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
impl<T> DerefMut for MutSlice2<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub mod inner {
    use core::fmt::Formatter;
    use core::marker::PhantomData;
    use core::ops::{Deref, DerefMut, Index, IndexMut};

    use crate::Error;

    /// A helper type that abstracts over owned and borrowed buffers.
    /// The types `Buf2` and `MutSlice2` deref to `Inner`.
    #[derive(Clone)]
    pub struct Inner<T, D> {
        pub(super) w: usize,
        pub(super) h: usize,
        pub(super) stride: usize,
        pub(super) data: D,
        pub(super) _pd: PhantomData<T>,
    }

    impl<T, D> Inner<T, D> {
        /// Returns the width of `self`.
        #[inline]
        pub fn width(&self) -> usize {
            self.w
        }
        /// Returns the height of `self`.
        #[inline]
        pub fn height(&self) -> usize {
            self.h
        }
        /// Returns the stride of `self`.
        #[inline]
        pub fn stride(&self) -> usize {
            self.stride
        }
        /// Returns whether the rows of `self` are stored contiguously
        /// in memory.
        pub fn is_contiguous(&self) -> bool {
            self.stride == self.w || self.h <= 1 || self.w == 0
        }
        /// Returns whether `self` has no elements (if its width or height is 0).
        pub fn is_empty(&self) -> bool {
            self.w == 0 || self.h == 0
        }

        #[inline]
        fn to_index_checked(&self, x: usize, y: usize) -> Option<usize> {
            (x < self.w && y < self.h).then(|| y * self.stride + x)
        }

        #[cold]
        #[inline(never)]
        #[track_caller]
        fn position_out_of_bounds(&self, x: usize, y: usize) -> ! {
            panic!(
                "position (x={x}, y={y}) out of bounds (0..{}, 0..{})",
                self.w, self.h
            )
        }

        /// A helper for implementing `Debug`.
        pub(super) fn debug_fmt(
            &self,
            f: &mut Formatter,
            name: &str,
        ) -> core::fmt::Result {
            f.debug_struct(name)
                .field("w", &self.w)
                .field("h", &self.h)
                .field("stride", &self.stride)
                .finish()
        }
    }

    impl<T, D: Deref<Target = [T]>> Inner<T, D> {
        #[rustfmt::skip]
        pub(super) fn new(w: usize, h: usize, stride: usize, data: D)
            -> Result<Self, Error>
        {
            let len = data.len();
            let fits = h == 0 || (h - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(w))
                .is_some_and(|n| n <= len);
            if stride < w || !fits {
                return Err(Error::InvalidBuffer { w, h, stride, len });
            }
            Ok(Self { w, h, stride, data, _pd: PhantomData })
        }

        /// Returns a reference to the element at (x, y),
        /// or `None` if the position is out of bounds.
        pub fn get(&self, x: usize, y: usize) -> Option<&T> {
            self.to_index_checked(x, y).map(|i| &self.data[i])
        }

        /// Returns an iterator over the rows of `self` as `&[T]` slices.
        /// The length of each slice equals [`self.width()`](Self::width).
        pub fn rows(&self) -> impl Iterator<Item = &[T]> {
            let w = self.w;
            self.data
                .chunks(self.stride.max(1))
                .take(self.h)
                .map(move |row| &row[..w])
        }

        /// Returns an iterator over all the elements of `self` in row-major
        /// order.
        pub fn iter(&self) -> impl Iterator<Item = &'_ T> {
            self.rows().flatten()
        }
    }

    impl<T, D: DerefMut<Target = [T]>> Inner<T, D> {
        /// Returns an iterator over the rows of this buffer as &mut [T].
        /// The length of each slice equals [`self.width()`](Self::width).
        pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
            let w = self.w;
            self.data
                .chunks_mut(self.stride.max(1))
                .take(self.h)
                .map(move |row| &mut row[..w])
        }

        /// Fills the buffer with clones of `val`.
        ///
        /// Elements between the end of a row and the start of the next
        /// are not touched.
        pub fn fill(&mut self, val: T)
        where
            T: Clone,
        {
            if self.is_contiguous() {
                let n = self.w * self.h;
                self.data[..n].fill(val);
            } else {
                self.rows_mut().for_each(|row| row.fill(val.clone()));
            }
        }

        /// Returns a mutable reference to the element at (x, y),
        /// or `None` if the position is out of bounds.
        pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
            self.to_index_checked(x, y).map(|i| &mut self.data[i])
        }
    }

    impl<T, D: Deref<Target = [T]>> Index<usize> for Inner<T, D> {
        type Output = [T];

        /// Returns a reference to the row of `self` at index `i`.
        /// The returned slice has length `self.width()`.
        #[inline]
        fn index(&self, i: usize) -> &[T] {
            &self.data[i * self.stride..][..self.w]
        }
    }

    impl<T, D: Deref<Target = [T]>> Index<[usize; 2]> for Inner<T, D> {
        type Output = T;

        /// Returns a reference to the element of `self` at position `[x, y]`.
        /// # Panics
        /// If the position is out of bounds of `self`.
        #[inline]
        fn index(&self, [x, y]: [usize; 2]) -> &T {
            let idx = self
                .to_index_checked(x, y)
                .unwrap_or_else(|| self.position_out_of_bounds(x, y));
            &self.data[idx]
        }
    }

    impl<T, D: DerefMut<Target = [T]>> IndexMut<[usize; 2]> for Inner<T, D> {
        /// Returns a mutable reference to the element of `self`
        /// at position `[x, y]`.
        /// # Panics
        /// If the position is out of bounds of `self`.
        #[inline]
        fn index_mut(&mut self, [x, y]: [usize; 2]) -> &mut T {
            let idx = self
                .to_index_checked(x, y)
                .unwrap_or_else(|| self.position_out_of_bounds(x, y));
            &mut self.data[idx]
        }
    }
}
