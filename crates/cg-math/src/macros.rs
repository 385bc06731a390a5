//! Shared implementation of the N-dimensional vector types.
//!
//! `Vec2`, `Vec3` and `Vec4` are all a `#[repr(C)]` wrapper around
//! `[f32; N]`; everything that does not depend on the dimension lives here.

macro_rules! impl_vector {
    ($ty:ident, $n:literal) => {
        impl $ty {
            /// Zero vector.
            pub const ZERO: Self = Self([0.0; $n]);

            /// Vector with every component set to one.
            pub const ONE: Self = Self([1.0; $n]);

            /// Creates a vector with all components set to the same value.
            #[inline]
            pub const fn splat(v: f32) -> Self {
                Self([v; $n])
            }

            /// Creates from an array.
            #[inline]
            pub const fn from_array(a: [f32; $n]) -> Self {
                Self(a)
            }

            /// Copies the first components out of a float slice.
            ///
            /// This is the safe form of "construct from a raw float pointer".
            ///
            /// # Panics
            ///
            /// Panics if the slice is shorter than the vector dimension.
            #[inline]
            pub fn from_slice(s: &[f32]) -> Self {
                let mut out = [0.0; $n];
                out.copy_from_slice(&s[..$n]);
                Self(out)
            }

            /// Converts to an array.
            #[inline]
            pub const fn to_array(self) -> [f32; $n] {
                self.0
            }

            /// Borrows the contiguous component storage.
            ///
            /// This is the view handed to uniform setters.
            #[inline]
            pub fn as_array(&self) -> &[f32; $n] {
                &self.0
            }

            /// Mutably borrows the component storage.
            #[inline]
            pub fn as_mut_array(&mut self) -> &mut [f32; $n] {
                &mut self.0
            }

            /// Dot product.
            #[inline]
            pub fn dot(self, rhs: Self) -> f32 {
                self.0.iter().zip(rhs.0.iter()).map(|(a, b)| a * b).sum()
            }

            /// Squared magnitude (avoids sqrt).
            #[inline]
            pub fn magnitude_squared(self) -> f32 {
                self.dot(self)
            }

            /// Euclidean length. Zero for the zero vector.
            #[inline]
            pub fn magnitude(self) -> f32 {
                self.magnitude_squared().sqrt()
            }

            /// Normalizes in place and returns `self` for chaining.
            ///
            /// The zero vector becomes all-NaN; use
            #[doc = concat!("[`", stringify!($ty), "::try_normalized`]")]
            /// when the input is not known to be non-zero.
            #[inline]
            pub fn normalize(&mut self) -> &mut Self {
                let len = self.magnitude();
                *self /= len;
                self
            }

            /// Returns a unit-length copy. Same zero-length contract as
            #[doc = concat!("[`", stringify!($ty), "::normalize`].")]
            #[inline]
            pub fn normalized(self) -> Self {
                self / self.magnitude()
            }

            /// Returns a unit-length copy, or [`cg_core::Error::ZeroLength`].
            #[inline]
            pub fn try_normalized(self) -> cg_core::Result<Self> {
                let len = self.magnitude();
                if len <= cg_core::EPSILON || !len.is_finite() {
                    return Err(cg_core::Error::ZeroLength);
                }
                Ok(self / len)
            }

            /// Linear interpolation, `t = 0` gives `self`, `t = 1` gives `other`.
            #[inline]
            pub fn lerp(self, other: Self, t: f32) -> Self {
                (1.0 - t) * self + t * other
            }

            /// Returns true if all components are finite (not NaN or infinite).
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.iter().all(|c| c.is_finite())
            }

            /// Component-wise comparison within an absolute tolerance.
            #[inline]
            pub fn abs_diff_eq(self, other: Self, eps: f32) -> bool {
                self.0
                    .iter()
                    .zip(other.0.iter())
                    .all(|(a, b)| (a - b).abs() <= eps)
            }
        }

        impl Index<usize> for $ty {
            type Output = f32;

            #[inline]
            fn index(&self, i: usize) -> &f32 {
                &self.0[i]
            }
        }

        impl IndexMut<usize> for $ty {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut f32 {
                &mut self.0[i]
            }
        }

        impl Add for $ty {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
            }
        }

        impl Sub for $ty {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
            }
        }

        impl Neg for $ty {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(self.0.map(|c| -c))
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self(self.0.map(|c| c * rhs))
            }
        }

        impl Mul<$ty> for f32 {
            type Output = $ty;

            #[inline]
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Div<f32> for $ty {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self(self.0.map(|c| c / rhs))
            }
        }

        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<f32> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }

        impl From<[f32; $n]> for $ty {
            #[inline]
            fn from(a: [f32; $n]) -> Self {
                Self(a)
            }
        }

        impl From<$ty> for [f32; $n] {
            #[inline]
            fn from(v: $ty) -> [f32; $n] {
                v.0
            }
        }
    };
}

pub(crate) use impl_vector;
