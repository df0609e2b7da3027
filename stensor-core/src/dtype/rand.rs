#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use rand_distr::StandardNormal;

/// Dispatch random sampling based on the data type.
pub trait RandDispatch: Sized {
    /// Draw one value uniformly from `[0, 1)`.
    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Draw one value from the standard normal distribution.
    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;

    fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) {
        for x in slice.iter_mut() {
            *x = Self::sample_uniform(rng);
        }
    }

    fn fill_with_normal<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) {
        for x in slice.iter_mut() {
            *x = Self::sample_normal(rng);
        }
    }
}

macro_rules! rand_native {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
                StandardUniform.sample(rng)
            }
            fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
                StandardNormal.sample(rng)
            }
        }
    };
}

rand_native!(f32);
rand_native!(f64);

// Half types sample in f32 and round.
#[allow(unused_macros)]
macro_rules! rand_via_f32 {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
                let x: f32 = StandardUniform.sample(rng);
                let v = <$t>::from_f32(x);
                // Rounding can land exactly on 1.0.
                if v >= <$t>::ONE {
                    <$t>::ONE - <$t>::EPSILON
                } else {
                    v
                }
            }
            fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
                let x: f32 = StandardNormal.sample(rng);
                <$t>::from_f32(x)
            }
        }
    };
}

#[cfg(feature = "half")]
rand_via_f32!(f16);
#[cfg(feature = "bfloat")]
rand_via_f32!(bf16);
