use stensor_core::{Shape, Tensor, TensorCore, TensorMaker};

/// A generator stuck at its largest output, so uniform samples sit just below 1.
struct MaxRng;

impl rand::RngCore for MaxRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }

    fn next_u64(&mut self) -> u64 {
        u64::MAX
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(u8::MAX);
    }
}

macro_rules! test_dtype {
    ($dtype:ty, $zero:expr, $one:expr, $full:expr, $dtype_mod:ident) => {
        mod $dtype_mod {
            use super::*;

            #[test]
            fn zeros() {
                let a = Tensor::<$dtype>::zeros([3, 4]).unwrap();
                assert_eq!(a.d_size(), 12);
                assert_eq!(a.to_vec().unwrap(), vec![$zero; 12]);
                assert!(a.is_contiguous());
            }

            #[test]
            fn ones() {
                let a = Tensor::<$dtype>::ones([3, 4]).unwrap();
                assert_eq!(a.to_vec().unwrap(), vec![$one; 12]);
                assert_eq!(a.sum().unwrap(), <$dtype>::from(12u8));
            }

            #[test]
            fn full() {
                let a = Tensor::<$dtype>::full([3, 4], $full).unwrap();
                assert_eq!(a.to_vec().unwrap(), vec![$full; 12]);
            }

            #[test]
            fn dim1() {
                let a = Tensor::<$dtype>::full([3], $full).unwrap();
                assert_eq!(a.shape(), &Shape::from([3]));
                assert_eq!(&a.stride()[..], &[1]);
            }

            #[test]
            fn dim3() {
                let a = Tensor::<$dtype>::full([3, 4, 5], $full).unwrap();
                assert_eq!(a.d_size(), 60);
                assert_eq!(&a.stride()[..], &[20, 5, 1]);
            }

            #[test]
            fn like() {
                let a = Tensor::<$dtype>::full([2, 5], $full).unwrap();
                let z = Tensor::zeros_like(&a).unwrap();
                let o = Tensor::ones_like(&a).unwrap();
                assert_eq!(z.shape(), a.shape());
                assert_eq!(o.to_vec().unwrap(), vec![$one; 10]);
                assert!(!z.shares_storage(&a));
            }

            #[test]
            fn rand_in_unit_interval() {
                let a = Tensor::<$dtype>::rand([512]).unwrap();
                assert!(a.iter().all(|x| x >= $zero && x < $one));
            }

            #[test]
            fn rand_never_reaches_one() {
                let a: TensorCore<$dtype> = TensorMaker::rand_with([4], &mut MaxRng).unwrap();
                assert!(a.to_vec().unwrap().iter().all(|&x| x < $one));
            }
        }
    };
}

test_dtype!(f32, 0.0, 1.0, std::f32::consts::PI, f32_test);
test_dtype!(f64, 0.0, 1.0, std::f64::consts::PI, f64_test);
#[cfg(feature = "half")]
test_dtype!(
    half::f16,
    half::f16::ZERO,
    half::f16::ONE,
    half::f16::PI,
    f16_test
);
#[cfg(feature = "bfloat")]
test_dtype!(
    half::bf16,
    half::bf16::ZERO,
    half::bf16::ONE,
    half::bf16::PI,
    bf16_test
);

#[test]
fn degenerate_axes_have_stride_zero() {
    let a = Tensor::<f32>::zeros([2, 1, 3]).unwrap();
    assert_eq!(&a.stride()[..], &[3, 0, 1]);
    assert!(a.is_contiguous());
}

#[test]
fn zero_sized_dimension_is_rejected() {
    assert!(Tensor::<f32>::zeros([2, 0]).is_err());
}

#[test]
fn from_slice_checks_length() {
    let err = Tensor::<f32>::from_slice(&[1.0, 2.0, 3.0], [2, 2]).unwrap_err();
    assert!(matches!(
        err.inner(),
        stensor_core::Error::DimensionMismatch {
            expected: 4,
            got: 3,
            ..
        }
    ));
}

#[test]
fn rand_and_randn_shapes() {
    let r = Tensor::<f32>::rand([4, 5]).unwrap();
    assert_eq!(r.d_size(), 20);
    assert!(r.iter().all(|x| (0.0..1.0).contains(&x)));
    let n = Tensor::<f64>::randn([4, 5]).unwrap();
    let m = Tensor::randn_like(&n).unwrap();
    assert_eq!(m.shape(), &Shape::from([4, 5]));
    assert!(n.iter().all(f64::is_finite));
}

#[test]
fn maker_returns_cores() {
    let core = TensorMaker::ones::<f64>([2, 2]).unwrap();
    let t = Tensor::from(core);
    assert_eq!(t.sum().unwrap(), 4.0);
}
