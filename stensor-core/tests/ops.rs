use stensor_core::{DType, Error, Shape, Tensor};

macro_rules! test_for_dtype_float {
    ($dtype:ty, $name:ident) => {
        mod $name {
            use super::*;

            fn vals(xs: &[f64]) -> Vec<$dtype> {
                xs.iter().map(|&x| <$dtype as DType>::from_f64(x)).collect()
            }

            fn arange(shape: &[usize]) -> Tensor<$dtype> {
                let n: usize = shape.iter().product();
                let data: Vec<f64> = (0..n).map(|x| x as f64).collect();
                Tensor::from_vec(vals(&data), shape).unwrap()
            }

            #[test]
            fn add_sub() {
                let a = arange(&[2, 3]);
                let b = Tensor::<$dtype>::ones([2, 3]).unwrap();
                let c = (&a + &b).unwrap();
                assert_eq!(c.to_vec().unwrap(), vals(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
                let d = (&c - &a).unwrap();
                assert_eq!(d.to_vec().unwrap(), vals(&[1.0; 6]));
                assert!(!c.shares_storage(&a));
            }

            #[test]
            fn scalar_mul_div() {
                let a = arange(&[2, 2]);
                let m = (&a * <$dtype as DType>::from_f64(2.0)).unwrap();
                assert_eq!(m.to_vec().unwrap(), vals(&[0.0, 2.0, 4.0, 6.0]));
                let q = (&m / <$dtype as DType>::from_f64(4.0)).unwrap();
                assert_eq!(q.to_vec().unwrap(), vals(&[0.0, 0.5, 1.0, 1.5]));
            }

            #[test]
            fn trailing_broadcast() {
                let a = arange(&[2, 3]);
                let row = Tensor::from_vec(vals(&[10.0, 20.0, 30.0]), [3]).unwrap();
                let c = (&a + &row).unwrap();
                assert_eq!(c.shape(), &Shape::from([2, 3]));
                assert_eq!(
                    c.to_vec().unwrap(),
                    vals(&[10.0, 21.0, 32.0, 13.0, 24.0, 35.0])
                );
                // Operand order does not change the result shape.
                let c2 = (&row + &a).unwrap();
                assert_eq!(c2.to_vec().unwrap(), c.to_vec().unwrap());
            }

            #[test]
            fn size_one_axes_broadcast() {
                let col = Tensor::from_vec(vals(&[1.0, 2.0]), [2, 1]).unwrap();
                let row = Tensor::from_vec(vals(&[10.0, 20.0, 30.0]), [3]).unwrap();
                let c = (&col + &row).unwrap();
                assert_eq!(c.shape(), &Shape::from([2, 3]));
                assert_eq!(
                    c.to_vec().unwrap(),
                    vals(&[11.0, 21.0, 31.0, 12.0, 22.0, 32.0])
                );
            }

            #[test]
            fn ops_read_through_views() {
                let a = arange(&[2, 3]);
                let t = a.transpose(0, 1).unwrap();
                let c = (&t + &t).unwrap();
                assert!(c.is_contiguous());
                assert_eq!(c.to_vec().unwrap(), vals(&[0.0, 6.0, 2.0, 8.0, 4.0, 10.0]));
            }

            #[test]
            fn mismatched_shapes_fail() {
                let a = arange(&[2, 3]);
                let b = arange(&[2]);
                let err = (&a + &b).unwrap_err();
                assert!(matches!(
                    err.inner(),
                    Error::DimensionMismatch { expected: 3, got: 2, .. }
                ));
                match &err {
                    Error::WrappedContext { context, .. } => {
                        assert_eq!(context, "cannot broadcast [2, 3] with [2]")
                    }
                    other => panic!("unexpected error {other:?}"),
                }
            }
        }
    };
}

test_for_dtype_float!(f32, f32_ops);
test_for_dtype_float!(f64, f64_ops);
#[cfg(feature = "half")]
test_for_dtype_float!(half::f16, f16_ops);
#[cfg(feature = "bfloat")]
test_for_dtype_float!(half::bf16, bf16_ops);
