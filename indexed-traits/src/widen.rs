//! Lossless promotion into a higher-precision element type.

/// Convert an element into a wider representation without loss.
///
/// Blanket-implemented for every `W: From<A>`, which covers the standard
/// numeric promotions (`f32 -> f64`, `i16 -> i64`). `num_complex` has no
/// `From<Complex<f32>> for Complex<f64>`, so complex promotion goes through
/// a transformed view instead.
pub trait Widen<W> {
    fn widen(&self) -> W;
}

impl<A: Clone, W: From<A>> Widen<W> for A {
    #[inline]
    fn widen(&self) -> W {
        W::from(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignedInt;

    #[test]
    fn test_primitive_promotion() {
        let x: f64 = 0.1f32.widen();
        assert_eq!(x, 0.1f32 as f64);
        let y: i64 = (-7i16).widen();
        assert_eq!(y, -7);
    }

    #[test]
    fn test_fixed_width_promotion() {
        let v = SignedInt::<15>::new(-300).unwrap();
        let wide: i64 = v.widen();
        let real: f64 = v.widen();
        assert_eq!(wide, -300);
        assert_eq!(real, -300.0);
    }
}
