//! The element contract consumed by storage backends and views.
//!
//! Storage and views are written once and instantiated over any conforming
//! element type. They only ever need three things from an element:
//! - a way to produce a scratch value (`Default`)
//! - get/set/duplicate semantics (`Clone`, `clone_from`)
//! - for packed storage, the number and width of its primitive components
//!
//! # Key Design: components are raw unsigned bit patterns
//!
//! `PackedElement::component` returns the unsigned bit pattern of one
//! component, never wider than `COMPONENT_BITS`. Signed and floating-point
//! interpretation stays with the element: the codecs below it are
//! unsigned-only.

use num_complex::Complex;

use crate::low_mask;

// ---------------------------------------------------------------------------
// Element: anything a slot can hold
// ---------------------------------------------------------------------------

/// A value that can occupy a sequence slot.
///
/// `Default` supplies per-call scratch values; `Clone` gives the copy
/// semantics behind `get` (via `clone_from`) and `duplicate`.
pub trait Element: Clone + Default {}

impl<T: Clone + Default> Element for T {}

// ---------------------------------------------------------------------------
// PackedElement: fixed-width component decomposition
// ---------------------------------------------------------------------------

/// An element made of `COMPONENTS` unsigned components of `COMPONENT_BITS`
/// bits each.
///
/// Implementations must round-trip: after
/// `x.set_component(k, y.component(k))` for every `k`, `x == y`.
pub trait PackedElement: Element {
    /// Number of primitive components.
    const COMPONENTS: usize;

    /// Width of each component in bits (`1..=64`).
    const COMPONENT_BITS: u32;

    /// Raw bit pattern of component `k`, at most `COMPONENT_BITS` wide.
    fn component(&self, k: usize) -> u64;

    /// Overwrite component `k` from a raw bit pattern.
    ///
    /// Bits above `COMPONENT_BITS` are ignored.
    fn set_component(&mut self, k: usize, bits: u64);

    /// Total packed width of one element.
    #[inline]
    fn packed_bits() -> u64 {
        Self::COMPONENTS as u64 * Self::COMPONENT_BITS as u64
    }
}

macro_rules! impl_packed_element_unsigned {
    ($($t:ty),*) => {
        $(
            impl PackedElement for $t {
                const COMPONENTS: usize = 1;
                const COMPONENT_BITS: u32 = <$t>::BITS;

                #[inline(always)]
                fn component(&self, _k: usize) -> u64 {
                    *self as u64
                }

                #[inline(always)]
                fn set_component(&mut self, _k: usize, bits: u64) {
                    *self = bits as $t;
                }
            }
        )*
    };
}

impl_packed_element_unsigned!(u8, u16, u32, u64);

// Signed primitives store their two's-complement pattern.
macro_rules! impl_packed_element_signed {
    ($($t:ty => $u:ty),*) => {
        $(
            impl PackedElement for $t {
                const COMPONENTS: usize = 1;
                const COMPONENT_BITS: u32 = <$t>::BITS;

                #[inline(always)]
                fn component(&self, _k: usize) -> u64 {
                    *self as $u as u64
                }

                #[inline(always)]
                fn set_component(&mut self, _k: usize, bits: u64) {
                    *self = bits as $u as $t;
                }
            }
        )*
    };
}

impl_packed_element_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

impl PackedElement for bool {
    const COMPONENTS: usize = 1;
    const COMPONENT_BITS: u32 = 1;

    #[inline(always)]
    fn component(&self, _k: usize) -> u64 {
        *self as u64
    }

    #[inline(always)]
    fn set_component(&mut self, _k: usize, bits: u64) {
        *self = bits & 1 == 1;
    }
}

impl PackedElement for f32 {
    const COMPONENTS: usize = 1;
    const COMPONENT_BITS: u32 = 32;

    #[inline(always)]
    fn component(&self, _k: usize) -> u64 {
        self.to_bits() as u64
    }

    #[inline(always)]
    fn set_component(&mut self, _k: usize, bits: u64) {
        *self = f32::from_bits(bits as u32);
    }
}

impl PackedElement for f64 {
    const COMPONENTS: usize = 1;
    const COMPONENT_BITS: u32 = 64;

    #[inline(always)]
    fn component(&self, _k: usize) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn set_component(&mut self, _k: usize, bits: u64) {
        *self = f64::from_bits(bits);
    }
}

// Complex values pack the real part's components first, then the imaginary part's.
impl<T: PackedElement> PackedElement for Complex<T> {
    const COMPONENTS: usize = 2 * T::COMPONENTS;
    const COMPONENT_BITS: u32 = T::COMPONENT_BITS;

    #[inline]
    fn component(&self, k: usize) -> u64 {
        if k < T::COMPONENTS {
            self.re.component(k)
        } else {
            self.im.component(k - T::COMPONENTS)
        }
    }

    #[inline]
    fn set_component(&mut self, k: usize, bits: u64) {
        let bits = bits & low_mask(T::COMPONENT_BITS);
        if k < T::COMPONENTS {
            self.re.set_component(k, bits);
        } else {
            self.im.set_component(k - T::COMPONENTS, bits);
        }
    }
}
