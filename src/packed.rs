//! Storage backends that keep elements in packed codec pools.
//!
//! An element of type `T: PackedElement` is stored as its `T::COMPONENTS`
//! raw components, each `T::COMPONENT_BITS` wide, at consecutive pool
//! positions: element `i`, component `k` lives at `i * COMPONENTS + k`.

use std::marker::PhantomData;

use indexed_bits::{BitPool, SlotPool, StorageUnit};
use indexed_traits::PackedElement;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

fn pool_len<T: PackedElement>(len: u64) -> Result<u64> {
    len.checked_mul(T::COMPONENTS as u64).ok_or_else(|| {
        IndexedError::InvalidConfiguration(format!(
            "{len} elements of {} components overflow the pool length",
            T::COMPONENTS
        ))
    })
}

// Every component is validated before the pool is touched, so a rejected
// write leaves the element unchanged.
fn check_components<T: PackedElement>(index: u64, value: &T) -> Result<()> {
    let limit = indexed_traits::low_mask(T::COMPONENT_BITS);
    match (0..T::COMPONENTS).find(|&k| value.component(k) > limit) {
        Some(k) => {
            tracing::trace!(index, component = k, "component wider than pool width");
            Err(IndexedError::WriteRejected(
                "component does not fit the packed width",
            ))
        }
        None => Ok(()),
    }
}

// ============================================================================
// Bit-packed storage
// ============================================================================

/// Elements packed edge-to-edge in a [`BitPool`].
///
/// A `SignedInt<15>` takes exactly 15 bits, so 64 of them fit in 15 words.
/// Components must be narrower than 64 bits.
#[derive(Debug, Clone, PartialEq)]
pub struct BitPackedData<T> {
    pool: BitPool,
    len: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PackedElement> BitPackedData<T> {
    /// Create `len` zeroed elements.
    pub fn new(len: u64) -> Result<Self> {
        let pool = BitPool::new(T::COMPONENT_BITS, pool_len::<T>(len)?)?;
        Ok(Self {
            pool,
            len,
            _marker: PhantomData,
        })
    }

    /// Reconstruct from a persisted pool.
    ///
    /// # Errors
    /// Returns an error if the pool's width is not `T::COMPONENT_BITS` or its
    /// length is not a whole number of elements.
    pub fn from_pool(pool: BitPool) -> Result<Self> {
        if pool.element_bits() != T::COMPONENT_BITS {
            return Err(IndexedError::InvalidConfiguration(format!(
                "pool width {} does not match element component width {}",
                pool.element_bits(),
                T::COMPONENT_BITS
            )));
        }
        if pool.len() % T::COMPONENTS as u64 != 0 {
            return Err(IndexedError::InvalidConfiguration(format!(
                "pool length {} is not a multiple of {} components",
                pool.len(),
                T::COMPONENTS
            )));
        }
        let len = pool.len() / T::COMPONENTS as u64;
        Ok(Self {
            pool,
            len,
            _marker: PhantomData,
        })
    }

    /// The underlying pool, i.e. the persisted layout.
    #[inline]
    pub fn pool(&self) -> &BitPool {
        &self.pool
    }

    pub fn into_pool(self) -> BitPool {
        self.pool
    }
}

impl<T: PackedElement> IndexedData<T> for BitPackedData<T> {
    type Owned = BitPackedData<T>;

    #[inline]
    fn size(&self) -> u64 {
        self.len
    }

    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.len)?;
        let base = index * T::COMPONENTS as u64;
        for k in 0..T::COMPONENTS {
            out.set_component(k, self.pool.get(base + k as u64)?);
        }
        Ok(())
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.len)?;
        check_components(index, value)?;
        let base = index * T::COMPONENTS as u64;
        for k in 0..T::COMPONENTS {
            self.pool.set(base + k as u64, value.component(k))?;
        }
        Ok(())
    }

    fn duplicate(&self) -> Self::Owned {
        self.clone()
    }
}

// ============================================================================
// Unit-aligned slot storage
// ============================================================================

/// Elements whose components each occupy whole `U` storage units.
///
/// Faster to address than [`BitPackedData`] at the cost of padding each
/// component up to a unit boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotData<T, U: StorageUnit> {
    pool: SlotPool<U>,
    len: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PackedElement, U: StorageUnit> SlotData<T, U> {
    /// Create `len` zeroed elements.
    pub fn new(len: u64) -> Result<Self> {
        let pool = SlotPool::new(T::COMPONENT_BITS, pool_len::<T>(len)?)?;
        Ok(Self {
            pool,
            len,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn pool(&self) -> &SlotPool<U> {
        &self.pool
    }
}

impl<T: PackedElement, U: StorageUnit> IndexedData<T> for SlotData<T, U> {
    type Owned = SlotData<T, U>;

    #[inline]
    fn size(&self) -> u64 {
        self.len
    }

    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.len)?;
        let base = index * T::COMPONENTS as u64;
        for k in 0..T::COMPONENTS {
            out.set_component(k, self.pool.get(base + k as u64)?);
        }
        Ok(())
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.len)?;
        check_components(index, value)?;
        let base = index * T::COMPONENTS as u64;
        for k in 0..T::COMPONENTS {
            self.pool.set(base + k as u64, value.component(k))?;
        }
        Ok(())
    }

    fn duplicate(&self) -> Self::Owned {
        self.clone()
    }
}
