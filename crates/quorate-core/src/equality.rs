//! Structural equality used to decide whether two backends gave the same answer.
//!
//! Rules, applied in order:
//!
//! 1. Absent equals absent; absent never equals present.
//! 2. Indirection (`&T`, `Box<T>`, `Arc<T>`) is transparent. Pointer identity short-circuits
//!    to equal but is not required.
//! 3. Wire primitives carry their own contract (quantities compare by magnitude, byte arrays
//!    by content), which takes precedence over field-by-field comparison.
//! 4. Otherwise sequences compare element-wise with a length check, maps by key set and
//!    per-key value, records field by field.
//! 5. Values with internal state that cannot be inspected ([`Sealed`]) never compare equal.
//!
//! Types opt in by implementing [`StructuralEq`]; there is no reflective fallback, and
//! cyclic structures are not supported.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    sync::Arc,
};

use crate::wire::{BlockRef, Bytes, FixedBytes, Quantity, WireValue};

/// "Same answer" comparison between two decoded values.
pub trait StructuralEq {
    fn structural_eq(&self, other: &Self) -> bool;
}

/// Total equality over optional wire values. [`WireValue::Null`] counts as absent.
#[must_use]
pub fn equal(a: Option<&WireValue>, b: Option<&WireValue>) -> bool {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.structural_eq(b),
        _ => false,
    }
}

/// Wrapper for values whose internals are hidden. Never equal, not even to itself.
#[derive(Debug, Clone, Default)]
pub struct Sealed<T>(pub T);

impl<T> StructuralEq for Sealed<T> {
    fn structural_eq(&self, _other: &Self) -> bool {
        false
    }
}

macro_rules! impl_by_partial_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StructuralEq for $ty {
                fn structural_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_by_partial_eq!(bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, str, String);

// Wire primitives: magnitude for quantities, content for bytes, variant + number for refs.
impl_by_partial_eq!(Quantity, BlockRef, Bytes, serde_json::Value);

impl<const N: usize> StructuralEq for FixedBytes<N> {
    fn structural_eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: StructuralEq + ?Sized> StructuralEq for &T {
    fn structural_eq(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other) || (**self).structural_eq(*other)
    }
}

impl<T: StructuralEq + ?Sized> StructuralEq for Box<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        (**self).structural_eq(&**other)
    }
}

impl<T: StructuralEq + ?Sized> StructuralEq for Arc<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).structural_eq(&**other)
    }
}

impl<T: StructuralEq> StructuralEq for Option<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.structural_eq(b),
            _ => false,
        }
    }
}

impl<T: StructuralEq> StructuralEq for [T] {
    fn structural_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.structural_eq(b))
    }
}

impl<T: StructuralEq> StructuralEq for Vec<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        self.as_slice().structural_eq(other.as_slice())
    }
}

impl<K, V, S> StructuralEq for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: StructuralEq,
    S: BuildHasher,
{
    fn structural_eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.iter().all(|(k, v)| other.get(k).is_some_and(|o| v.structural_eq(o)))
    }
}

impl<K: Ord, V: StructuralEq> StructuralEq for BTreeMap<K, V> {
    fn structural_eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.iter().all(|(k, v)| other.get(k).is_some_and(|o| v.structural_eq(o)))
    }
}

/// Field-by-field [`StructuralEq`] for a record type.
macro_rules! impl_structural_eq {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::equality::StructuralEq for $ty {
            fn structural_eq(&self, other: &Self) -> bool {
                $( $crate::equality::StructuralEq::structural_eq(&self.$field, &other.$field) )&&+
            }
        }
    };
}

pub(crate) use impl_structural_eq;
