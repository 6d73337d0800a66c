//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object has no identity. Two instances with the same attribute values
/// are the same value, so callers may copy, compare and snapshot them freely.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Threshold(i64);
///
/// impl ValueObject for Threshold {}
///
/// assert_eq!(Threshold(50), Threshold(50));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
