//! Display-ordering definitions.

use std::{fmt, hash::Hash};

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

/// Position of a record within the display order of its collection.
///
/// Lower values render first. Values are signed and need not be contiguous:
/// only their relative order matters, with ties broken by the record ID.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct OrderIndex(i32);

impl OrderIndex {
    /// Index assigned to the first row of an empty collection group.
    pub const FIRST: Self = Self(0);

    /// Returns the [`OrderIndex`] for a row positioned explicitly by an
    /// operator.
    ///
    /// Explicit positions are clamped to be non-negative.
    #[must_use]
    pub fn clamped(index: i32) -> Self {
        Self(index.max(0))
    }

    /// Returns an [`OrderIndex`] sorting strictly above the given occupied
    /// minimum.
    ///
    /// Without an occupied minimum the result is one position above
    /// [`OrderIndex::FIRST`], so a freshly promoted row outranks rows holding
    /// the default index.
    #[must_use]
    pub fn above(min: Option<Self>) -> Self {
        Self(min.unwrap_or(Self::FIRST).0.saturating_sub(1))
    }

    /// Returns an [`OrderIndex`] sorting after the given occupied maximum, or
    /// [`OrderIndex::FIRST`] when the group is empty.
    #[must_use]
    pub fn after(max: Option<Self>) -> Self {
        max.map_or(Self::FIRST, |m| Self(m.0.saturating_add(1)))
    }
}

/// Occupied [`OrderIndex`] bounds of a collection group.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexBounds {
    /// Lowest occupied [`OrderIndex`], if any.
    pub min: Option<OrderIndex>,

    /// Highest occupied [`OrderIndex`], if any.
    pub max: Option<OrderIndex>,
}

/// Entity whose display order is driven by an [`OrderIndex`].
pub trait Orderable {
    /// ID of this entity.
    type Id: Copy + Eq + Hash + fmt::Display;
}

/// New [`OrderIndex`] assignment for a single row of an [`Orderable`]
/// collection.
pub struct OrderUpdate<E: Orderable> {
    /// ID of the row to reposition.
    pub id: E::Id,

    /// [`OrderIndex`] to assign to the row.
    pub index: OrderIndex,
}

impl<E: Orderable> Clone for OrderUpdate<E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<E: Orderable> Copy for OrderUpdate<E> {}

impl<E: Orderable> fmt::Debug for OrderUpdate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderUpdate")
            .field("id", &format_args!("{}", self.id))
            .field("index", &self.index)
            .finish()
    }
}

#[cfg(test)]
mod spec {
    use super::OrderIndex;

    fn idx(i: i32) -> OrderIndex {
        OrderIndex::from(i)
    }

    #[test]
    fn above_goes_one_below_the_minimum() {
        // Occupied promoted indices `{-3, -1, 0}`.
        assert_eq!(OrderIndex::above(Some(idx(-3))), idx(-4));
        assert_eq!(OrderIndex::above(Some(idx(5))), idx(4));
    }

    #[test]
    fn above_outranks_the_default_index_when_unoccupied() {
        assert_eq!(OrderIndex::above(None), idx(-1));
    }

    #[test]
    fn after_goes_one_past_the_maximum() {
        // Occupied regular indices `{0, 2, 5}`.
        assert_eq!(OrderIndex::after(Some(idx(5))), idx(6));
        assert_eq!(OrderIndex::after(Some(idx(-2))), idx(-1));
    }

    #[test]
    fn after_starts_at_zero_when_unoccupied() {
        assert_eq!(OrderIndex::after(None), OrderIndex::FIRST);
    }

    #[test]
    fn explicit_positions_are_clamped() {
        assert_eq!(OrderIndex::clamped(7), idx(7));
        assert_eq!(OrderIndex::clamped(0), idx(0));
        assert_eq!(OrderIndex::clamped(-5), idx(0));
    }

    #[test]
    fn extremes_saturate() {
        assert_eq!(OrderIndex::above(Some(idx(i32::MIN))), idx(i32::MIN));
        assert_eq!(OrderIndex::after(Some(idx(i32::MAX))), idx(i32::MAX));
    }
}
