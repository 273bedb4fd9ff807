//! Read models of the [`Service`].
//!
//! [`Service`]: crate::Service

pub mod area;
pub mod category;
pub mod listing;

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::{Area, Category, Listing};

/// Number of [`Listing`]s referencing a [`Category`] or an [`Area`].
///
/// Guards [`Category`]/[`Area`] deletion at the mutation boundary, since the
/// storage layer carries no foreign keys for these references.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
pub struct DependentListings(i64);

impl DependentListings {
    /// Indicates whether any dependent [`Listing`] exists.
    #[must_use]
    pub fn any(&self) -> bool {
        self.0 > 0
    }
}
