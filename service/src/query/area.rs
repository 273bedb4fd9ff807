//! [`Query`] collection related to a single [`Area`].

use common::operations::By;

use crate::domain::{area, Area, Slug};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Area`] by its ID.
pub type ById = DatabaseQuery<By<Option<Area>, area::Id>>;

/// Queries an [`Area`] by its [`Slug`].
pub type BySlug<'s> = DatabaseQuery<By<Option<Area>, &'s Slug>>;
