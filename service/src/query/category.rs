//! [`Query`] collection related to a single [`Category`].

use common::operations::By;

use crate::domain::{category, Category, Slug};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Category`] by its ID.
pub type ById = DatabaseQuery<By<Option<Category>, category::Id>>;

/// Queries a [`Category`] by its [`Slug`].
pub type BySlug<'s> = DatabaseQuery<By<Option<Category>, &'s Slug>>;
