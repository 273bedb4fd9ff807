//! [`Query`] collection related to the multiple [`Area`]s.

use common::operations::By;

use crate::{domain::Area, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Area`]s in display order, optionally restricted by activity.
pub type List = DatabaseQuery<By<Vec<Area>, read::area::Filter>>;
