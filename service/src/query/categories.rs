//! [`Query`] collection related to the multiple [`Category`]s.

use common::operations::By;

use crate::{domain::Category, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all [`Category`]s in display order.
pub type List = DatabaseQuery<By<Vec<Category>, read::category::All>>;
