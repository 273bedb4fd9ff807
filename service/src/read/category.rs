//! [`Category`]-related read definitions.

#[cfg(doc)]
use crate::domain::Category;

/// Selector of the whole [`Category`] collection in display order.
#[derive(Clone, Copy, Debug, Default)]
pub struct All;
