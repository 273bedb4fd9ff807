//! [`Area`]-related read definitions.

#[cfg(doc)]
use crate::domain::Area;

/// Selector of the whole [`Area`] collection in display order.
#[derive(Clone, Copy, Debug, Default)]
pub struct All;

/// Filter for selecting [`Area`] lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// Restrict the list to [`Area`]s with the given activity.
    pub is_active: Option<bool>,
}
