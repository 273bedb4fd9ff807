//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

pub mod list {
    //! [`Listing`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{area, category, listing};
    #[cfg(doc)]
    use crate::domain::Listing;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = listing::Id;

    /// Cursor pointing to a specific [`Listing`] in a list.
    ///
    /// Resolved to a `(order_index, id)` position by the storage, so pages
    /// follow the display order.
    pub type Cursor = listing::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`category::Id`] to restrict the list to.
        pub category_id: Option<category::Id>,

        /// [`area::Id`] to restrict the list to.
        pub area_id: Option<area::Id>,

        /// [`listing::Status`] to restrict the list to.
        pub status: Option<listing::Status>,

        /// [`listing::Title`] (or its part) to fuzzy search for.
        pub title: Option<listing::Title>,
    }

    /// Total count of [`Listing`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
