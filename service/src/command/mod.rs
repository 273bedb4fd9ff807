//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_area;
pub mod create_category;
pub mod create_listing;
pub mod create_user;
pub mod create_user_session;
pub mod delete_area;
pub mod delete_category;
pub mod delete_listing;
pub mod reorder;
pub mod set_listing_placement;
pub mod update_area;
pub mod update_category;
pub mod update_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, create_area::CreateArea,
    create_category::CreateCategory, create_listing::CreateListing,
    create_user::CreateUser, create_user_session::CreateUserSession,
    delete_area::DeleteArea, delete_category::DeleteCategory,
    delete_listing::DeleteListing, reorder::Reorder,
    set_listing_placement::SetListingPlacement, update_area::UpdateArea,
    update_category::UpdateCategory, update_listing::UpdateListing,
};

#[cfg(test)]
mod spec;
