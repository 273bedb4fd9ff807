//! Domain definitions.

pub mod area;
pub mod category;
pub mod listing;
pub mod ordering;
pub mod slug;
pub mod user;

pub use self::{
    area::Area,
    category::Category,
    listing::Listing,
    ordering::{OrderIndex, Orderable},
    slug::Slug,
    user::User,
};
