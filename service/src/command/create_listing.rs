//! [`Command`] for creating a new [`Listing`].

use common::{
    operations::{By, Insert, Select},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    Description, ImageUrl, Location, Status, Title,
};
use crate::{
    domain::{
        area, category, listing, ordering, user, Area, Category, Listing,
        OrderIndex, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// [`Title`] of a new [`Listing`].
    pub title: listing::Title,

    /// [`Description`] of a new [`Listing`].
    pub description: Option<listing::Description>,

    /// Price of a new [`Listing`].
    pub price: Money,

    /// [`Location`] of a new [`Listing`].
    pub location: listing::Location,

    /// ID of the [`Category`] a new [`Listing`] belongs to.
    pub category_id: category::Id,

    /// ID of the [`Area`] a new [`Listing`] is located in.
    pub area_id: area::Id,

    /// [`Status`] of a new [`Listing`].
    pub status: listing::Status,

    /// Indicator whether a new [`Listing`] is featured.
    pub is_featured: bool,

    /// Indicator whether a new [`Listing`] is marked as new.
    pub is_new: bool,

    /// [`ImageUrl`]s of the media attached to a new [`Listing`].
    pub images: Vec<listing::ImageUrl>,

    /// Explicit display position of a new [`Listing`], if chosen by the
    /// initiator.
    pub order_index: Option<i32>,

    /// ID of the [`User`] creating the [`Listing`].
    pub initiator_id: user::Id,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Category>, category::Id>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Area>, area::Id>>,
            Ok = Option<Area>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<ordering::IndexBounds, listing::Placement>>,
            Ok = ordering::IndexBounds,
            Err = Traced<database::Error>,
        > + Database<Insert<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing {
            title,
            description,
            price,
            location,
            category_id,
            area_id,
            status,
            is_featured,
            is_new,
            images,
            order_index,
            initiator_id,
        } = cmd;

        let initiator = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(initiator_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(initiator_id))
            .map_err(tracerr::wrap!())?;
        if !initiator.is_admin() {
            return Err(tracerr::new!(E::AdminRequired));
        }

        self.database()
            .execute(Select(By::<Option<Category>, _>::new(category_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CategoryNotExists(category_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;
        self.database()
            .execute(Select(By::<Option<Area>, _>::new(area_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AreaNotExists(area_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let order_index = if let Some(explicit) = order_index {
            OrderIndex::clamped(explicit)
        } else {
            // Derived from the current collection state on every allocation,
            // so multiple server instances never drift apart. Concurrent
            // allocations may land on the same index, which only loosens the
            // visual order and is healed by the next reorder.
            let placement = listing::Placement::of(is_featured, is_new);
            let bounds = self
                .database()
                .execute(Select(By::<ordering::IndexBounds, _>::new(placement)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if placement.is_promoted() {
                OrderIndex::above(bounds.min)
            } else {
                OrderIndex::after(bounds.max)
            }
        };

        let listing = Listing {
            id: listing::Id::new(),
            title,
            description,
            price,
            location,
            category_id,
            area_id,
            status,
            is_featured,
            is_new,
            order_index,
            images,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Initiator is not an admin.
    #[display("Admin access required")]
    AdminRequired,

    /// [`Area`] with the provided ID does not exist.
    #[display("`Area(id: {_0})` does not exist")]
    #[from(ignore)]
    AreaNotExists(#[error(not(source))] area::Id),

    /// [`Category`] with the provided ID does not exist.
    #[display("`Category(id: {_0})` does not exist")]
    #[from(ignore)]
    CategoryNotExists(#[error(not(source))] category::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
