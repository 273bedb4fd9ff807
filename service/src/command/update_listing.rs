//! [`Command`] for updating a [`Listing`].

use common::{
    operations::{By, Select, Update},
    Money,
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

/// [`Command`] for updating a [`Listing`].
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to update.
    pub id: listing::Id,

    /// New [`Title`] of the [`Listing`].
    pub title: listing::Title,

    /// New [`Description`] of the [`Listing`].
    pub description: Option<listing::Description>,

    /// New price of the [`Listing`].
    pub price: Money,

    /// New [`Location`] of the [`Listing`].
    pub location: listing::Location,

    /// ID of the [`Category`] the [`Listing`] belongs to.
    pub category_id: category::Id,

    /// ID of the [`Area`] the [`Listing`] is located in.
    pub area_id: area::Id,

    /// New [`Status`] of the [`Listing`].
    pub status: listing::Status,

    /// New featured flag of the [`Listing`].
    pub is_featured: bool,

    /// New "new" flag of the [`Listing`].
    pub is_new: bool,

    /// New [`ImageUrl`]s of the media attached to the [`Listing`].
    pub images: Vec<listing::ImageUrl>,

    /// ID of the [`User`] updating the [`Listing`].
    pub initiator_id: user::Id,
}

impl<Db> Command<UpdateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
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
        > + Database<Update<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            id,
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

        let stored = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;

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

        // A placement group change re-allocates the index, and the new index
        // is written together with the flags in a single row update, so
        // readers never observe a promoted row stuck in the regular range.
        let placement = listing::Placement::of(is_featured, is_new);
        let order_index = if placement == stored.placement() {
            stored.order_index
        } else {
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
            id,
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
            created_at: stored.created_at,
        };

        self.database()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
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

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
