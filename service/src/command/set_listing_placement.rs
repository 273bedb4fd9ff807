//! [`Command`] for toggling promotion flags of a [`Listing`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, ordering, user, Listing, OrderIndex, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for toggling promotion flags of a [`Listing`].
///
/// Omitted flags keep their stored values.
#[derive(Clone, Copy, Debug)]
pub struct SetListingPlacement {
    /// ID of the [`Listing`] to toggle.
    pub id: listing::Id,

    /// New featured flag of the [`Listing`], if changed.
    pub is_featured: Option<bool>,

    /// New "new" flag of the [`Listing`], if changed.
    pub is_new: Option<bool>,

    /// ID of the [`User`] toggling the [`Listing`].
    pub initiator_id: user::Id,
}

impl<Db> Command<SetListingPlacement> for Service<Db>
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
            Select<By<ordering::IndexBounds, listing::Placement>>,
            Ok = ordering::IndexBounds,
            Err = Traced<database::Error>,
        > + Database<Update<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetListingPlacement,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetListingPlacement {
            id,
            is_featured,
            is_new,
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

        let mut listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        let stored_placement = listing.placement();
        listing.is_featured = is_featured.unwrap_or(listing.is_featured);
        listing.is_new = is_new.unwrap_or(listing.is_new);

        // The index is re-allocated only when the toggle moves the `Listing`
        // between the promoted and regular groups. A toggle staying within
        // the group (e.g. dropping `is_new` while still featured) keeps the
        // stored position.
        let placement = listing.placement();
        if placement != stored_placement {
            let bounds = self
                .database()
                .execute(Select(By::<ordering::IndexBounds, _>::new(placement)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            listing.order_index = if placement.is_promoted() {
                OrderIndex::above(bounds.min)
            } else {
                OrderIndex::after(bounds.max)
            };
        }

        self.database()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`SetListingPlacement`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Initiator is not an admin.
    #[display("Admin access required")]
    AdminRequired,

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
