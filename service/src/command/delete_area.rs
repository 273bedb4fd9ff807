//! [`Command`] for deleting an [`Area`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::{area, user, Area, User},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting an [`Area`].
///
/// Deletion is refused while any [`Listing`] references the [`Area`]: the
/// storage layer carries no foreign key for the reference, so the guard
/// lives here.
#[derive(Clone, Copy, Debug)]
pub struct DeleteArea {
    /// ID of the [`Area`] to delete.
    pub id: area::Id,

    /// ID of the [`User`] deleting the [`Area`].
    pub initiator_id: user::Id,
}

impl<Db> Command<DeleteArea> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Area>, area::Id>>,
            Ok = Option<Area>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::DependentListings, area::Id>>,
            Ok = read::DependentListings,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Area, area::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Area;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteArea) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteArea { id, initiator_id } = cmd;

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

        let area = self
            .database()
            .execute(Select(By::<Option<Area>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AreaNotExists(id))
            .map_err(tracerr::wrap!())?;

        let dependents = self
            .database()
            .execute(Select(By::<read::DependentListings, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if dependents.any() {
            return Err(tracerr::new!(E::DependentListings(dependents)));
        }

        self.database()
            .execute(Delete(By::<Area, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(area)
    }
}

/// Error of [`DeleteArea`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Initiator is not an admin.
    #[display("Admin access required")]
    AdminRequired,

    /// [`Area`] with the provided ID does not exist.
    #[display("`Area(id: {_0})` does not exist")]
    #[from(ignore)]
    AreaNotExists(#[error(not(source))] area::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Area`] is still referenced by [`Listing`]s.
    #[display("`Area` is referenced by {} `Listing`(s)", i64::from(*_0))]
    #[from(ignore)]
    DependentListings(#[error(not(source))] read::DependentListings),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
