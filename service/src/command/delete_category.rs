//! [`Command`] for deleting a [`Category`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::{category, user, Category, User},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`Category`].
///
/// Deletion is refused while any [`Listing`] references the [`Category`]:
/// the storage layer carries no foreign key for the reference, so the guard
/// lives here.
#[derive(Clone, Copy, Debug)]
pub struct DeleteCategory {
    /// ID of the [`Category`] to delete.
    pub id: category::Id,

    /// ID of the [`User`] deleting the [`Category`].
    pub initiator_id: user::Id,
}

impl<Db> Command<DeleteCategory> for Service<Db>
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
            Select<By<read::DependentListings, category::Id>>,
            Ok = read::DependentListings,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Category, category::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Category;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteCategory,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteCategory { id, initiator_id } = cmd;

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

        let category = self
            .database()
            .execute(Select(By::<Option<Category>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CategoryNotExists(id))
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
            .execute(Delete(By::<Category, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(category)
    }
}

/// Error of [`DeleteCategory`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Initiator is not an admin.
    #[display("Admin access required")]
    AdminRequired,

    /// [`Category`] with the provided ID does not exist.
    #[display("`Category(id: {_0})` does not exist")]
    #[from(ignore)]
    CategoryNotExists(#[error(not(source))] category::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Category`] is still referenced by [`Listing`]s.
    #[display("`Category` is referenced by {} `Listing`(s)", i64::from(*_0))]
    #[from(ignore)]
    DependentListings(#[error(not(source))] read::DependentListings),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
