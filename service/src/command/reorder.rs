//! [`Command`] for applying a new display order to a collection.

use std::{collections::HashSet, fmt};

use common::operations::{By, Select, Update};
use derive_more::{Error, From};
use tracerr::Traced;

use crate::{
    domain::{ordering::OrderUpdate, user, Orderable, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for applying a new display order to an [`Orderable`]
/// collection.
///
/// The initiator submits the full target permutation with sequential
/// [`OrderIndex`]es already assigned; reordering a subset of a collection is
/// not supported.
///
/// [`OrderIndex`]: crate::domain::OrderIndex
pub struct Reorder<T: Orderable> {
    /// New [`OrderIndex`] assignment for every row of the collection.
    ///
    /// [`OrderIndex`]: crate::domain::OrderIndex
    pub updates: Vec<OrderUpdate<T>>,

    /// ID of the [`User`] reordering the collection.
    pub initiator_id: user::Id,
}

impl<T: Orderable> Clone for Reorder<T> {
    fn clone(&self) -> Self {
        Self {
            updates: self.updates.clone(),
            initiator_id: self.initiator_id,
        }
    }
}

impl<T: Orderable> fmt::Debug for Reorder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reorder")
            .field("updates", &self.updates)
            .field("initiator_id", &self.initiator_id)
            .finish()
    }
}

impl<Db, T> Command<Reorder<T>> for Service<Db>
where
    T: Orderable,
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashSet<T::Id>, Vec<T::Id>>>,
            Ok = HashSet<T::Id>,
            Err = Traced<database::Error>,
        > + Database<
            Update<OrderUpdate<T>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    T::Id: fmt::Debug,
{
    type Ok = ();
    type Err = Traced<ExecutionError<T::Id>>;

    async fn execute(&self, cmd: Reorder<T>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Reorder {
            updates,
            initiator_id,
        } = cmd;

        let initiator = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(initiator_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?
            .ok_or(E::UserNotExists(initiator_id))
            .map_err(tracerr::wrap!())?;
        if !initiator.is_admin() {
            return Err(tracerr::new!(E::AdminRequired));
        }

        // The whole batch is rejected before any row is written if a single
        // submitted ID cannot be resolved.
        let ids = updates.iter().map(|u| u.id).collect::<Vec<_>>();
        let existing = self
            .database()
            .execute(Select(By::<HashSet<T::Id>, _>::new(ids.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E<T::Id>))?;
        let missing = ids
            .into_iter()
            .filter(|id| !existing.contains(id))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(tracerr::new!(E::RowsNotExist(missing)));
        }

        // Rows are repositioned one by one without a surrounding
        // transaction: rows already written stay written when a later row
        // fails, and the partial application is surfaced as counts.
        let total = updates.len();
        let mut failed = 0;
        for update in updates {
            if let Err(e) = self.database().execute(Update(update)).await {
                tracing::warn!(
                    "failed to reposition row `{}`: {e}",
                    update.id,
                );
                failed += 1;
            }
        }
        if failed > 0 {
            return Err(tracerr::new!(E::PartiallyApplied {
                applied: total - failed,
                failed,
            }));
        }

        Ok(())
    }
}

/// Error of [`Reorder`] [`Command`] execution.
#[derive(Debug, Error, From)]
pub enum ExecutionError<Id: fmt::Debug + fmt::Display> {
    /// Initiator is not an admin.
    AdminRequired,

    /// [`Database`] error.
    Db(database::Error),

    /// Some rows failed to be repositioned, while others were written.
    PartiallyApplied {
        /// Number of successfully repositioned rows.
        applied: usize,

        /// Number of rows failed to be repositioned.
        failed: usize,
    },

    /// Submitted IDs referring to no existing row.
    #[from(ignore)]
    RowsNotExist(#[error(not(source))] Vec<Id>),

    /// [`User`] with the provided ID does not exist.
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

impl<Id: fmt::Debug + fmt::Display> fmt::Display for ExecutionError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdminRequired => write!(f, "Admin access required"),
            Self::Db(e) => write!(f, "`Database` operation failed: {e}"),
            Self::PartiallyApplied { applied, failed } => write!(
                f,
                "Reorder repositioned {applied} row(s) and failed for \
                 {failed} row(s)",
            ),
            Self::RowsNotExist(ids) => {
                write!(f, "Rows do not exist: ")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
            Self::UserNotExists(id) => {
                write!(f, "`User(id: {id})` does not exist")
            }
        }
    }
}
