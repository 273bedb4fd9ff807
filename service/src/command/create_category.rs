//! [`Command`] for creating a new [`Category`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::category::{Description, Name};
use crate::{
    domain::{
        category, ordering, user, Category, OrderIndex, Slug, User,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Category`].
#[derive(Clone, Debug)]
pub struct CreateCategory {
    /// [`Name`] of a new [`Category`].
    pub name: category::Name,

    /// [`Description`] of a new [`Category`].
    pub description: Option<category::Description>,

    /// Explicit display position of a new [`Category`], if chosen by the
    /// initiator.
    pub order_index: Option<i32>,

    /// ID of the [`User`] creating the [`Category`].
    pub initiator_id: user::Id,
}

impl<Db> Command<CreateCategory> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'s> Database<
            Select<By<Option<Category>, &'s Slug>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<ordering::IndexBounds, read::category::All>>,
            Ok = ordering::IndexBounds,
            Err = Traced<database::Error>,
        > + Database<Insert<Category>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Category;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCategory,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCategory {
            name,
            description,
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

        let slug = Slug::derive(&name)
            .ok_or_else(|| E::UnsluggableName(name.clone()))
            .map_err(tracerr::wrap!())?;

        let occupied = self
            .database()
            .execute(Select(By::<Option<Category>, _>::new(&slug)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupied.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let order_index = if let Some(explicit) = order_index {
            OrderIndex::clamped(explicit)
        } else {
            let bounds = self
                .database()
                .execute(Select(By::<ordering::IndexBounds, _>::new(
                    read::category::All,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            OrderIndex::after(bounds.max)
        };

        let category = Category {
            id: category::Id::new(),
            name,
            slug,
            description,
            order_index,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(category.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(category)
    }
}

/// Error of [`CreateCategory`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Initiator is not an admin.
    #[display("Admin access required")]
    AdminRequired,

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Name`] is occupied by another [`Category`].
    #[display("`Name({_0})` is occupied")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] category::Name),

    /// [`Name`] yields no [`Slug`].
    #[display("`Name({_0})` yields no `Slug`")]
    #[from(ignore)]
    UnsluggableName(#[error(not(source))] category::Name),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
