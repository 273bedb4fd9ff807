//! [`Command`] for updating a [`Category`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::category::{Description, Name};
use crate::{
    domain::{category, user, Category, OrderIndex, Slug, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Category`].
#[derive(Clone, Debug)]
pub struct UpdateCategory {
    /// ID of the [`Category`] to update.
    pub id: category::Id,

    /// New [`Name`] of the [`Category`].
    pub name: category::Name,

    /// New [`Description`] of the [`Category`].
    pub description: Option<category::Description>,

    /// Explicit display position of the [`Category`], if chosen by the
    /// initiator.
    pub order_index: Option<i32>,

    /// ID of the [`User`] updating the [`Category`].
    pub initiator_id: user::Id,
}

impl<Db> Command<UpdateCategory> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Category>, category::Id>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + for<'s> Database<
            Select<By<Option<Category>, &'s Slug>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<Update<Category>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Category;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateCategory,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCategory {
            id,
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

        let stored = self
            .database()
            .execute(Select(By::<Option<Category>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CategoryNotExists(id))
            .map_err(tracerr::wrap!())?;

        // The slug is regenerated only when the new name alters it.
        let slug = Slug::derive(&name)
            .ok_or_else(|| E::UnsluggableName(name.clone()))
            .map_err(tracerr::wrap!())?;
        if slug != stored.slug {
            let occupied = self
                .database()
                .execute(Select(By::<Option<Category>, _>::new(&slug)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if occupied.is_some_and(|c| c.id != id) {
                return Err(tracerr::new!(E::NameOccupied(name)));
            }
        }

        let category = Category {
            id,
            name,
            slug,
            description,
            order_index: order_index
                .map_or(stored.order_index, OrderIndex::clamped),
            created_at: stored.created_at,
        };

        self.database()
            .execute(Update(category.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(category)
    }
}

/// Error of [`UpdateCategory`] [`Command`] execution.
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
