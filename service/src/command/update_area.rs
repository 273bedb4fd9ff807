//! [`Command`] for updating an [`Area`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::area::Name;
use crate::{
    domain::{area, user, Area, OrderIndex, Slug, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Area`].
#[derive(Clone, Debug)]
pub struct UpdateArea {
    /// ID of the [`Area`] to update.
    pub id: area::Id,

    /// New [`Name`] of the [`Area`].
    pub name: area::Name,

    /// New activity of the [`Area`].
    pub is_active: bool,

    /// Explicit display position of the [`Area`], if chosen by the
    /// initiator.
    pub order_index: Option<i32>,

    /// ID of the [`User`] updating the [`Area`].
    pub initiator_id: user::Id,
}

impl<Db> Command<UpdateArea> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Area>, area::Id>>,
            Ok = Option<Area>,
            Err = Traced<database::Error>,
        > + for<'s> Database<
            Select<By<Option<Area>, &'s Slug>>,
            Ok = Option<Area>,
            Err = Traced<database::Error>,
        > + Database<Update<Area>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Area;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateArea) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateArea {
            id,
            name,
            is_active,
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
            .execute(Select(By::<Option<Area>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AreaNotExists(id))
            .map_err(tracerr::wrap!())?;

        // The slug is regenerated only when the new name alters it.
        let slug = Slug::derive(&name)
            .ok_or_else(|| E::UnsluggableName(name.clone()))
            .map_err(tracerr::wrap!())?;
        if slug != stored.slug {
            let occupied = self
                .database()
                .execute(Select(By::<Option<Area>, _>::new(&slug)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if occupied.is_some_and(|a| a.id != id) {
                return Err(tracerr::new!(E::NameOccupied(name)));
            }
        }

        let area = Area {
            id,
            name,
            slug,
            is_active,
            order_index: order_index
                .map_or(stored.order_index, OrderIndex::clamped),
            created_at: stored.created_at,
        };

        self.database()
            .execute(Update(area.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(area)
    }
}

/// Error of [`UpdateArea`] [`Command`] execution.
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

    /// [`Name`] is occupied by another [`Area`].
    #[display("`Name({_0})` is occupied")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] area::Name),

    /// [`Name`] yields no [`Slug`].
    #[display("`Name({_0})` yields no `Slug`")]
    #[from(ignore)]
    UnsluggableName(#[error(not(source))] area::Name),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
