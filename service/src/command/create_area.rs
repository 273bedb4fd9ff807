//! [`Command`] for creating a new [`Area`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::area::Name;
use crate::{
    domain::{area, ordering, user, Area, OrderIndex, Slug, User},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Area`].
#[derive(Clone, Debug)]
pub struct CreateArea {
    /// [`Name`] of a new [`Area`].
    pub name: area::Name,

    /// Indicator whether a new [`Area`] is browsable on the public
    /// marketplace.
    pub is_active: bool,

    /// Explicit display position of a new [`Area`], if chosen by the
    /// initiator.
    pub order_index: Option<i32>,

    /// ID of the [`User`] creating the [`Area`].
    pub initiator_id: user::Id,
}

impl<Db> Command<CreateArea> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'s> Database<
            Select<By<Option<Area>, &'s Slug>>,
            Ok = Option<Area>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<ordering::IndexBounds, read::area::All>>,
            Ok = ordering::IndexBounds,
            Err = Traced<database::Error>,
        > + Database<Insert<Area>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Area;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateArea) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateArea {
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

        let slug = Slug::derive(&name)
            .ok_or_else(|| E::UnsluggableName(name.clone()))
            .map_err(tracerr::wrap!())?;

        let occupied = self
            .database()
            .execute(Select(By::<Option<Area>, _>::new(&slug)))
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
                    read::area::All,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            OrderIndex::after(bounds.max)
        };

        let area = Area {
            id: area::Id::new(),
            name,
            slug,
            is_active,
            order_index,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(area.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(area)
    }
}

/// Error of [`CreateArea`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Initiator is not an admin.
    #[display("Admin access required")]
    AdminRequired,

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
