//! [`Area`]-related [`Database`] implementations.

use std::collections::HashSet;

use common::operations::{By, Delete, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        area,
        ordering::{IndexBounds, OrderUpdate},
        Area, Slug,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns selected for an [`Area`].
const COLUMNS: &str = "id, name, slug, is_active, order_index, created_at";

/// Extracts an [`Area`] from the provided [`Row`].
fn from_row(row: &Row) -> Area {
    Area {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        is_active: row.get("is_active"),
        order_index: row.get("order_index"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Area>, area::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Area>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Area>, area::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: area::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM areas \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<'s, C> Database<Select<By<Option<Area>, &'s Slug>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Area>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Area>, &'s Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug: &Slug = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM areas \
             WHERE slug = $1::VARCHAR \
             LIMIT 1",
        );
        self.query_opt(&sql, &[slug])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Area>, read::area::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Area>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Area>, read::area::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::area::Filter { is_active } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let is_active_idx = is_active.as_ref().map(|a| {
            ps.push(a);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM areas \
             WHERE true \
                   {activity_filtering} \
             ORDER BY order_index ASC, id ASC",
            activity_filtering =
                is_active_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND is_active = ${idx}::BOOL"))
                }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<IndexBounds, read::area::All>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = IndexBounds;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<IndexBounds, read::area::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT MIN(order_index)::INT4 AS min_index, \
                   MAX(order_index)::INT4 AS max_index \
            FROM areas";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let row = row.expect("always exists");
                IndexBounds {
                    min: row.get("min_index"),
                    max: row.get("max_index"),
                }
            })
    }
}

impl<C> Database<Insert<Area>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Area>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(area): Insert<Area>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(area)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Area>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(area): Update<Area>,
    ) -> Result<Self::Ok, Self::Err> {
        let Area {
            id,
            name,
            slug,
            is_active,
            order_index,
            created_at,
        } = area;

        const SQL: &str = "\
            INSERT INTO areas (\
                id, name, slug, is_active, order_index, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::BOOL, \
                $5::INT4, $6::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                slug = EXCLUDED.slug, \
                is_active = EXCLUDED.is_active, \
                order_index = EXCLUDED.order_index";
        self.exec(
            SQL,
            &[&id, &name, &slug, &is_active, &order_index, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Area, area::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Area, area::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: area::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM areas \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<HashSet<area::Id>, Vec<area::Id>>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = HashSet<area::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashSet<area::Id>, Vec<area::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids: Vec<area::Id> = by.into_inner();
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        const SQL: &str = "\
            SELECT id \
            FROM areas \
            WHERE id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect())
    }
}

impl<C> Database<Update<OrderUpdate<Area>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(update): Update<OrderUpdate<Area>>,
    ) -> Result<Self::Ok, Self::Err> {
        let OrderUpdate { id, index } = update;

        const SQL: &str = "\
            UPDATE areas \
            SET order_index = $2::INT4 \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &index])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::DependentListings, area::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::DependentListings;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::DependentListings, area::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: area::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM listings \
            WHERE area_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
