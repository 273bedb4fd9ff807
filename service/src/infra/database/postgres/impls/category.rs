//! [`Category`]-related [`Database`] implementations.

use std::collections::HashSet;

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        category,
        ordering::{IndexBounds, OrderUpdate},
        Category, Slug,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns selected for a [`Category`].
const COLUMNS: &str = "id, name, slug, description, order_index, created_at";

/// Extracts a [`Category`] from the provided [`Row`].
fn from_row(row: &Row) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
        order_index: row.get("order_index"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Category>, category::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: category::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM categories \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<'s, C> Database<Select<By<Option<Category>, &'s Slug>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, &'s Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug: &Slug = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM categories \
             WHERE slug = $1::VARCHAR \
             LIMIT 1",
        );
        self.query_opt(&sql, &[slug])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Category>, read::category::All>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Category>, read::category::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM categories \
             ORDER BY order_index ASC, id ASC",
        );
        Ok(self
            .query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<IndexBounds, read::category::All>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = IndexBounds;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<IndexBounds, read::category::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT MIN(order_index)::INT4 AS min_index, \
                   MAX(order_index)::INT4 AS max_index \
            FROM categories";
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

impl<C> Database<Insert<Category>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Category>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(category): Insert<Category>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(category))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Category>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(category): Update<Category>,
    ) -> Result<Self::Ok, Self::Err> {
        let Category {
            id,
            name,
            slug,
            description,
            order_index,
            created_at,
        } = category;

        const SQL: &str = "\
            INSERT INTO categories (\
                id, name, slug, description, order_index, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::INT4, $6::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                slug = EXCLUDED.slug, \
                description = EXCLUDED.description, \
                order_index = EXCLUDED.order_index";
        self.exec(
            SQL,
            &[&id, &name, &slug, &description, &order_index, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Category, category::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Category, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: category::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM categories \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<HashSet<category::Id>, Vec<category::Id>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashSet<category::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashSet<category::Id>, Vec<category::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids: Vec<category::Id> = by.into_inner();
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        const SQL: &str = "\
            SELECT id \
            FROM categories \
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

impl<C> Database<Update<OrderUpdate<Category>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(update): Update<OrderUpdate<Category>>,
    ) -> Result<Self::Ok, Self::Err> {
        let OrderUpdate { id, index } = update;

        const SQL: &str = "\
            UPDATE categories \
            SET order_index = $2::INT4 \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &index])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::DependentListings, category::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::DependentListings;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::DependentListings, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: category::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM listings \
            WHERE category_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
