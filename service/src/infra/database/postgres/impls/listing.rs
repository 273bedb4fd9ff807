//! [`Listing`]-related [`Database`] implementations.

use std::collections::{HashMap, HashSet};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{
        listing,
        ordering::{IndexBounds, OrderUpdate},
        Listing,
    },
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<listing::Id, Listing>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[listing::Id]>,
{
    type Ok = HashMap<listing::Id, Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<listing::Id, Listing>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[listing::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, title, description, \
                   price_amount, price_currency, \
                   location, category_id, area_id, \
                   status, is_featured, is_new, order_index, \
                   images, created_at \
            FROM listings \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    Listing {
                        id,
                        title: row.get("title"),
                        description: row.get("description"),
                        price: Money {
                            amount: row
                                .get::<_, rust_decimal::Decimal>(
                                    "price_amount",
                                ),
                            currency: row.get("price_currency"),
                        },
                        location: row.get("location"),
                        category_id: row.get("category_id"),
                        area_id: row.get("area_id"),
                        status: row.get("status"),
                        is_featured: row.get("is_featured"),
                        is_new: row.get("is_new"),
                        order_index: row.get("order_index"),
                        images: row.get("images"),
                        created_at: row.get("created_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Listing>, listing::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<listing::Id, Listing>, [listing::Id; 1]>>,
        Ok = HashMap<listing::Id, Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Insert<Listing>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(listing))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Listing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Listing {
            id,
            title,
            description,
            price,
            location,
            category_id,
            area_id,
            status,
            is_featured,
            is_new,
            order_index,
            images,
            created_at,
        } = listing;

        const SQL: &str = "\
            INSERT INTO listings (\
                id, title, description, \
                price_amount, price_currency, \
                location, category_id, area_id, \
                status, is_featured, is_new, order_index, \
                images, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::NUMERIC, $5::INT2, \
                $6::VARCHAR, $7::UUID, $8::UUID, \
                $9::INT2, $10::BOOL, $11::BOOL, $12::INT4, \
                $13::VARCHAR[], $14::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                price_amount = EXCLUDED.price_amount, \
                price_currency = EXCLUDED.price_currency, \
                location = EXCLUDED.location, \
                category_id = EXCLUDED.category_id, \
                area_id = EXCLUDED.area_id, \
                status = EXCLUDED.status, \
                is_featured = EXCLUDED.is_featured, \
                is_new = EXCLUDED.is_new, \
                order_index = EXCLUDED.order_index, \
                images = EXCLUDED.images";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &price.amount,
                &price.currency,
                &location,
                &category_id,
                &area_id,
                &status,
                &is_featured,
                &is_new,
                &order_index,
                &images,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Listing, listing::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM listings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<IndexBounds, listing::Placement>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = IndexBounds;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<IndexBounds, listing::Placement>>,
    ) -> Result<Self::Ok, Self::Err> {
        let placement: listing::Placement = by.into_inner();
        let is_promoted = placement.is_promoted();

        const SQL: &str = "\
            SELECT MIN(order_index)::INT4 AS min_index, \
                   MAX(order_index)::INT4 AS max_index \
            FROM listings \
            WHERE (is_featured OR is_new) = $1::BOOL";
        self.query_opt(SQL, &[&is_promoted])
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

impl<C> Database<Select<By<HashSet<listing::Id>, Vec<listing::Id>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashSet<listing::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashSet<listing::Id>, Vec<listing::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids: Vec<listing::Id> = by.into_inner();
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        const SQL: &str = "\
            SELECT id \
            FROM listings \
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

impl<C> Database<Update<OrderUpdate<Listing>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(update): Update<OrderUpdate<Listing>>,
    ) -> Result<Self::Ok, Self::Err> {
        let OrderUpdate { id, index } = update;

        const SQL: &str = "\
            UPDATE listings \
            SET order_index = $2::INT4 \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &index])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::listing::list::Page, read::listing::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::listing::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::listing::list::Page, read::listing::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::listing::list::Selector {
            arguments,
            filter:
                read::listing::list::Filter {
                    category_id,
                    area_id,
                    status,
                    title,
                },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let category_idx = category_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let area_idx = area_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let title_pattern = title.as_ref().map(|t| FuzzPattern::new(t.as_ref()));
        let title_pattern_idx = title_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM listings \
             WHERE true \
                   {cursor} \
                   {category_filtering} \
                   {area_filtering} \
                   {status_filtering} \
                   {title_filtering} \
             ORDER BY order_index {order}, \
                      id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!(
                    "AND (order_index, id) {op} \
                     (SELECT order_index, id \
                      FROM listings \
                      WHERE id = ${idx}::UUID)"
                ))
            }),
            order = arguments.kind().order().sql(),
            category_filtering =
                category_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND category_id = ${idx}::UUID"))
                }),
            area_filtering = area_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND area_id = ${idx}::UUID"))
            }),
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
            title_filtering =
                title_pattern_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND LOWER(title) SIMILAR TO LOWER(${idx}::VARCHAR)"
                    ))
                }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let id = row.get("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::listing::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::listing::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::listing::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::listing::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM listings";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}
