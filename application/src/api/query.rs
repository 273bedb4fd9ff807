//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of `Listing`s in display order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `INVALID_TITLE_FILTER` - the title filter is not a searchable
    ///                            string.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "listings",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            title = ?title,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    pub async fn listings(
        first: Option<i32>,
        after: Option<api::listing::list::Cursor>,
        last: Option<i32>,
        before: Option<api::listing::list::Cursor>,
        category_id: Option<api::category::Id>,
        area_id: Option<api::area::Id>,
        status: Option<api::listing::Status>,
        title: Option<String>,
        ctx: &Context,
    ) -> Result<api::listing::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        let arguments = read::listing::list::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;

        let title = title
            .map(|t| {
                domain::listing::Title::new(t)
                    .ok_or_else(|| FilterError::Title.into())
                    .map_err(ctx.error())
            })
            .transpose()?;

        ctx.service()
            .execute(query::listings::List::by(
                read::listing::list::Selector {
                    arguments,
                    filter: read::listing::list::Filter {
                        category_id: category_id.map(Into::into),
                        area_id: area_id.map(Into::into),
                        status: status.map(Into::into),
                        title,
                    },
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all `Category`s in display order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "categories",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn categories(
        ctx: &Context,
    ) -> Result<Vec<api::Category>, Error> {
        ctx.service()
            .execute(query::categories::List::by(read::category::All))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|categories| {
                categories.into_iter().map(Into::into).collect()
            })
    }

    /// Returns the `Category` with the specified slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CATEGORY_NOT_EXISTS` - the `Category` with the specified slug does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "category",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub async fn category(
        slug: String,
        ctx: &Context,
    ) -> Result<api::Category, Error> {
        let slug = slug
            .parse::<domain::Slug>()
            .map_err(|_| CategoryError::NotExists.into())
            .map_err(ctx.error())?;
        ctx.service()
            .execute(query::category::BySlug::by(&slug))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CategoryError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns `Area`s in display order.
    ///
    /// Only active `Area`s are returned unless `all` is set.
    #[tracing::instrument(
        skip_all,
        fields(
            all = ?all,
            gql.name = "areas",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn areas(
        all: Option<bool>,
        ctx: &Context,
    ) -> Result<Vec<api::Area>, Error> {
        let is_active =
            if all.unwrap_or_default() { None } else { Some(true) };
        ctx.service()
            .execute(query::areas::List::by(read::area::Filter { is_active }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|areas| areas.into_iter().map(Into::into).collect())
    }

    /// Returns the `Area` with the specified slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AREA_NOT_EXISTS` - the `Area` with the specified slug does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "area",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub async fn area(slug: String, ctx: &Context) -> Result<api::Area, Error> {
        let slug = slug
            .parse::<domain::Slug>()
            .map_err(|_| AreaError::NotExists.into())
            .map_err(ctx.error())?;
        ctx.service()
            .execute(query::area::BySlug::by(&slug))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| AreaError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` does not exist"]
        NotExists,
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` does not exist"]
        NotExists,
    }
}

define_error! {
    enum CategoryError {
        #[code = "CATEGORY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Category` does not exist"]
        NotExists,
    }
}

define_error! {
    enum AreaError {
        #[code = "AREA_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Area` does not exist"]
        NotExists,
    }
}

define_error! {
    enum FilterError {
        #[code = "INVALID_TITLE_FILTER"]
        #[status = BAD_REQUEST]
        #[message = "Invalid title filter"]
        Title,
    }
}
