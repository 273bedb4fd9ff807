//! [`Listing`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Money};
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{command, domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, FieldViolation, Violations},
    AsError, Context, Error,
};

/// A property listing.
#[derive(Clone, Debug, From)]
pub struct Listing {
    /// ID of this [`Listing`].
    id: Id,

    /// Underlying [`domain::Listing`].
    listing: OnceCell<domain::Listing>,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.into(),
            listing: OnceCell::new_with(Some(listing)),
        }
    }
}

impl Listing {
    /// Creates a new [`Listing`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Listing`] with the provided ID exists,
    /// otherwise accessing this [`Listing`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            listing: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Listing`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Listing`] doesn't exist.
    async fn listing(&self, ctx: &Context) -> Result<&domain::Listing, Error> {
        let id = self.id.into();
        self.listing
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::listing::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(l.ok_or_else(|| {
                            api::query::ListingError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A property listing.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Title of this `Listing`.
    pub async fn title(&self, ctx: &Context) -> Result<String, Error> {
        Ok(self.listing(ctx).await?.title.to_string())
    }

    /// Description of this `Listing`, if any.
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Option<String>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .description
            .as_ref()
            .map(ToString::to_string))
    }

    /// Price of this `Listing`.
    pub async fn price(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.listing(ctx).await?.price)
    }

    /// Location of this `Listing`.
    pub async fn location(&self, ctx: &Context) -> Result<String, Error> {
        Ok(self.listing(ctx).await?.location.to_string())
    }

    /// `Category` this `Listing` belongs to, if still existing.
    pub async fn category(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Category>, Error> {
        let id = self.listing(ctx).await?.category_id;
        ctx.service()
            .execute(query::category::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// `Area` this `Listing` is located in, if still existing.
    pub async fn area(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Area>, Error> {
        let id = self.listing(ctx).await?.area_id;
        ctx.service()
            .execute(query::area::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|a| a.map(Into::into))
    }

    /// Status of this `Listing`.
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.listing(ctx).await?.status.into())
    }

    /// Indicator whether this `Listing` is featured.
    pub async fn is_featured(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.listing(ctx).await?.is_featured)
    }

    /// Indicator whether this `Listing` is marked as new.
    pub async fn is_new(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.listing(ctx).await?.is_new)
    }

    /// Position of this `Listing` in the display order.
    pub async fn order_index(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.listing(ctx).await?.order_index.into())
    }

    /// URLs of the media attached to this `Listing`.
    pub async fn images(&self, ctx: &Context) -> Result<Vec<String>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .images
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// `DateTime` when this `Listing` was created.
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.listing(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Listing`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Status of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// Visible on the public marketplace.
    Active,

    /// Not yet published.
    Draft,

    /// Sold and kept for the archive.
    Sold,

    /// Rented out and kept for the archive.
    Rented,

    /// Hidden from the public marketplace.
    Inactive,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;
        match status {
            S::Active => Self::Active,
            S::Draft => Self::Draft,
            S::Sold => Self::Sold,
            S::Rented => Self::Rented,
            S::Inactive => Self::Inactive,
        }
    }
}

impl From<Status> for domain::listing::Status {
    fn from(status: Status) -> Self {
        use domain::listing::Status as S;
        match status {
            Status::Active => S::Active,
            Status::Draft => S::Draft,
            Status::Sold => S::Sold,
            Status::Rented => S::Rented,
            Status::Inactive => S::Inactive,
        }
    }
}

/// Input of a `Listing` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ListingInput")]
pub struct Input {
    /// Title of the `Listing`.
    pub title: String,

    /// Description of the `Listing`.
    pub description: Option<String>,

    /// Price of the `Listing`.
    pub price: Money,

    /// Location of the `Listing`.
    pub location: String,

    /// ID of the `Category` the `Listing` belongs to.
    pub category_id: api::category::Id,

    /// ID of the `Area` the `Listing` is located in.
    pub area_id: api::area::Id,

    /// Status of the `Listing` (`DRAFT` when omitted).
    pub status: Option<Status>,

    /// Indicator whether the `Listing` is featured.
    pub is_featured: Option<bool>,

    /// Indicator whether the `Listing` is marked as new.
    pub is_new: Option<bool>,

    /// URLs of the media attached to the `Listing`.
    pub images: Option<Vec<String>>,

    /// Explicit position of the `Listing` in the display order.
    pub order_index: Option<i32>,
}

impl Input {
    /// Validates this [`Input`] into a [`command::CreateListing`] in a
    /// single pass, collecting all the [`FieldViolation`]s at once.
    pub(crate) fn validate(
        self,
        initiator_id: domain::user::Id,
    ) -> Result<command::CreateListing, Vec<FieldViolation>> {
        let Self {
            title,
            description,
            price,
            location,
            category_id,
            area_id,
            status,
            is_featured,
            is_new,
            images,
            order_index,
        } = self;

        let mut v = Violations::default();
        let title = v.check(
            "title",
            domain::listing::Title::new(title),
            "must be a non-empty trimmed string up to 512 characters",
        );
        let description = match description {
            Some(d) => v
                .check(
                    "description",
                    domain::listing::Description::new(d),
                    "must be a non-blank string up to 8192 characters",
                )
                .map(Some),
            None => Some(None),
        };
        let location = v.check(
            "location",
            domain::listing::Location::new(location),
            "must be a non-empty trimmed string up to 512 characters",
        );
        let mut parsed_images = Some(vec![]);
        for (i, url) in images.unwrap_or_default().into_iter().enumerate() {
            if let Some(url) = domain::listing::ImageUrl::new(url) {
                if let Some(images) = parsed_images.as_mut() {
                    images.push(url);
                }
            } else {
                v.push(
                    &format!("images[{i}]"),
                    "must be an http(s) URL up to 2048 characters",
                );
                parsed_images = None;
            }
        }

        v.into_result()?;
        Ok(command::CreateListing {
            title: title.expect("validated"),
            description: description.expect("validated"),
            price,
            location: location.expect("validated"),
            category_id: category_id.into(),
            area_id: area_id.into(),
            status: status.map_or(domain::listing::Status::Draft, Into::into),
            is_featured: is_featured.unwrap_or(false),
            is_new: is_new.unwrap_or(false),
            images: parsed_images.expect("validated"),
            order_index,
            initiator_id,
        })
    }
}

/// Outcome of a `Listing` mutation.
#[derive(Debug)]
pub struct Payload {
    /// Indicator whether the mutation succeeded.
    success: bool,

    /// Human-readable outcome message.
    message: String,

    /// Violations of the submitted fields, if any.
    errors: Option<Vec<FieldViolation>>,

    /// Affected [`Listing`], if the mutation succeeded.
    listing: Option<Listing>,
}

impl Payload {
    /// Creates a successful [`Payload`] with the affected [`Listing`].
    pub(crate) fn ok(listing: Listing) -> Self {
        Self {
            success: true,
            message: "OK".to_owned(),
            errors: None,
            listing: Some(listing),
        }
    }

    /// Creates a failed [`Payload`] with the provided `message`.
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            listing: None,
        }
    }

    /// Creates a failed [`Payload`] out of the provided [`FieldViolation`]s.
    pub(crate) fn invalid(errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            message: "Validation failed".to_owned(),
            errors: Some(errors),
            listing: None,
        }
    }
}

/// Outcome of a `Listing` mutation.
#[graphql_object(name = "ListingPayload", context = Context)]
impl Payload {
    /// Indicator whether the mutation succeeded.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Human-readable outcome message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Violations of the submitted fields, if any.
    pub fn errors(&self) -> Option<Vec<FieldViolation>> {
        self.errors.clone()
    }

    /// Affected `Listing`, if the mutation succeeded.
    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }
}

pub mod list {
    //! Definitions related to the [`Listing`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use super::{Id, Listing};
    use crate::{api::scalar, AsError, Context, Error};

    /// Cursor for the `Listing` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::listing::list::Cursor)]
    #[graphql(
        name = "ListingListCursor",
        with = scalar::Via::<read::listing::list::Cursor>,
    )]
    pub struct Cursor(pub read::listing::list::Cursor);

    /// Edge in the [`Listing`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::listing::list::Edge);

    /// Edge in the `Listing` list.
    #[graphql_object(name = "ListingListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `ListingListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `ListingListEdge`.
        #[must_use]
        pub fn node(&self) -> Listing {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees \
                          `Listing` existence"
            )]
            unsafe {
                Listing::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Listing`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::listing::list::Connection);

    /// Connection of the `Listing` list.
    #[graphql_object(name = "ListingListConnection", context = Context)]
    impl Connection {
        /// Edges of this `ListingListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().copied().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.0.page_info(),
                start_cursor: self.0.edges.first().map(|e| e.cursor.into()),
                end_cursor: self.0.edges.last().map(|e| e.cursor.into()),
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::listing::list::PageInfo`].
        info: read::listing::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about a `ListingListConnection` page.
    #[graphql_object(name = "ListingListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> &Option<Cursor> {
            &self.start_cursor
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> &Option<Cursor> {
            &self.end_cursor
        }

        /// Total `Listing` count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::listings::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
