//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use secrecy::SecretBox;
use service::{
    command,
    domain::{self, ordering::OrderUpdate, Orderable},
    Command as _,
};
use tracing as log;

use crate::{
    api::{self, area, category, listing, StatusPayload},
    define_error, AsError, Context, Error, Session,
};

/// Public paths rendering `Listing`s.
const LISTING_PATHS: &[&str] = &["/", "/properties"];

/// Public paths rendering `Category`s.
const CATEGORY_PATHS: &[&str] = &["/", "/categories", "/properties"];

/// Public paths rendering `Area`s.
const AREA_PATHS: &[&str] = &["/", "/areas", "/properties"];

/// Message of a rejected admin mutation.
///
/// Deliberately the same for a missing session, a non-admin initiator and a
/// dangling session user, so nothing about accounts is leaked.
const ADMIN_REQUIRED: &str = "Admin access required";

/// Message of a mutation failed on the storage side.
const STORE_FAILURE: &str = "Unable to complete the request, try again later";

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";

    /// Returns the initiator [`User`] ID of the current session, if any.
    ///
    /// [`User`]: api::User
    async fn initiator(ctx: &Context) -> Option<domain::user::Id> {
        ctx.current_session()
            .await
            .ok()
            .map(|s| s.user_id.into())
    }

    /// Builds the sequential [`OrderUpdate`]s out of the submitted full
    /// permutation of IDs.
    fn sequenced<T: Orderable>(
        ids: impl IntoIterator<Item = T::Id>,
    ) -> Vec<OrderUpdate<T>> {
        ids.into_iter()
            .enumerate()
            .map(|(position, id)| OrderUpdate {
                id,
                index: domain::OrderIndex::clamped(
                    i32::try_from(position).unwrap_or(i32::MAX),
                ),
            })
            .collect()
    }
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_NAME`, `INVALID_LOGIN`, `INVALID_PASSWORD` - malformed
    ///   credentials;
    /// - `LOGIN_OCCUPIED` - provided login is occupied by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            login = %login,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: String,
        login: String,
        password: String,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let name = domain::user::Name::new(name)
            .ok_or_else(|| CredentialsError::InvalidName.into())
            .map_err(ctx.error())?;
        let login = domain::user::Login::new(login)
            .ok_or_else(|| CredentialsError::InvalidLogin.into())
            .map_err(ctx.error())?;
        let password = domain::user::Password::new(password)
            .ok_or_else(|| CredentialsError::InvalidPassword.into())
            .map_err(ctx.error())?;

        let user = ctx
            .service()
            .execute(command::CreateUser {
                name,
                login,
                password: SecretBox::init_with(move || password),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `Session` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials do not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: String,
        password: String,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let login = domain::user::Login::new(login)
            .ok_or_else(|| CredentialsError::WrongCredentials.into())
            .map_err(ctx.error())?;
        let password = domain::user::Password::new(password)
            .ok_or_else(|| CredentialsError::WrongCredentials.into())
            .map_err(ctx.error())?;

        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                login,
                password: SecretBox::init_with(move || password),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createListing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_listing(
        input: listing::Input,
        ctx: &Context,
    ) -> listing::Payload {
        use command::create_listing::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return listing::Payload::rejected(ADMIN_REQUIRED);
        };
        let cmd = match input.validate(initiator_id) {
            Ok(cmd) => cmd,
            Err(violations) => return listing::Payload::invalid(violations),
        };

        match ctx.service().execute(cmd).await {
            Ok(created) => {
                ctx.revalidate(LISTING_PATHS);
                listing::Payload::ok(created.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    listing::Payload::rejected(ADMIN_REQUIRED)
                }
                E::CategoryNotExists(_) => {
                    listing::Payload::rejected("Category does not exist")
                }
                E::AreaNotExists(_) => {
                    listing::Payload::rejected("Area does not exist")
                }
                E::Db(_) => {
                    log::error!("`createListing` failed: {e}");
                    listing::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Updates the `Listing` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "updateListing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_listing(
        id: listing::Id,
        input: listing::Input,
        ctx: &Context,
    ) -> listing::Payload {
        use command::update_listing::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return listing::Payload::rejected(ADMIN_REQUIRED);
        };
        let command::CreateListing {
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
            order_index: _,
            initiator_id,
        } = match input.validate(initiator_id) {
            Ok(cmd) => cmd,
            Err(violations) => return listing::Payload::invalid(violations),
        };

        let result = ctx
            .service()
            .execute(command::UpdateListing {
                id: id.into(),
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
                initiator_id,
            })
            .await;
        match result {
            Ok(updated) => {
                ctx.revalidate(LISTING_PATHS);
                listing::Payload::ok(updated.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    listing::Payload::rejected(ADMIN_REQUIRED)
                }
                E::ListingNotExists(_) => {
                    listing::Payload::rejected("Listing does not exist")
                }
                E::CategoryNotExists(_) => {
                    listing::Payload::rejected("Category does not exist")
                }
                E::AreaNotExists(_) => {
                    listing::Payload::rejected("Area does not exist")
                }
                E::Db(_) => {
                    log::error!("`updateListing` failed: {e}");
                    listing::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Toggles promotion flags of the `Listing` with the specified ID.
    ///
    /// Omitted flags keep their stored values. Moving the `Listing` between
    /// the promoted and regular groups re-allocates its display position.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            is_featured = ?is_featured,
            is_new = ?is_new,
            gql.name = "setListingPlacement",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_listing_placement(
        id: listing::Id,
        is_featured: Option<bool>,
        is_new: Option<bool>,
        ctx: &Context,
    ) -> listing::Payload {
        use command::set_listing_placement::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return listing::Payload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::SetListingPlacement {
                id: id.into(),
                is_featured,
                is_new,
                initiator_id,
            })
            .await;
        match result {
            Ok(toggled) => {
                ctx.revalidate(LISTING_PATHS);
                listing::Payload::ok(toggled.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    listing::Payload::rejected(ADMIN_REQUIRED)
                }
                E::ListingNotExists(_) => {
                    listing::Payload::rejected("Listing does not exist")
                }
                E::Db(_) => {
                    log::error!("`setListingPlacement` failed: {e}");
                    listing::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Deletes the `Listing` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "deleteListing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_listing(
        id: listing::Id,
        ctx: &Context,
    ) -> StatusPayload {
        use command::delete_listing::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return StatusPayload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::DeleteListing {
                id: id.into(),
                initiator_id,
            })
            .await;
        match result {
            Ok(_) => {
                ctx.revalidate(LISTING_PATHS);
                StatusPayload::ok()
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    StatusPayload::rejected(ADMIN_REQUIRED)
                }
                E::ListingNotExists(_) => {
                    StatusPayload::rejected("Listing does not exist")
                }
                E::Db(_) => {
                    log::error!("`deleteListing` failed: {e}");
                    StatusPayload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Applies a new display order to the `Listing` collection.
    ///
    /// Expects the full permutation of all `Listing` IDs in the desired
    /// order; positions are assigned sequentially.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reorderListings",
            ids.len = ids.len(),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reorder_listings(
        ids: Vec<listing::Id>,
        ctx: &Context,
    ) -> StatusPayload {
        use command::reorder::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return StatusPayload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::Reorder::<domain::Listing> {
                updates: Self::sequenced(ids.into_iter().map(Into::into)),
                initiator_id,
            })
            .await;
        match result {
            Ok(()) => {
                ctx.revalidate(LISTING_PATHS);
                StatusPayload::ok()
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    StatusPayload::rejected(ADMIN_REQUIRED)
                }
                E::RowsNotExist(_) | E::PartiallyApplied { .. } => {
                    StatusPayload::rejected(e.as_ref().to_string())
                }
                E::Db(_) => {
                    log::error!("`reorderListings` failed: {e}");
                    StatusPayload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Creates a new `Category`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCategory",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_category(
        input: category::Input,
        ctx: &Context,
    ) -> category::Payload {
        use command::create_category::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return category::Payload::rejected(ADMIN_REQUIRED);
        };
        let cmd = match input.validate(initiator_id) {
            Ok(cmd) => cmd,
            Err(violations) => return category::Payload::invalid(violations),
        };

        match ctx.service().execute(cmd).await {
            Ok(created) => {
                ctx.revalidate(CATEGORY_PATHS);
                category::Payload::ok(created.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    category::Payload::rejected(ADMIN_REQUIRED)
                }
                E::NameOccupied(_) => category::Payload::field_rejected(
                    "name",
                    "Name already exists",
                ),
                E::UnsluggableName(_) => category::Payload::field_rejected(
                    "name",
                    "Name must contain letters or digits",
                ),
                E::Db(_) => {
                    log::error!("`createCategory` failed: {e}");
                    category::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Updates the `Category` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "updateCategory",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_category(
        id: category::Id,
        input: category::Input,
        ctx: &Context,
    ) -> category::Payload {
        use command::update_category::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return category::Payload::rejected(ADMIN_REQUIRED);
        };
        let command::CreateCategory {
            name,
            description,
            order_index,
            initiator_id,
        } = match input.validate(initiator_id) {
            Ok(cmd) => cmd,
            Err(violations) => return category::Payload::invalid(violations),
        };

        let result = ctx
            .service()
            .execute(command::UpdateCategory {
                id: id.into(),
                name,
                description,
                order_index,
                initiator_id,
            })
            .await;
        match result {
            Ok(updated) => {
                ctx.revalidate(CATEGORY_PATHS);
                category::Payload::ok(updated.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    category::Payload::rejected(ADMIN_REQUIRED)
                }
                E::CategoryNotExists(_) => {
                    category::Payload::rejected("Category does not exist")
                }
                E::NameOccupied(_) => category::Payload::field_rejected(
                    "name",
                    "Name already exists",
                ),
                E::UnsluggableName(_) => category::Payload::field_rejected(
                    "name",
                    "Name must contain letters or digits",
                ),
                E::Db(_) => {
                    log::error!("`updateCategory` failed: {e}");
                    category::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Deletes the `Category` with the specified ID.
    ///
    /// Deletion is refused while any `Listing` references the `Category`.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "deleteCategory",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_category(
        id: category::Id,
        ctx: &Context,
    ) -> StatusPayload {
        use command::delete_category::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return StatusPayload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::DeleteCategory {
                id: id.into(),
                initiator_id,
            })
            .await;
        match result {
            Ok(_) => {
                ctx.revalidate(CATEGORY_PATHS);
                StatusPayload::ok()
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    StatusPayload::rejected(ADMIN_REQUIRED)
                }
                E::CategoryNotExists(_) => {
                    StatusPayload::rejected("Category does not exist")
                }
                E::DependentListings(d) => StatusPayload::rejected(format!(
                    "Category is referenced by {} listing(s), reassign or \
                     delete them first",
                    i64::from(*d),
                )),
                E::Db(_) => {
                    log::error!("`deleteCategory` failed: {e}");
                    StatusPayload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Applies a new display order to the `Category` collection.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reorderCategories",
            ids.len = ids.len(),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reorder_categories(
        ids: Vec<category::Id>,
        ctx: &Context,
    ) -> StatusPayload {
        use command::reorder::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return StatusPayload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::Reorder::<domain::Category> {
                updates: Self::sequenced(ids.into_iter().map(Into::into)),
                initiator_id,
            })
            .await;
        match result {
            Ok(()) => {
                ctx.revalidate(CATEGORY_PATHS);
                StatusPayload::ok()
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    StatusPayload::rejected(ADMIN_REQUIRED)
                }
                E::RowsNotExist(_) | E::PartiallyApplied { .. } => {
                    StatusPayload::rejected(e.as_ref().to_string())
                }
                E::Db(_) => {
                    log::error!("`reorderCategories` failed: {e}");
                    StatusPayload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Creates a new `Area`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createArea",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_area(
        input: area::Input,
        ctx: &Context,
    ) -> area::Payload {
        use command::create_area::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return area::Payload::rejected(ADMIN_REQUIRED);
        };
        let cmd = match input.validate(initiator_id) {
            Ok(cmd) => cmd,
            Err(violations) => return area::Payload::invalid(violations),
        };

        match ctx.service().execute(cmd).await {
            Ok(created) => {
                ctx.revalidate(AREA_PATHS);
                area::Payload::ok(created.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    area::Payload::rejected(ADMIN_REQUIRED)
                }
                E::NameOccupied(_) => area::Payload::field_rejected(
                    "name",
                    "Name already exists",
                ),
                E::UnsluggableName(_) => area::Payload::field_rejected(
                    "name",
                    "Name must contain letters or digits",
                ),
                E::Db(_) => {
                    log::error!("`createArea` failed: {e}");
                    area::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Updates the `Area` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "updateArea",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_area(
        id: area::Id,
        input: area::Input,
        ctx: &Context,
    ) -> area::Payload {
        use command::update_area::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return area::Payload::rejected(ADMIN_REQUIRED);
        };
        let command::CreateArea {
            name,
            is_active,
            order_index,
            initiator_id,
        } = match input.validate(initiator_id) {
            Ok(cmd) => cmd,
            Err(violations) => return area::Payload::invalid(violations),
        };

        let result = ctx
            .service()
            .execute(command::UpdateArea {
                id: id.into(),
                name,
                is_active,
                order_index,
                initiator_id,
            })
            .await;
        match result {
            Ok(updated) => {
                ctx.revalidate(AREA_PATHS);
                area::Payload::ok(updated.into())
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    area::Payload::rejected(ADMIN_REQUIRED)
                }
                E::AreaNotExists(_) => {
                    area::Payload::rejected("Area does not exist")
                }
                E::NameOccupied(_) => area::Payload::field_rejected(
                    "name",
                    "Name already exists",
                ),
                E::UnsluggableName(_) => area::Payload::field_rejected(
                    "name",
                    "Name must contain letters or digits",
                ),
                E::Db(_) => {
                    log::error!("`updateArea` failed: {e}");
                    area::Payload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Deletes the `Area` with the specified ID.
    ///
    /// Deletion is refused while any `Listing` references the `Area`.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "deleteArea",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_area(id: area::Id, ctx: &Context) -> StatusPayload {
        use command::delete_area::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return StatusPayload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::DeleteArea {
                id: id.into(),
                initiator_id,
            })
            .await;
        match result {
            Ok(_) => {
                ctx.revalidate(AREA_PATHS);
                StatusPayload::ok()
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    StatusPayload::rejected(ADMIN_REQUIRED)
                }
                E::AreaNotExists(_) => {
                    StatusPayload::rejected("Area does not exist")
                }
                E::DependentListings(d) => StatusPayload::rejected(format!(
                    "Area is referenced by {} listing(s), reassign or \
                     delete them first",
                    i64::from(*d),
                )),
                E::Db(_) => {
                    log::error!("`deleteArea` failed: {e}");
                    StatusPayload::rejected(STORE_FAILURE)
                }
            },
        }
    }

    /// Applies a new display order to the `Area` collection.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reorderAreas",
            ids.len = ids.len(),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reorder_areas(
        ids: Vec<area::Id>,
        ctx: &Context,
    ) -> StatusPayload {
        use command::reorder::ExecutionError as E;

        let Some(initiator_id) = Self::initiator(ctx).await else {
            return StatusPayload::rejected(ADMIN_REQUIRED);
        };

        let result = ctx
            .service()
            .execute(command::Reorder::<domain::Area> {
                updates: Self::sequenced(ids.into_iter().map(Into::into)),
                initiator_id,
            })
            .await;
        match result {
            Ok(()) => {
                ctx.revalidate(AREA_PATHS);
                StatusPayload::ok()
            }
            Err(e) => match e.as_ref() {
                E::AdminRequired | E::UserNotExists(_) => {
                    StatusPayload::rejected(ADMIN_REQUIRED)
                }
                E::RowsNotExist(_) | E::PartiallyApplied { .. } => {
                    StatusPayload::rejected(e.as_ref().to_string())
                }
                E::Db(_) => {
                    log::error!("`reorderAreas` failed: {e}");
                    StatusPayload::rejected(STORE_FAILURE)
                }
            },
        }
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LoginOccupied(_) => {
                Some(CredentialsError::LoginOccupied.into())
            }
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) | Self::UserNotExists(_) => None,
            Self::WrongCredentials => {
                Some(CredentialsError::WrongCredentials.into())
            }
        }
    }
}

define_error! {
    enum CredentialsError {
        #[code = "INVALID_NAME"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `User` name"]
        InvalidName,

        #[code = "INVALID_LOGIN"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `User` login"]
        InvalidLogin,

        #[code = "INVALID_PASSWORD"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `User` password"]
        InvalidPassword,

        #[code = "LOGIN_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Login is occupied by another `User`"]
        LoginOccupied,

        #[code = "WRONG_CREDENTIALS"]
        #[status = UNAUTHORIZED]
        #[message = "Wrong `User` credentials"]
        WrongCredentials,
    }
}
