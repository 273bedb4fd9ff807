//! [`User`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::Context;

/// A back-office account.
#[derive(Clone, Debug, From)]
pub struct User(domain::User);

/// A back-office account.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display name of this `User`.
    pub fn name(&self) -> String {
        self.0.name.to_string()
    }

    /// Login of this `User`.
    pub fn login(&self) -> String {
        self.0.login.to_string()
    }

    /// Role of this `User`.
    pub fn role(&self) -> Role {
        self.0.role.into()
    }

    /// `DateTime` when this `User` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

/// Role of a `User`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "UserRole")]
pub enum Role {
    /// May manage marketplace content.
    Admin,

    /// May only browse the marketplace.
    User,
}

impl From<domain::user::Role> for Role {
    fn from(role: domain::user::Role) -> Self {
        use domain::user::Role as R;
        match role {
            R::Admin => Self::Admin,
            R::User => Self::User,
        }
    }
}

pub mod session {
    //! `Session`-related definitions.

    use common::DateTime;
    use juniper::graphql_object;
    use service::command;

    use super::User;
    use crate::Context;

    /// Result of a `Session` creation.
    #[derive(Debug)]
    pub struct CreateResult {
        /// Token of the created `Session`.
        token: String,

        /// `User` the `Session` belongs to.
        user: User,

        /// `DateTime` when the `Session` expires.
        expires_at: DateTime,
    }

    impl From<command::create_user_session::Output> for CreateResult {
        fn from(output: command::create_user_session::Output) -> Self {
            Self {
                token: output.token.to_string(),
                user: output.user.into(),
                expires_at: output.expires_at.coerce(),
            }
        }
    }

    /// Result of a `Session` creation.
    #[graphql_object(name = "SessionCreateResult", context = Context)]
    impl CreateResult {
        /// Bearer token of the created `Session`.
        pub fn token(&self) -> &str {
            &self.token
        }

        /// `User` the `Session` belongs to.
        pub fn user(&self) -> &User {
            &self.user
        }

        /// `DateTime` when the `Session` expires.
        pub fn expires_at(&self) -> DateTime {
            self.expires_at
        }
    }
}
