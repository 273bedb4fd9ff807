//! GraphQL API definitions.

pub mod area;
pub mod category;
pub mod listing;
mod mutation;
mod query;
pub mod scalar;
pub mod user;

use juniper::{EmptySubscription, GraphQLObject};

use crate::{define_error, Context};

pub use self::{
    area::Area, category::Category, listing::Listing, mutation::Mutation,
    query::Query, user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}

/// Violation of a single input field.
#[derive(Clone, Debug, GraphQLObject)]
pub struct FieldViolation {
    /// Name of the violated field.
    pub field: String,

    /// Human-readable message of the violation.
    pub message: String,
}

/// Accumulator of [`FieldViolation`]s over a single validation pass.
///
/// Every field of an input is checked in one pass, so the caller receives
/// the full violation list at once instead of fixing fields one by one.
#[derive(Clone, Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Records a violation of the given `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.to_owned(),
            message: message.into(),
        });
    }

    /// Passes the `parsed` value through, recording a violation of the given
    /// `field` when there is none.
    pub fn check<T>(
        &mut self,
        field: &str,
        parsed: Option<T>,
        message: &str,
    ) -> Option<T> {
        if parsed.is_none() {
            self.push(field, message);
        }
        parsed
    }

    /// Returns all the recorded [`FieldViolation`]s, if any.
    ///
    /// # Errors
    ///
    /// Errors with the recorded [`FieldViolation`]s.
    pub fn into_result(self) -> Result<(), Vec<FieldViolation>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

/// Outcome of a mutation producing no entity.
#[derive(Clone, Debug, GraphQLObject)]
pub struct StatusPayload {
    /// Indicator whether the mutation succeeded.
    pub success: bool,

    /// Human-readable outcome message.
    pub message: String,

    /// Violations of the submitted fields, if any.
    pub errors: Option<Vec<FieldViolation>>,
}

impl StatusPayload {
    /// Creates a successful [`StatusPayload`].
    pub(crate) fn ok() -> Self {
        Self {
            success: true,
            message: "OK".to_owned(),
            errors: None,
        }
    }

    /// Creates a failed [`StatusPayload`] with the provided `message`.
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}
