//! [`Category`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{FieldViolation, Violations},
    Context,
};

/// Category of property listings.
#[derive(Clone, Debug, From)]
pub struct Category(domain::Category);

/// Category of property listings.
#[graphql_object(context = Context)]
impl Category {
    /// Unique identifier of this `Category`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display name of this `Category`.
    pub fn name(&self) -> String {
        self.0.name.to_string()
    }

    /// URL-safe identifier of this `Category`, derived from its name.
    pub fn slug(&self) -> String {
        self.0.slug.to_string()
    }

    /// Description of this `Category`, if any.
    pub fn description(&self) -> Option<String> {
        self.0.description.as_ref().map(ToString::to_string)
    }

    /// Position of this `Category` in the display order.
    pub fn order_index(&self) -> i32 {
        self.0.order_index.into()
    }

    /// `DateTime` when this `Category` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Category`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::category::Id)]
#[into(domain::category::Id)]
#[graphql(name = "CategoryId", transparent)]
pub struct Id(Uuid);

/// Input of a `Category` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "CategoryInput")]
pub struct Input {
    /// Display name of the `Category`.
    pub name: String,

    /// Description of the `Category`.
    pub description: Option<String>,

    /// Explicit position of the `Category` in the display order.
    pub order_index: Option<i32>,
}

impl Input {
    /// Validates this [`Input`] into a [`command::CreateCategory`] in a
    /// single pass, collecting all the [`FieldViolation`]s at once.
    pub(crate) fn validate(
        self,
        initiator_id: domain::user::Id,
    ) -> Result<command::CreateCategory, Vec<FieldViolation>> {
        let Self {
            name,
            description,
            order_index,
        } = self;

        let mut v = Violations::default();
        let name = v.check(
            "name",
            domain::category::Name::new(name),
            "must be a non-empty trimmed string up to 512 characters",
        );
        let description = match description {
            Some(d) => v
                .check(
                    "description",
                    domain::category::Description::new(d),
                    "must be a non-blank string up to 2048 characters",
                )
                .map(Some),
            None => Some(None),
        };

        v.into_result()?;
        Ok(command::CreateCategory {
            name: name.expect("validated"),
            description: description.expect("validated"),
            order_index,
            initiator_id,
        })
    }
}

/// Outcome of a `Category` mutation.
#[derive(Debug)]
pub struct Payload {
    /// Indicator whether the mutation succeeded.
    success: bool,

    /// Human-readable outcome message.
    message: String,

    /// Violations of the submitted fields, if any.
    errors: Option<Vec<FieldViolation>>,

    /// Affected [`Category`], if the mutation succeeded.
    category: Option<Category>,
}

impl Payload {
    /// Creates a successful [`Payload`] with the affected [`Category`].
    pub(crate) fn ok(category: Category) -> Self {
        Self {
            success: true,
            message: "OK".to_owned(),
            errors: None,
            category: Some(category),
        }
    }

    /// Creates a failed [`Payload`] with the provided `message`.
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            category: None,
        }
    }

    /// Creates a failed [`Payload`] with a single violation of the provided
    /// `field`.
    pub(crate) fn field_rejected(
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            success: false,
            message: message.clone(),
            errors: Some(vec![FieldViolation {
                field: field.to_owned(),
                message,
            }]),
            category: None,
        }
    }

    /// Creates a failed [`Payload`] out of the provided [`FieldViolation`]s.
    pub(crate) fn invalid(errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            message: "Validation failed".to_owned(),
            errors: Some(errors),
            category: None,
        }
    }
}

/// Outcome of a `Category` mutation.
#[graphql_object(name = "CategoryPayload", context = Context)]
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

    /// Affected `Category`, if the mutation succeeded.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }
}
