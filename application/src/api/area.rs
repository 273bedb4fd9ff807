//! [`Area`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{FieldViolation, Violations},
    Context,
};

/// Geographic area property listings are browsed by.
#[derive(Clone, Debug, From)]
pub struct Area(domain::Area);

/// Geographic area property listings are browsed by.
#[graphql_object(context = Context)]
impl Area {
    /// Unique identifier of this `Area`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display name of this `Area`.
    pub fn name(&self) -> String {
        self.0.name.to_string()
    }

    /// URL-safe identifier of this `Area`, derived from its name.
    pub fn slug(&self) -> String {
        self.0.slug.to_string()
    }

    /// Indicator whether this `Area` is browsable on the public marketplace.
    pub fn is_active(&self) -> bool {
        self.0.is_active
    }

    /// Position of this `Area` in the display order.
    pub fn order_index(&self) -> i32 {
        self.0.order_index.into()
    }

    /// `DateTime` when this `Area` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Area`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::area::Id)]
#[into(domain::area::Id)]
#[graphql(name = "AreaId", transparent)]
pub struct Id(Uuid);

/// Input of an `Area` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "AreaInput")]
pub struct Input {
    /// Display name of the `Area`.
    pub name: String,

    /// Indicator whether the `Area` is browsable on the public marketplace
    /// (active when omitted).
    pub is_active: Option<bool>,

    /// Explicit position of the `Area` in the display order.
    pub order_index: Option<i32>,
}

impl Input {
    /// Validates this [`Input`] into a [`command::CreateArea`] in a single
    /// pass, collecting all the [`FieldViolation`]s at once.
    pub(crate) fn validate(
        self,
        initiator_id: domain::user::Id,
    ) -> Result<command::CreateArea, Vec<FieldViolation>> {
        let Self {
            name,
            is_active,
            order_index,
        } = self;

        let mut v = Violations::default();
        let name = v.check(
            "name",
            domain::area::Name::new(name),
            "must be a non-empty trimmed string up to 512 characters",
        );

        v.into_result()?;
        Ok(command::CreateArea {
            name: name.expect("validated"),
            is_active: is_active.unwrap_or(true),
            order_index,
            initiator_id,
        })
    }
}

/// Outcome of an `Area` mutation.
#[derive(Debug)]
pub struct Payload {
    /// Indicator whether the mutation succeeded.
    success: bool,

    /// Human-readable outcome message.
    message: String,

    /// Violations of the submitted fields, if any.
    errors: Option<Vec<FieldViolation>>,

    /// Affected [`Area`], if the mutation succeeded.
    area: Option<Area>,
}

impl Payload {
    /// Creates a successful [`Payload`] with the affected [`Area`].
    pub(crate) fn ok(area: Area) -> Self {
        Self {
            success: true,
            message: "OK".to_owned(),
            errors: None,
            area: Some(area),
        }
    }

    /// Creates a failed [`Payload`] with the provided `message`.
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            area: None,
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
            area: None,
        }
    }

    /// Creates a failed [`Payload`] out of the provided [`FieldViolation`]s.
    pub(crate) fn invalid(errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            message: "Validation failed".to_owned(),
            errors: Some(errors),
            area: None,
        }
    }
}

/// Outcome of an `Area` mutation.
#[graphql_object(name = "AreaPayload", context = Context)]
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

    /// Affected `Area`, if the mutation succeeded.
    pub fn area(&self) -> Option<&Area> {
        self.area.as_ref()
    }
}
