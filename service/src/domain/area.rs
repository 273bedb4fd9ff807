//! [`Area`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ordering, Orderable, Slug};

/// Geographic area [`Listing`]s are browsed by.
///
/// [`Listing`]: super::Listing
#[derive(Clone, Debug)]
pub struct Area {
    /// ID of this [`Area`].
    pub id: Id,

    /// [`Name`] of this [`Area`].
    pub name: Name,

    /// [`Slug`] of this [`Area`], derived from its [`Name`].
    pub slug: Slug,

    /// Indicator whether this [`Area`] is browsable on the public
    /// marketplace.
    pub is_active: bool,

    /// Position of this [`Area`] in the display order.
    pub order_index: ordering::OrderIndex,

    /// [`DateTime`] when this [`Area`] was created.
    pub created_at: CreationDateTime,
}

impl Orderable for Area {
    type Id = Id;
}

/// ID of an [`Area`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of an [`Area`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// [`DateTime`] when an [`Area`] was created.
pub type CreationDateTime = DateTimeOf<(Area, unit::Creation)>;
