//! [`Slug`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use unicode_normalization::UnicodeNormalization as _;

/// URL-safe identifier derived from a display name.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `slug` is in the derived form.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derives a [`Slug`] from the given display `name`.
    ///
    /// The `name` is [NFKC]-normalized and lowercased, characters outside
    /// letters and digits are dropped, and every run of whitespace,
    /// underscores and hyphens becomes a single hyphen. Letters of non-Latin
    /// scripts are preserved.
    ///
    /// [`None`] is returned when nothing sluggable remains, so that an
    /// unsluggable `name` cannot produce an empty [`Slug`] colliding with
    /// other unsluggable names.
    ///
    /// [NFKC]: https://unicode.org/reports/tr15
    #[must_use]
    pub fn derive(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref();

        let mut slug = String::with_capacity(name.len());
        let mut pending_hyphen = false;
        for c in name.nfkc().flat_map(char::to_lowercase) {
            if c.is_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            } else if c.is_whitespace() || c == '-' || c == '_' {
                pending_hyphen = true;
            }
        }

        (!slug.is_empty()).then_some(Self(slug))
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::derive(s)
            .filter(|slug| slug.0 == s)
            .ok_or("invalid `Slug`")
    }
}

#[cfg(test)]
mod spec {
    use super::Slug;

    fn derive(name: &str) -> Option<String> {
        Slug::derive(name).map(|s| s.0)
    }

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(
            derive("Beach Front Villas").as_deref(),
            Some("beach-front-villas"),
        );
        assert_eq!(derive("Villas").as_deref(), Some("villas"));
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(
            derive("  Beach__ Front--Villas  ").as_deref(),
            Some("beach-front-villas"),
        );
    }

    #[test]
    fn strips_symbols_without_separating() {
        assert_eq!(derive("AT&T Tower").as_deref(), Some("att-tower"));
        assert_eq!(derive("Villas — Palm").as_deref(), Some("villas-palm"));
    }

    #[test]
    fn preserves_non_latin_scripts() {
        assert_eq!(derive("شقق فاخرة").as_deref(), Some("شقق-فاخرة"));
        assert_eq!(derive("فلل 2024").as_deref(), Some("فلل-2024"));
    }

    #[test]
    fn rejects_unsluggable_names() {
        assert_eq!(derive(""), None);
        assert_eq!(derive("!!! &&& ???"), None);
        assert_eq!(derive("---___---"), None);
    }

    #[test]
    fn is_idempotent() {
        for name in ["Beach Front Villas", "AT&T Tower", "شقق فاخرة", "a_b-c d"] {
            let once = derive(name).unwrap();
            assert_eq!(derive(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn parses_only_derived_forms() {
        assert!("beach-front-villas".parse::<Slug>().is_ok());
        assert!("Beach Front".parse::<Slug>().is_err());
        assert!("-beach-".parse::<Slug>().is_err());
        assert!("".parse::<Slug>().is_err());
    }
}
