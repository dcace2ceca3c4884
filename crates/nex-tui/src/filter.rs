//! Country-filter resolution.
//!
//! Shared by every chart renderer: maps the country selection state to
//! the membership query and facet flag handed to the statistics
//! collaborator, or to a blocking placeholder. A caller must treat a
//! blocking result as "render this and compute nothing".

use crate::models::CountryMode;
use crate::panel::Placeholder;

#[derive(Clone, Debug, PartialEq)]
pub struct CountryFilter {
    pub countries: Option<Vec<String>>,
    pub facet: bool,
    pub blocking: Option<Placeholder>,
}

pub fn resolve_country_filter(mode: CountryMode, selected: &[String]) -> CountryFilter {
    match mode {
        CountryMode::All => CountryFilter {
            countries: None,
            facet: false,
            blocking: None,
        },
        CountryMode::Specific if selected.is_empty() => CountryFilter {
            countries: None,
            facet: false,
            blocking: Some(Placeholder::SelectCountry),
        },
        CountryMode::Specific => CountryFilter {
            countries: Some(selected.to_vec()),
            facet: true,
            blocking: None,
        },
    }
}
