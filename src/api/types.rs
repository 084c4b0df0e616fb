//! Data model for the restcountries v3.1 payload.
//!
//! Only the fields the app actually renders are modeled; everything else
//! in the (large) upstream payload is ignored by serde. Records are
//! immutable once fetched — the rest of the app only ever borrows them.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Common and official names for a country.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

/// A currency entry from the `currencies` map.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

/// Flag image references. The app displays the URL; it never fetches the image.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    pub png: Option<String>,
    pub svg: Option<String>,
}

/// One country record as returned by `GET /v3.1/all`.
///
/// `cca3` is the stable three-letter identifier — unique within a fetch,
/// and the key under which favorites are persisted. Maps use `BTreeMap`
/// so joined summaries render in a deterministic order.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub name: CountryName,
    pub cca3: String,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub region: String,
    pub subregion: Option<String>,
    pub languages: Option<BTreeMap<String, String>>,
    pub currencies: Option<BTreeMap<String, Currency>>,
    #[serde(default)]
    pub flags: Flags,
}

impl Country {
    /// The primary capital, if the record lists any.
    pub fn capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Language names joined with ", ", or `None` when the map is absent or empty.
    pub fn language_summary(&self) -> Option<String> {
        let languages = self.languages.as_ref()?;
        if languages.is_empty() {
            return None;
        }
        Some(
            languages
                .values()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Currencies as "Name (symbol)" joined with ", ", or `None` when absent.
    /// A currency without a symbol renders as "Name (-)".
    pub fn currency_summary(&self) -> Option<String> {
        let currencies = self.currencies.as_ref()?;
        if currencies.is_empty() {
            return None;
        }
        Some(
            currencies
                .values()
                .map(|c| format!("{} ({})", c.name, c.symbol.as_deref().unwrap_or("-")))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Preferred flag URL: SVG if present, else PNG.
    pub fn flag_url(&self) -> Option<&str> {
        self.flags.svg.as_deref().or(self.flags.png.as_deref())
    }
}

/// Format a count with '.' digit grouping ("212559417" -> "212.559.417").
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
