//! # API Layer
//!
//! Talks to restcountries.com and models its payload. This is the only
//! module that knows about HTTP; the core consumes `Vec<Country>` and
//! never issues requests itself.

pub mod client;
pub mod types;

pub use client::{CountrySource, FetchError, RestCountriesClient};
pub use types::{Country, CountryName, Currency, Flags, group_digits};
