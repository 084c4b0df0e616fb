//! # TUI Components
//!
//! Components follow two patterns, mirrored from the rest of the UI:
//!
//! - **Stateless (props-based)**: `TitleBar`, `DetailView` — all data
//!   arrives as props, nothing survives the frame.
//! - **Stateful (event-driven)**: `SearchBox` owns the query buffer;
//!   `CountryListState` owns the selection and survives in `TuiState`,
//!   with `CountryListPane` as its per-frame render wrapper.
//!
//! Each component file co-locates its state, events, rendering, and tests.

pub mod country_list;
pub mod detail_view;
pub mod search_box;
pub mod title_bar;

pub use country_list::{CountryListPane, CountryListState};
pub use detail_view::DetailView;
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
