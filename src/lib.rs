//! Weather panel
//!
//! Terminal weather lookup: search a city, read current conditions, and
//! pick another place from the map.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod icons;
pub mod logging;
pub mod map;
pub mod reducer;
pub mod state;
