//! Reader for `gfx2.ini`, the settings file of the GrafX2 paint program.
//!
//! [`loader::load`] fills a [`config::Config`] from the user's file, falling
//! back to the bundled `gfx2def.ini`. The record is only replaced when the
//! whole file validates.

pub mod config;
pub mod ini;
pub mod loader;
pub mod paths;
pub mod video;

pub use config::Config;
pub use ini::IniError;
pub use loader::{LoadContext, load};
