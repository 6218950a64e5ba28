//! Line-oriented reader for the `gfx2.ini` format.
//!
//! Lines are `KEY=value` or `[SECTION]`; `;` and `#` start comments and keys
//! are case-insensitive. Values are comma separated scalars: decimal
//! integers, `$`-prefixed hex integers or yes/no words.

pub mod error;
pub mod line;
pub mod reader;
pub mod value;

pub use error::{Corruption, IniError, ValueError};
pub use reader::IniReader;
