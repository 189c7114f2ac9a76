//! Text output of the external tools turned into records.
//!
//! All parsers are pure functions over captured stdout.

pub mod apps;
pub mod containers;
pub mod images;
pub mod packages;

pub use apps::parse_shared_apps;
pub use containers::{container_record, parse_container_list, parse_inspect};
pub use images::parse_image_table;
pub use packages::parse_search_results;
