//! Output handling for feed results.
//!
//! This module handles persisting and presenting results:
//! - [`store`] - JSON file dumps of entries and consolidated lists
//! - [`terminal`] - colored summary printing

mod store;
mod terminal;

pub use store::{
    create_directories, load_results, store_results, write_consolidated, write_filtered_entries,
    write_regions,
};
pub use terminal::print_summary;
