//! Flag value types for command line front-ends.
//!
//! - [`option_list`] - comma-separated, validated option lists

pub mod option_list;

pub use option_list::OptionList;
