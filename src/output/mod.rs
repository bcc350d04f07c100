//! Output formatting module

mod instances;

pub use instances::{format_instances_table, instance_label};
