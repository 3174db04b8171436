pub mod output;

pub use output::{output_dir_name, prepare_output_dir};
