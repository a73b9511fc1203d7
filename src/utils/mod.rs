// Shared utils

pub mod constants;
pub mod html;
pub mod single_run;
pub mod storage;

pub use constants::*;
pub use html::escape_html;
