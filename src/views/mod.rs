pub mod guards;
pub mod navbar;
