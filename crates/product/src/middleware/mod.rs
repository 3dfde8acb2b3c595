pub mod cors;
pub mod validate;
