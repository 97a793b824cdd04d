pub mod check;
pub mod submit;
pub mod validate;
