pub mod contact;
pub mod health;

pub use contact::{contact_options, contact_post, method_not_allowed, not_found};
pub use health::health;
