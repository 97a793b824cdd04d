pub mod client_info;
pub mod response;

pub use client_info::client_info_from;
pub use response::ResponseBuilder;
