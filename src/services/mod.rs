pub mod cart_service;
pub mod catalog_service;
pub mod discount;
pub mod user_service;

pub use cart_service::*;
pub use catalog_service::*;
pub use discount::*;
pub use user_service::*;
