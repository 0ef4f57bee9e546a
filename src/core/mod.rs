// Core domain layer
pub mod interfaces;
pub mod locator;
pub mod mime;
pub mod models;
pub mod roots;
pub mod services;

pub use interfaces::*;
pub use locator::*;
pub use mime::*;
pub use models::*;
pub use roots::*;
pub use services::*;
