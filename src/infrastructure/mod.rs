// Infrastructure layer
pub mod cache;
pub mod file_system;
pub mod persistent_cache;
pub mod processors;
pub mod publisher;

pub use cache::*;
pub use file_system::*;
pub use persistent_cache::*;
pub use processors::*;
pub use publisher::*;
