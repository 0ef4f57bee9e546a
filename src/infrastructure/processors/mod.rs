// Processors module
pub mod css_processor;
pub mod minifier;
pub mod registry;
pub mod transform;

pub use css_processor::*;
pub use minifier::*;
pub use registry::*;
pub use transform::*;
