pub mod model;
pub mod registry;

pub use model::{ActiveDocument, Document};
pub use registry::DocumentRegistry;
