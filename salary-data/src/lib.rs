//! CSV loading for default salary component data.

mod loader;

pub use loader::{ComponentLoader, ComponentLoaderError, ComponentRecord};
