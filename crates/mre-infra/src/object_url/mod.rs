pub mod registry;

pub use registry::InMemoryObjectUrlRegistry;
