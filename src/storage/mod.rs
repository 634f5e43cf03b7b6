pub mod memory;
pub mod persistent;

pub use memory::MemoryStore;
pub use persistent::{PersistentStore, SledStore};
