pub mod book_repo;
pub mod memory;

pub use book_repo::PgBookStore;
pub use memory::MemoryBookStore;
