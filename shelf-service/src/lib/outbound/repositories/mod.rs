pub mod book;
pub mod memory;

pub use book::PostgresBookRepository;
pub use memory::InMemoryBookRepository;
