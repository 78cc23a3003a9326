pub mod filter;
pub mod models;
pub mod packer;

pub use filter::DateRange;
pub use models::Shelf;
pub use models::ShelfLayout;
pub use packer::ShelfPacker;
