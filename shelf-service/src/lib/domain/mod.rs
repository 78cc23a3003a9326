pub mod book;
pub mod shelf;
