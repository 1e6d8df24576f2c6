//! Business logic layer

pub mod cart;
pub mod catalog;
pub mod search;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use search::SearchService;
