//! Request and response bodies for the HTTP API

pub mod cart;
pub mod product;
pub mod search;

pub use cart::{AddToCartRequest, CartResponse};
pub use product::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
pub use search::{Pagination, SearchData, SearchResponse};
