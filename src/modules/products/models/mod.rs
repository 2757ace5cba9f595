mod product;

pub use product::{
    CreateProductRequest, PriceHistory, Product, ProductSuggestion, UpdateProductRequest,
};
