use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Customer {0} not found")]
    CustomerNotFound(Uuid),
    #[error("None of the requested products exist")]
    NoProductsFound,
    #[error("Product {0} not found")]
    ProductNotFound(Uuid),
    #[error(
        "Insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: Uuid,
        requested: i64,
        available: i32,
    },
    #[error("Stock of product {0} changed while the order was being placed")]
    StockChanged(Uuid),
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: Uuid, quantity: i32 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
