use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A product and the number of units the caller wants of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedProduct {
    pub id: Uuid,
    pub quantity: i32,
}

/// A line ready to be persisted. `price` is the product price at the moment
/// the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}
