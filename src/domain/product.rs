use bigdecimal::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    /// Units on hand.
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

/// New absolute stock level for a product, valid only while the stored level
/// still equals `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockUpdate {
    pub product_id: Uuid,
    pub expected: i32,
    pub quantity: i32,
}
