use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::CatalogService;
use crate::domain::ports::{CustomerRepository, ProductRepository};
use crate::domain::product::Product;
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub quantity: i32,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            price: p.price.to_string(),
            quantity: p.quantity,
        }
    }
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product added", body = ProductResponse),
        (status = 400, description = "Invalid name, price or quantity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product<C, P>(
    service: web::Data<CatalogService<C, P>>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError>
where
    C: CustomerRepository,
    P: ProductRepository,
{
    let body = body.into_inner();
    let price = BigDecimal::from_str(&body.price)
        .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", body.price, e)))?;

    let product = web::block(move || service.add_product(&body.name, price, body.quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}
