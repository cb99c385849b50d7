use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::OrderService;
use crate::domain::order::{Order, RequestedProduct};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestedProductRequest {
    pub id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub products: Vec<RequestedProductRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price at the time the order was placed, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at.to_rfc3339(),
            lines: order
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    id: l.id,
                    product_id: l.product_id,
                    quantity: l.quantity,
                    price: l.price.to_string(),
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order for an existing customer. The customer and every product
/// must exist and each product must have enough stock; the order is stored
/// with the current product prices and the stock is decremented.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Unknown customer or product, or invalid quantity"),
        (status = 409, description = "Insufficient stock"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order<C, P, O>(
    service: web::Data<OrderService<C, P, O>>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    let body = body.into_inner();
    let requested: Vec<RequestedProduct> = body
        .products
        .into_iter()
        .map(|p| RequestedProduct {
            id: p.id,
            quantity: p.quantity,
        })
        .collect();

    let order = web::block(move || service.create_order(body.customer_id, requested))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns a single order with all of its lines.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order<C, P, O>(
    service: web::Data<OrderService<C, P, O>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    let order_id = path.into_inner();

    let result = web::block(move || service.get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound),
    }
}
