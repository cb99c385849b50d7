pub mod customers;
pub mod orders;
pub mod products;

use actix_web::web;
use utoipa::OpenApi;

use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};

#[derive(OpenApi)]
#[openapi(
    paths(
        customers::create_customer,
        products::create_product,
        orders::create_order,
        orders::get_order,
    ),
    components(schemas(
        customers::CreateCustomerRequest,
        customers::CustomerResponse,
        products::CreateProductRequest,
        products::ProductResponse,
        orders::RequestedProductRequest,
        orders::CreateOrderRequest,
        orders::OrderLineResponse,
        orders::OrderResponse,
    )),
    tags(
        (name = "customers", description = "Customer registration"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Order placement and lookup"),
    )
)]
pub struct ApiDoc;

/// Registers every endpoint. Expects `web::Data<OrderService<C, P, O>>` and
/// `web::Data<CatalogService<C, P>>` in the app data.
pub fn routes<C, P, O>(cfg: &mut web::ServiceConfig)
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    cfg.service(
        web::scope("/customers").route("", web::post().to(customers::create_customer::<C, P>)),
    )
    .service(web::scope("/products").route("", web::post().to(products::create_product::<C, P>)))
    .service(
        web::scope("/orders")
            .route("", web::post().to(orders::create_order::<C, P, O>))
            .route("/{id}", web::get().to(orders::get_order::<C, P, O>)),
    );
}
