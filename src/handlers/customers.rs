use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::CatalogService;
use crate::domain::customer::Customer;
use crate::domain::ports::{CustomerRepository, ProductRepository};
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            id: c.id,
            name: c.name,
            email: c.email,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = CustomerResponse),
        (status = 400, description = "Invalid name or email"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn create_customer<C, P>(
    service: web::Data<CatalogService<C, P>>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError>
where
    C: CustomerRepository,
    P: ProductRepository,
{
    let body = body.into_inner();

    let customer = web::block(move || service.register_customer(&body.name, &body.email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}
