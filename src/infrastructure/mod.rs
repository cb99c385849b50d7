mod customer_repo;
pub mod models;
mod order_repo;
mod product_repo;

#[cfg(test)]
mod test_db;

pub use customer_repo::DieselCustomerRepository;
pub use order_repo::DieselOrderRepository;
pub use product_repo::DieselProductRepository;

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
