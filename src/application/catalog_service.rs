use bigdecimal::{BigDecimal, Zero};

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, ProductRepository};
use crate::domain::product::{NewProduct, Product};

/// Prices are stored as `NUMERIC(12, 2)`: two decimals, below 10^10.
const PRICE_SCALE: i64 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

/// Registration of the customers and products that orders refer to.
pub struct CatalogService<C, P> {
    customers: C,
    products: P,
}

impl<C: CustomerRepository, P: ProductRepository> CatalogService<C, P> {
    pub fn new(customers: C, products: P) -> Self {
        Self {
            customers,
            products,
        }
    }

    pub fn register_customer(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("customer name is required".into()));
        }
        if !email.contains('@') {
            return Err(DomainError::InvalidInput(format!(
                "'{email}' is not a valid email address"
            )));
        }

        let customer = self.customers.create(NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
        })?;
        log::info!("Registered customer {}", customer.id);
        Ok(customer)
    }

    pub fn add_product(
        &self,
        name: &str,
        price: BigDecimal,
        quantity: i32,
    ) -> Result<Product, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("product name is required".into()));
        }
        if price < BigDecimal::zero() {
            return Err(DomainError::InvalidInput(format!(
                "price must not be negative, got {price}"
            )));
        }
        let (_, scale) = price.normalized().as_bigint_and_exponent();
        if scale > PRICE_SCALE {
            return Err(DomainError::InvalidInput(format!(
                "price may have at most {PRICE_SCALE} decimal places, got {price}"
            )));
        }
        if price >= BigDecimal::from(PRICE_LIMIT) {
            return Err(DomainError::InvalidInput(format!(
                "price must be below {PRICE_LIMIT}, got {price}"
            )));
        }
        if quantity < 0 {
            return Err(DomainError::InvalidInput(format!(
                "quantity must not be negative, got {quantity}"
            )));
        }

        let product = self.products.create(NewProduct {
            name: name.to_string(),
            price,
            quantity,
        })?;
        log::info!(
            "Added product {} ({} in stock at {})",
            product.id,
            product.quantity,
            product.price
        );
        Ok(product)
    }
}
