use std::sync::Arc;

use uuid::Uuid;

use super::customer::{Customer, NewCustomer};
use super::errors::DomainError;
use super::order::{Order, OrderLineInput};
use super::product::{NewProduct, Product, StockUpdate};

pub trait CustomerRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    /// Returns the products among `ids` that exist, in no particular order.
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;
    /// Applies every update or none of them. Fails with `StockChanged` if any
    /// product no longer holds its `expected` level.
    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError>;
    fn create(&self, product: NewProduct) -> Result<Product, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, customer: &Customer, lines: &[OrderLineInput]) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    /// Removes an order and its lines. Used to undo a creation whose stock
    /// reservation could not be written.
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

impl<T: CustomerRepository> CustomerRepository for Arc<T> {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        (**self).find_by_id(id)
    }

    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        (**self).create(customer)
    }
}

impl<T: ProductRepository> ProductRepository for Arc<T> {
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        (**self).find_all_by_id(ids)
    }

    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        (**self).update_quantity(updates)
    }

    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        (**self).create(product)
    }
}

impl<T: OrderRepository> OrderRepository for Arc<T> {
    fn create(&self, customer: &Customer, lines: &[OrderLineInput]) -> Result<Order, DomainError> {
        (**self).create(customer, lines)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        (**self).delete(id)
    }
}
