//! In-memory port implementations for service and handler tests.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine, OrderLineInput};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::product::{NewProduct, Product, StockUpdate};

pub fn customer() -> Customer {
    Customer {
        id: Uuid::new_v4(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        created_at: Utc::now(),
    }
}

pub fn product(quantity: i32, price: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: format!("product-{quantity}"),
        price: BigDecimal::from_str(price).expect("valid decimal"),
        quantity,
    }
}

#[derive(Default)]
pub struct InMemoryCustomers {
    customers: Mutex<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomers {
    pub fn with(customers: impl IntoIterator<Item = Customer>) -> Self {
        Self {
            customers: Mutex::new(customers.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.customers.lock().unwrap().len()
    }
}

impl CustomerRepository for InMemoryCustomers {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.lock().unwrap().get(&id).cloned())
    }

    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let created = Customer {
            id: Uuid::new_v4(),
            name: customer.name,
            email: customer.email,
            created_at: Utc::now(),
        };
        self.customers
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    products: Mutex<HashMap<Uuid, Product>>,
    update_calls: AtomicUsize,
    fail_updates: AtomicBool,
    read_gate: Mutex<Option<Arc<Barrier>>>,
}

impl InMemoryProducts {
    pub fn with(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: Mutex::new(products.into_iter().map(|p| (p.id, p)).collect()),
            ..Self::default()
        }
    }

    pub fn stock(&self, id: Uuid) -> Option<i32> {
        self.products.lock().unwrap().get(&id).map(|p| p.quantity)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Makes every `find_all_by_id` wait on `gate` after reading, so that
    /// concurrent orders all see the same stock before any of them writes.
    pub fn hold_reads_at(&self, gate: Arc<Barrier>) {
        *self.read_gate.lock().unwrap() = Some(gate);
    }

    /// Makes every subsequent `update_quantity` fail without touching stock.
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

impl ProductRepository for InMemoryProducts {
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        let found: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.wait();
        }
        Ok(found)
    }

    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("stock store unavailable".to_string()));
        }

        let mut products = self.products.lock().unwrap();
        for update in updates {
            match products.get(&update.product_id) {
                None => return Err(DomainError::ProductNotFound(update.product_id)),
                Some(p) if p.quantity != update.expected => {
                    return Err(DomainError::StockChanged(update.product_id))
                }
                Some(_) => {}
            }
        }
        for update in updates {
            if let Some(p) = products.get_mut(&update.product_id) {
                p.quantity = update.quantity;
            }
        }
        Ok(())
    }

    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let created = Product {
            id: Uuid::new_v4(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        };
        self.products
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    orders: Mutex<Vec<Order>>,
    deleted: Mutex<Vec<Uuid>>,
    fail_deletes: AtomicBool,
}

impl InMemoryOrders {
    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, customer: &Customer, lines: &[OrderLineInput]) -> Result<Order, DomainError> {
        let order = Order {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            created_at: Utc::now(),
            lines: lines
                .iter()
                .map(|l| OrderLine {
                    id: Uuid::new_v4(),
                    product_id: l.product_id,
                    quantity: l.quantity,
                    price: l.price.clone(),
                })
                .collect(),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("order store unavailable".to_string()));
        }
        self.orders.lock().unwrap().retain(|o| o.id != id);
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}
