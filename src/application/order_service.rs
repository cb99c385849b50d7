use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLineInput, RequestedProduct};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::product::{Product, StockUpdate};

struct CheckedOrder {
    customer: Customer,
    lines: Vec<OrderLineInput>,
    updates: Vec<StockUpdate>,
}

pub struct OrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> OrderService<C, P, O>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// Places an order for `customer_id` and reserves the requested stock.
    ///
    /// Every check runs before the first write. Once the order is stored the
    /// stock levels are written in a single batch; if that batch fails the
    /// order is deleted again so that no order exists without its reservation.
    pub fn create_order(
        &self,
        customer_id: Uuid,
        requested: Vec<RequestedProduct>,
    ) -> Result<Order, DomainError> {
        let checked = self.check(customer_id, &requested).inspect_err(|e| {
            log::warn!("Order for customer {} rejected: {}", customer_id, e);
        })?;

        let order = self.orders.create(&checked.customer, &checked.lines)?;

        if let Err(e) = self.products.update_quantity(&checked.updates) {
            log::error!("Stock update for order {} failed: {}", order.id, e);
            return match self.orders.delete(order.id) {
                Ok(()) => {
                    log::warn!("Order {} rolled back", order.id);
                    Err(e)
                }
                Err(undo) => {
                    log::error!("Order {} could not be rolled back: {}", order.id, undo);
                    Err(DomainError::Internal(format!(
                        "stock update failed ({e}) and order {} could not be removed ({undo})",
                        order.id
                    )))
                }
            };
        }

        log::info!(
            "Created order {} for customer {} with {} line(s)",
            order.id,
            checked.customer.id,
            order.lines.len()
        );
        Ok(order)
    }

    /// Runs every business rule and prepares the writes. Reads only.
    fn check(
        &self,
        customer_id: Uuid,
        requested: &[RequestedProduct],
    ) -> Result<CheckedOrder, DomainError> {
        let customer = self
            .customers
            .find_by_id(customer_id)?
            .ok_or(DomainError::CustomerNotFound(customer_id))?;

        if let Some(line) = requested.iter().find(|p| p.quantity <= 0) {
            return Err(DomainError::InvalidQuantity {
                product_id: line.id,
                quantity: line.quantity,
            });
        }

        let ids: Vec<Uuid> = requested.iter().map(|p| p.id).collect();
        let found = self.products.find_all_by_id(&ids)?;
        if found.is_empty() {
            return Err(DomainError::NoProductsFound);
        }

        let catalog: HashMap<Uuid, &Product> = found.iter().map(|p| (p.id, p)).collect();
        if let Some(missing) = requested.iter().find(|p| !catalog.contains_key(&p.id)) {
            return Err(DomainError::ProductNotFound(missing.id));
        }

        let demand = total_demand(requested);
        let mut updates = Vec::with_capacity(demand.len());
        for (product_id, wanted) in demand {
            let product = catalog[&product_id];
            let available = i64::from(product.quantity);
            if wanted > available {
                return Err(DomainError::InsufficientStock {
                    product_id,
                    requested: wanted,
                    available: product.quantity,
                });
            }
            let remaining = i32::try_from(available - wanted).map_err(|e| {
                DomainError::Internal(format!("stock level for product {product_id}: {e}"))
            })?;
            updates.push(StockUpdate {
                product_id,
                expected: product.quantity,
                quantity: remaining,
            });
        }

        let lines = requested
            .iter()
            .map(|p| OrderLineInput {
                product_id: p.id,
                quantity: p.quantity,
                price: catalog[&p.id].price.clone(),
            })
            .collect();

        Ok(CheckedOrder {
            customer,
            lines,
            updates,
        })
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.orders.find_by_id(id)
    }
}

/// Total units requested per product, in order of first appearance.
fn total_demand(requested: &[RequestedProduct]) -> Vec<(Uuid, i64)> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut totals: Vec<(Uuid, i64)> = Vec::new();
    for line in requested {
        match index.get(&line.id) {
            Some(&i) => totals[i].1 += i64::from(line.quantity),
            None => {
                index.insert(line.id, totals.len());
                totals.push((line.id, i64::from(line.quantity)));
            }
        }
    }
    totals
}
