use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine, OrderLineInput};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_lines, orders};

use super::models::{NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, customer: &Customer, lines: &[OrderLineInput]) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let order = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: Uuid::new_v4(),
                    customer_id: customer.id,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert order lines
            let new_lines = lines
                .iter()
                .enumerate()
                .map(|(i, l)| {
                    let position = i32::try_from(i).map_err(|_| {
                        DomainError::InvalidInput(format!("too many order lines ({})", lines.len()))
                    })?;
                    Ok(NewOrderLineRow {
                        id: Uuid::new_v4(),
                        order_id: order.id,
                        product_id: l.product_id,
                        position,
                        quantity: l.quantity,
                        price: l.price.clone(),
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            diesel::insert_into(order_lines::table)
                .values(&new_lines)
                .execute(conn)?;

            Ok(Order {
                id: order.id,
                customer_id: order.customer_id,
                created_at: order.created_at,
                lines: new_lines
                    .into_iter()
                    .map(|l| OrderLine {
                        id: l.id,
                        product_id: l.product_id,
                        quantity: l.quantity,
                        price: l.price,
                    })
                    .collect(),
            })
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = OrderLineRow::belonging_to(&order)
            .select(OrderLineRow::as_select())
            .order(order_lines::position.asc())
            .load(&mut conn)?;

        Ok(Some(Order {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            lines: lines.into_iter().map(OrderLine::from).collect(),
        }))
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(order_lines::table.filter(order_lines::order_id.eq(id))).execute(conn)?;
            diesel::delete(orders::table.find(id)).execute(conn)?;
            Ok(())
        })
    }
}
