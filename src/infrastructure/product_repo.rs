use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, StockUpdate};
use crate::schema::products;

use super::models::{NewProductRow, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::id.eq_any(ids.to_vec()))
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let now = Utc::now();
            for update in updates {
                // Guarded on the level the caller read, so a concurrent
                // order in between makes this batch fail instead of
                // overwriting its decrement.
                let touched = diesel::update(
                    products::table
                        .find(update.product_id)
                        .filter(products::quantity.eq(update.expected)),
                )
                .set((
                    products::quantity.eq(update.quantity),
                    products::updated_at.eq(now),
                ))
                .execute(conn)?;
                if touched == 0 {
                    let exists: i64 = products::table
                        .find(update.product_id)
                        .count()
                        .get_result(conn)?;
                    return Err(if exists == 0 {
                        DomainError::ProductNotFound(update.product_id)
                    } else {
                        DomainError::StockChanged(update.product_id)
                    });
                }
            }
            Ok(())
        })
    }

    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: &product.name,
                price: product.price,
                quantity: product.quantity,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }
}
