// src/repositories/order_repository.rs
//
// Order persistence

use std::sync::Arc;

use chrono::NaiveDateTime;
use rusqlite::{named_params, params, Row};

use crate::aot::{DeclaredMethod, RepositoryContract, LIST_CRUD_CONTRACT};
use crate::db::ConnectionPool;
use crate::domain::order::{Order, OrderStatus};
use crate::error::{AppError, AppResult};

use super::sql_types::{
    datetime_column, datetime_param, decimal_column, decimal_param, enum_column,
};

/// Literal query behind `findOrdersByCoffeeName`
pub const FIND_ORDERS_BY_COFFEE_NAME: &str = "
    SELECT DISTINCT o.id AS id, o.customer_id AS customer_id,
           o.customer_name AS customer_name, o.order_date AS order_date,
           o.total_amount AS total_amount, o.status AS status
    FROM orders o
    JOIN order_items oi ON oi.order_id = o.id
    JOIN coffee c ON c.id = oi.coffee_id
    WHERE c.name = :coffeeName
    ORDER BY o.order_date DESC";

pub const CONTRACT: RepositoryContract = RepositoryContract {
    name: "OrderRepository",
    qualified_name: "coffeehouse.order.OrderRepository",
    base: LIST_CRUD_CONTRACT,
    methods: &[
        DeclaredMethod::derived("findByCustomerName", &["String"]),
        DeclaredMethod::derived(
            "findByStatusAndOrderDateAfter",
            &["OrderStatus", "LocalDateTime"],
        ),
        DeclaredMethod::literal(
            "findOrdersByCoffeeName",
            &["String"],
            FIND_ORDERS_BY_COFFEE_NAME,
        ),
    ],
};

const SELECT_ORDER: &str =
    "SELECT id, customer_id, customer_name, order_date, total_amount, status FROM orders";

#[cfg_attr(test, mockall::automock)]
pub trait OrderRepository: Send + Sync {
    /// Insert when `id` is `None`, update otherwise. Returns the stored order.
    fn save(&self, order: &Order) -> AppResult<Order>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Order>>;
    fn find_all(&self) -> AppResult<Vec<Order>>;
    fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Deletes the order; its items go with it (ON DELETE CASCADE)
    fn delete_by_id(&self, id: i64) -> AppResult<()>;
    fn count(&self) -> AppResult<i64>;

    fn find_by_customer_name(&self, customer_name: &str) -> AppResult<Vec<Order>>;

    /// Orders in `status` placed strictly after `since`
    fn find_by_status_and_order_date_after(
        &self,
        status: OrderStatus,
        since: NaiveDateTime,
    ) -> AppResult<Vec<Order>>;

    /// Orders with at least one item of the named coffee, newest first
    fn find_orders_by_coffee_name(&self, coffee_name: &str) -> AppResult<Vec<Order>>;
}

pub struct SqliteOrderRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteOrderRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_order(row: &Row) -> Result<Order, rusqlite::Error> {
        Ok(Order {
            id: Some(row.get("id")?),
            customer_id: row.get("customer_id")?,
            customer_name: row.get("customer_name")?,
            order_date: datetime_column(row, "order_date")?,
            total_amount: decimal_column(row, "total_amount")?,
            status: enum_column(row, "status")?,
        })
    }
}

impl OrderRepository for SqliteOrderRepository {
    fn save(&self, order: &Order) -> AppResult<Order> {
        let conn = self.pool.get()?;

        match order.id {
            None => {
                conn.execute(
                    "INSERT INTO orders (customer_id, customer_name, order_date, total_amount, status)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        order.customer_id,
                        order.customer_name,
                        datetime_param(&order.order_date),
                        decimal_param(&order.total_amount),
                        order.status.as_str(),
                    ],
                )?;
                Ok(Order {
                    id: Some(conn.last_insert_rowid()),
                    ..order.clone()
                })
            }
            Some(id) => {
                let rows_affected = conn.execute(
                    "UPDATE orders SET customer_id = ?1, customer_name = ?2, order_date = ?3,
                            total_amount = ?4, status = ?5
                     WHERE id = ?6",
                    params![
                        order.customer_id,
                        order.customer_name,
                        datetime_param(&order.order_date),
                        decimal_param(&order.total_amount),
                        order.status.as_str(),
                        id,
                    ],
                )?;
                if rows_affected == 0 {
                    return Err(AppError::not_found(format!("Order {}", id)));
                }
                Ok(order.clone())
            }
        }
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_ORDER))?;

        match stmt.query_row(params![id], Self::row_to_order) {
            Ok(order) => Ok(Some(order)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_all(&self) -> AppResult<Vec<Order>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_ORDER))?;

        let orders = stmt
            .query_map([], Self::row_to_order)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }

    fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM orders WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM orders WHERE id = ?1", params![id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found(format!("Order {}", id)));
        }

        Ok(())
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let count = conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(count)
    }

    fn find_by_customer_name(&self, customer_name: &str) -> AppResult<Vec<Order>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare(&format!("{} WHERE customer_name = ?1 ORDER BY id", SELECT_ORDER))?;

        let orders = stmt
            .query_map(params![customer_name], Self::row_to_order)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }

    fn find_by_status_and_order_date_after(
        &self,
        status: OrderStatus,
        since: NaiveDateTime,
    ) -> AppResult<Vec<Order>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE status = ?1 AND order_date > ?2 ORDER BY id",
            SELECT_ORDER
        ))?;

        let orders = stmt
            .query_map(
                params![status.as_str(), datetime_param(&since)],
                Self::row_to_order,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }

    fn find_orders_by_coffee_name(&self, coffee_name: &str) -> AppResult<Vec<Order>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_ORDERS_BY_COFFEE_NAME)?;

        let orders = stmt
            .query_map(
                named_params! { ":coffeeName": coffee_name },
                Self::row_to_order,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }
}
