// src/repositories/order_item_repository.rs
//
// Order line persistence

use std::sync::Arc;

use rusqlite::{named_params, params, Row};

use crate::aot::{DeclaredMethod, RepositoryContract, LIST_CRUD_CONTRACT};
use crate::db::ConnectionPool;
use crate::domain::order::OrderItem;
use crate::error::{AppError, AppResult};

use super::sql_types::{decimal_column, decimal_param};

/// Literal query behind `findOrderItemsWithCoffeeDetails`
pub const FIND_ORDER_ITEMS_WITH_COFFEE_DETAILS: &str = "
    SELECT oi.id AS id, oi.order_id AS order_id, oi.coffee_id AS coffee_id,
           oi.quantity AS quantity, oi.unit_price AS unit_price
    FROM order_items oi
    JOIN coffee c ON c.id = oi.coffee_id
    WHERE oi.order_id = :orderId
    ORDER BY c.name, oi.id";

pub const CONTRACT: RepositoryContract = RepositoryContract {
    name: "OrderItemRepository",
    qualified_name: "coffeehouse.order.OrderItemRepository",
    base: LIST_CRUD_CONTRACT,
    methods: &[
        DeclaredMethod::derived("findByOrderId", &["Long"]),
        DeclaredMethod::literal(
            "findOrderItemsWithCoffeeDetails",
            &["Long"],
            FIND_ORDER_ITEMS_WITH_COFFEE_DETAILS,
        ),
        // Redeclared from the CRUD base; excluded from coverage
        DeclaredMethod::provided("saveAll", &["Iterable"]),
    ],
};

const SELECT_ITEM: &str =
    "SELECT id, order_id, coffee_id, quantity, unit_price FROM order_items";

const INSERT_ITEM: &str =
    "INSERT INTO order_items (order_id, coffee_id, quantity, unit_price) VALUES (?1, ?2, ?3, ?4)";

#[cfg_attr(test, mockall::automock)]
pub trait OrderItemRepository: Send + Sync {
    fn save(&self, item: &OrderItem) -> AppResult<OrderItem>;

    /// Inserts every item in one transaction; nothing is stored if any fails
    fn save_all(&self, items: &[OrderItem]) -> AppResult<Vec<OrderItem>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<OrderItem>>;
    fn find_all(&self) -> AppResult<Vec<OrderItem>>;
    fn count(&self) -> AppResult<i64>;

    fn find_by_order_id(&self, order_id: i64) -> AppResult<Vec<OrderItem>>;

    /// Items of one order, sorted by coffee name
    fn find_order_items_with_coffee_details(&self, order_id: i64) -> AppResult<Vec<OrderItem>>;
}

pub struct SqliteOrderItemRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteOrderItemRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &Row) -> Result<OrderItem, rusqlite::Error> {
        Ok(OrderItem {
            id: Some(row.get("id")?),
            order_id: row.get("order_id")?,
            coffee_id: row.get("coffee_id")?,
            quantity: row.get("quantity")?,
            unit_price: decimal_column(row, "unit_price")?,
        })
    }

    fn insert(conn: &rusqlite::Connection, item: &OrderItem) -> AppResult<OrderItem> {
        conn.execute(
            INSERT_ITEM,
            params![
                item.order_id,
                item.coffee_id,
                item.quantity,
                decimal_param(&item.unit_price),
            ],
        )?;
        Ok(OrderItem {
            id: Some(conn.last_insert_rowid()),
            ..item.clone()
        })
    }
}

impl OrderItemRepository for SqliteOrderItemRepository {
    fn save(&self, item: &OrderItem) -> AppResult<OrderItem> {
        let conn = self.pool.get()?;

        match item.id {
            None => Self::insert(&conn, item),
            Some(id) => {
                let rows_affected = conn.execute(
                    "UPDATE order_items SET order_id = ?1, coffee_id = ?2, quantity = ?3,
                            unit_price = ?4
                     WHERE id = ?5",
                    params![
                        item.order_id,
                        item.coffee_id,
                        item.quantity,
                        decimal_param(&item.unit_price),
                        id,
                    ],
                )?;
                if rows_affected == 0 {
                    return Err(AppError::not_found(format!("OrderItem {}", id)));
                }
                Ok(item.clone())
            }
        }
    }

    fn save_all(&self, items: &[OrderItem]) -> AppResult<Vec<OrderItem>> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let saved = items
            .iter()
            .map(|item| Self::insert(&tx, item))
            .collect::<AppResult<Vec<_>>>()?;

        tx.commit()?;
        Ok(saved)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<OrderItem>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_ITEM))?;

        match stmt.query_row(params![id], Self::row_to_item) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_all(&self) -> AppResult<Vec<OrderItem>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_ITEM))?;

        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let count = conn.query_row("SELECT COUNT(*) FROM order_items", [], |row| row.get(0))?;
        Ok(count)
    }

    fn find_by_order_id(&self, order_id: i64) -> AppResult<Vec<OrderItem>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE order_id = ?1 ORDER BY id", SELECT_ITEM))?;

        let items = stmt
            .query_map(params![order_id], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn find_order_items_with_coffee_details(&self, order_id: i64) -> AppResult<Vec<OrderItem>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_ORDER_ITEMS_WITH_COFFEE_DETAILS)?;

        let items = stmt
            .query_map(named_params! { ":orderId": order_id }, Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_database, IN_MEMORY};
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn repo() -> SqliteOrderItemRepository {
        let pool = open_database(IN_MEMORY, 2, true).unwrap();
        SqliteOrderItemRepository::new(Arc::new(pool))
    }

    fn price(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).unwrap()
    }

    #[test]
    fn test_find_by_order_id() {
        let items = repo().find_by_order_id(1).unwrap();

        let coffees: Vec<_> = items.iter().map(|i| i.coffee_id).collect();
        assert_eq!(coffees, vec![4, 6, 1]);
    }

    #[test]
    fn test_items_with_coffee_details_sorted_by_coffee_name() {
        let items = repo().find_order_items_with_coffee_details(1).unwrap();

        // Caffe Latte, Cappuccino, Espresso
        let coffees: Vec<_> = items.iter().map(|i| i.coffee_id).collect();
        assert_eq!(coffees, vec![6, 4, 1]);
        assert_eq!(items[2].unit_price.to_string(), "2.50");
    }

    #[test]
    fn test_unknown_order_has_no_items() {
        let repo = repo();
        assert!(repo.find_by_order_id(999).unwrap().is_empty());
        assert!(repo.find_order_items_with_coffee_details(999).unwrap().is_empty());
    }

    #[test]
    fn test_save_all_assigns_ids() {
        let repo = repo();
        let before = repo.count().unwrap();

        let saved = repo
            .save_all(&[
                OrderItem::new(2, 1, 1, price("2.50")),
                OrderItem::new(2, 12, 3, price("4.00")),
            ])
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|i| i.id.is_some()));
        assert_eq!(repo.count().unwrap(), before + 2);
        assert_eq!(repo.find_by_order_id(2).unwrap().len(), 3);
    }

    #[test]
    fn test_save_all_is_atomic() {
        let repo = repo();
        let before = repo.count().unwrap();

        let result = repo.save_all(&[
            OrderItem::new(2, 1, 1, price("2.50")),
            OrderItem::new(2, 999, 1, price("1.00")),
        ]);

        assert!(result.is_err());
        assert_eq!(repo.count().unwrap(), before);
    }

    #[test]
    fn test_zero_quantity_rejected_by_schema() {
        let result = repo().save(&OrderItem::new(1, 1, 0, price("2.50")));
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_find_all_matches_count() {
        let repo = repo();
        assert_eq!(repo.find_all().unwrap().len(), 7);
        assert_eq!(repo.count().unwrap(), 7);
        assert_eq!(repo.find_by_id(5).unwrap().unwrap().quantity, 2);
    }
}
