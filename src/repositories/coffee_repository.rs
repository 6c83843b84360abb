// src/repositories/coffee_repository.rs
//
// Coffee persistence

use std::sync::Arc;

use bigdecimal::BigDecimal;
use rusqlite::{named_params, params, Row};

use crate::aot::{DeclaredMethod, RepositoryContract, LIST_CRUD_CONTRACT};
use crate::db::ConnectionPool;
use crate::domain::coffee::{Coffee, Size};
use crate::error::{AppError, AppResult};

use super::sql_types::{decimal_column, decimal_param, enum_column};

/// Literal query behind `findAffordableCoffeesBySize`
pub const FIND_AFFORDABLE_COFFEES_BY_SIZE: &str = "
    SELECT id, name, description, price, size FROM coffee
    WHERE size = :size
    AND price <= :maxPrice
    ORDER BY price DESC";

pub const CONTRACT: RepositoryContract = RepositoryContract {
    name: "CoffeeRepository",
    qualified_name: "coffeehouse.coffee.CoffeeRepository",
    base: LIST_CRUD_CONTRACT,
    methods: &[
        DeclaredMethod::derived("findByNameContainingIgnoreCase", &["String"]),
        DeclaredMethod::derived("findBySizeAndPriceGreaterThan", &["Size", "BigDecimal"]),
        DeclaredMethod::literal(
            "findAffordableCoffeesBySize",
            &["String", "BigDecimal"],
            FIND_AFFORDABLE_COFFEES_BY_SIZE,
        ),
    ],
};

#[cfg_attr(test, mockall::automock)]
pub trait CoffeeRepository: Send + Sync {
    /// Insert when `id` is `None`, update otherwise. Returns the stored coffee.
    fn save(&self, coffee: &Coffee) -> AppResult<Coffee>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Coffee>>;
    fn find_all(&self) -> AppResult<Vec<Coffee>>;
    fn exists_by_id(&self, id: i64) -> AppResult<bool>;
    fn delete_by_id(&self, id: i64) -> AppResult<()>;
    fn count(&self) -> AppResult<i64>;

    /// Case-insensitive substring match on the name
    fn find_by_name_containing_ignore_case(&self, name: &str) -> AppResult<Vec<Coffee>>;

    fn find_by_size_and_price_greater_than(
        &self,
        size: Size,
        price: &BigDecimal,
    ) -> AppResult<Vec<Coffee>>;

    /// Coffees of `size` costing at most `max_price`, most expensive first
    fn find_affordable_coffees_by_size(
        &self,
        size: &str,
        max_price: &BigDecimal,
    ) -> AppResult<Vec<Coffee>>;
}

pub struct SqliteCoffeeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCoffeeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_coffee(row: &Row) -> Result<Coffee, rusqlite::Error> {
        Ok(Coffee {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            description: row.get("description")?,
            price: decimal_column(row, "price")?,
            size: enum_column(row, "size")?,
        })
    }
}

/// Escape LIKE wildcards so user input only ever matches literally
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl CoffeeRepository for SqliteCoffeeRepository {
    fn save(&self, coffee: &Coffee) -> AppResult<Coffee> {
        let conn = self.pool.get()?;

        match coffee.id {
            None => {
                conn.execute(
                    "INSERT INTO coffee (name, description, price, size)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        coffee.name,
                        coffee.description,
                        decimal_param(&coffee.price),
                        coffee.size.as_str(),
                    ],
                )?;
                Ok(coffee.clone().with_id(conn.last_insert_rowid()))
            }
            Some(id) => {
                let rows_affected = conn.execute(
                    "UPDATE coffee SET name = ?1, description = ?2, price = ?3, size = ?4
                     WHERE id = ?5",
                    params![
                        coffee.name,
                        coffee.description,
                        decimal_param(&coffee.price),
                        coffee.size.as_str(),
                        id,
                    ],
                )?;
                if rows_affected == 0 {
                    return Err(AppError::not_found(format!("Coffee {}", id)));
                }
                Ok(coffee.clone())
            }
        }
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Coffee>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, price, size FROM coffee WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_coffee) {
            Ok(coffee) => Ok(Some(coffee)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_all(&self) -> AppResult<Vec<Coffee>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, name, description, price, size FROM coffee ORDER BY id")?;

        let coffees = stmt
            .query_map([], Self::row_to_coffee)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(coffees)
    }

    fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM coffee WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM coffee WHERE id = ?1", params![id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found(format!("Coffee {}", id)));
        }

        Ok(())
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let count = conn.query_row("SELECT COUNT(*) FROM coffee", [], |row| row.get(0))?;
        Ok(count)
    }

    fn find_by_name_containing_ignore_case(&self, name: &str) -> AppResult<Vec<Coffee>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, price, size FROM coffee
             WHERE UPPER(name) LIKE UPPER(?1) ESCAPE '\\'
             ORDER BY id",
        )?;

        let coffees = stmt
            .query_map(params![like_pattern(name)], Self::row_to_coffee)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(coffees)
    }

    fn find_by_size_and_price_greater_than(
        &self,
        size: Size,
        price: &BigDecimal,
    ) -> AppResult<Vec<Coffee>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, price, size FROM coffee
             WHERE size = ?1 AND price > ?2
             ORDER BY id",
        )?;

        let coffees = stmt
            .query_map(
                params![size.as_str(), decimal_param(price)],
                Self::row_to_coffee,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(coffees)
    }

    fn find_affordable_coffees_by_size(
        &self,
        size: &str,
        max_price: &BigDecimal,
    ) -> AppResult<Vec<Coffee>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_AFFORDABLE_COFFEES_BY_SIZE)?;

        let coffees = stmt
            .query_map(
                named_params! { ":size": size, ":maxPrice": decimal_param(max_price) },
                Self::row_to_coffee,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(coffees)
    }
}
