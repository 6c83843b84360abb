// src/services/order_service.rs
use crate::domain::order::{
    validate_order, validate_order_item, Order, OrderItem, OrderStatus,
};
use crate::domain::Coffee;
use crate::error::{AppError, AppResult};
use crate::repositories::{CoffeeRepository, OrderItemRepository, OrderRepository};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub customer_id: i64,
    pub customer_name: String,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Copy)]
pub struct OrderLineRequest {
    pub coffee_id: i64,
    pub quantity: i32,
}

/// An order together with its line items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

pub struct OrderService {
    order_repo: Arc<dyn OrderRepository>,
    item_repo: Arc<dyn OrderItemRepository>,
    coffee_repo: Arc<dyn CoffeeRepository>,
}

impl OrderService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        item_repo: Arc<dyn OrderItemRepository>,
        coffee_repo: Arc<dyn CoffeeRepository>,
    ) -> Self {
        Self {
            order_repo,
            item_repo,
            coffee_repo,
        }
    }

    pub fn list_orders(&self) -> AppResult<Vec<Order>> {
        self.order_repo.find_all()
    }

    pub fn get_order(&self, id: i64) -> AppResult<Option<OrderWithItems>> {
        let Some(order) = self.order_repo.find_by_id(id)? else {
            return Ok(None);
        };
        let items = self.item_repo.find_by_order_id(id)?;

        Ok(Some(OrderWithItems { order, items }))
    }

    pub fn orders_for_customer(&self, customer_name: &str) -> AppResult<Vec<Order>> {
        self.order_repo.find_by_customer_name(customer_name)
    }

    pub fn recent_orders(
        &self,
        status: OrderStatus,
        since: NaiveDateTime,
    ) -> AppResult<Vec<Order>> {
        self.order_repo
            .find_by_status_and_order_date_after(status, since)
    }

    pub fn orders_containing(&self, coffee_name: &str) -> AppResult<Vec<Order>> {
        self.order_repo.find_orders_by_coffee_name(coffee_name)
    }

    /// Place a new PENDING order.
    ///
    /// Every referenced coffee must exist. Items capture the coffee's current
    /// price and the order total is the sum of price * quantity. If the items
    /// cannot be stored the order row is removed again.
    pub fn create_order(&self, request: CreateOrderRequest) -> AppResult<OrderWithItems> {
        if request.items.is_empty() {
            return Err(AppError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }

        let priced = request
            .items
            .iter()
            .map(|line| {
                self.require_coffee(line.coffee_id)
                    .map(|coffee| (*line, coffee))
            })
            .collect::<AppResult<Vec<(OrderLineRequest, Coffee)>>>()?;

        let total = priced
            .iter()
            .map(|(line, coffee)| &coffee.price * &BigDecimal::from(line.quantity))
            .fold(BigDecimal::from(0), |acc, line_total| acc + line_total);

        let order = Order::new(
            request.customer_id,
            request.customer_name,
            total,
            OrderStatus::Pending,
        );
        validate_order(&order).map_err(AppError::Domain)?;

        // Validate lines against a placeholder order id before anything is written
        let mut items = priced
            .iter()
            .map(|(line, coffee)| OrderItem::new(0, line.coffee_id, line.quantity, coffee.price.clone()))
            .collect::<Vec<_>>();
        for item in &items {
            validate_order_item(item).map_err(AppError::Domain)?;
        }

        let saved_order = self.order_repo.save(&order)?;
        let order_id = saved_order
            .id
            .ok_or_else(|| AppError::Other("saved order has no id".to_string()))?;

        for item in &mut items {
            item.order_id = order_id;
        }

        let saved_items = match self.item_repo.save_all(&items) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(order_id, error = %e, "order items failed; removing order");
                if let Err(cleanup) = self.order_repo.delete_by_id(order_id) {
                    tracing::error!(order_id, error = %cleanup, "could not remove order after item failure");
                }
                return Err(e);
            }
        };

        tracing::info!(
            order_id,
            customer = %saved_order.customer_name,
            total = %saved_order.total_amount,
            items = saved_items.len(),
            "order created"
        );

        Ok(OrderWithItems {
            order: saved_order,
            items: saved_items,
        })
    }

    pub fn update_status(&self, id: i64, status: OrderStatus) -> AppResult<Order> {
        let existing = self
            .order_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

        let updated = self.order_repo.save(&existing.with_status(status))?;

        tracing::info!(id, from = %existing.status, to = %status, "order status changed");
        Ok(updated)
    }

    /// Remove an order; its items are removed by the database
    pub fn delete_order(&self, id: i64) -> AppResult<()> {
        self.order_repo.delete_by_id(id)?;
        tracing::info!(id, "order deleted");
        Ok(())
    }

    fn require_coffee(&self, coffee_id: i64) -> AppResult<Coffee> {
        self.coffee_repo
            .find_by_id(coffee_id)?
            .ok_or_else(|| AppError::Validation(format!("Coffee not found: {}", coffee_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Size;
    use crate::repositories::coffee_repository::MockCoffeeRepository;
    use crate::repositories::order_item_repository::MockOrderItemRepository;
    use crate::repositories::order_repository::MockOrderRepository;
    use mockall::predicate::eq;
    use std::str::FromStr;

    fn money(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).unwrap()
    }

    fn coffees() -> MockCoffeeRepository {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok(match id {
                1 => Some(Coffee::new("Espresso", None, money("2.50"), Size::Small).with_id(1)),
                4 => Some(Coffee::new("Cappuccino", None, money("4.25"), Size::Medium).with_id(4)),
                _ => None,
            })
        });
        repo
    }

    fn service(
        orders: MockOrderRepository,
        items: MockOrderItemRepository,
        coffees: MockCoffeeRepository,
    ) -> OrderService {
        OrderService::new(Arc::new(orders), Arc::new(items), Arc::new(coffees))
    }

    fn request(lines: &[(i64, i32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: 101,
            customer_name: "Alice Johnson".to_string(),
            items: lines
                .iter()
                .map(|&(coffee_id, quantity)| OrderLineRequest { coffee_id, quantity })
                .collect(),
        }
    }

    #[test]
    fn test_create_order_totals_and_prices_items() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_save()
            .withf(|o| {
                o.id.is_none()
                    && o.status == OrderStatus::Pending
                    && o.total_amount.to_string() == "11.75"
            })
            .times(1)
            .returning(|o| {
                Ok(Order {
                    id: Some(6),
                    ..o.clone()
                })
            });

        let mut items = MockOrderItemRepository::new();
        items
            .expect_save_all()
            .withf(|items| items.len() == 2 && items.iter().all(|i| i.order_id == 6))
            .times(1)
            .returning(|items| {
                Ok(items
                    .iter()
                    .enumerate()
                    .map(|(n, i)| OrderItem {
                        id: Some(n as i64 + 8),
                        ..i.clone()
                    })
                    .collect())
            });

        let created = service(orders, items, coffees())
            .create_order(request(&[(1, 3), (4, 1)]))
            .unwrap();

        assert_eq!(created.order.id, Some(6));
        assert_eq!(created.items[0].unit_price.to_string(), "2.50");
        assert_eq!(created.items[1].unit_price.to_string(), "4.25");
    }

    #[test]
    fn test_create_order_with_unknown_coffee_writes_nothing() {
        let mut orders = MockOrderRepository::new();
        orders.expect_save().never();
        let mut items = MockOrderItemRepository::new();
        items.expect_save_all().never();

        let result = service(orders, items, coffees()).create_order(request(&[(1, 1), (42, 1)]));

        match result {
            Err(AppError::Validation(message)) => assert_eq!(message, "Coffee not found: 42"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_order_requires_items() {
        let result = service(
            MockOrderRepository::new(),
            MockOrderItemRepository::new(),
            MockCoffeeRepository::new(),
        )
        .create_order(request(&[]));

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_order_rejects_non_positive_quantity() {
        let mut orders = MockOrderRepository::new();
        orders.expect_save().never();

        let result = service(orders, MockOrderItemRepository::new(), coffees())
            .create_order(request(&[(1, 0)]));

        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_failed_items_remove_the_order() {
        let mut orders = MockOrderRepository::new();
        orders.expect_save().returning(|o| {
            Ok(Order {
                id: Some(9),
                ..o.clone()
            })
        });
        orders
            .expect_delete_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(()));

        let mut items = MockOrderItemRepository::new();
        items
            .expect_save_all()
            .returning(|_| Err(AppError::Pool("connection lost".to_string())));

        let result = service(orders, items, coffees()).create_order(request(&[(1, 1)]));

        assert!(matches!(result, Err(AppError::Pool(_))));
    }

    #[test]
    fn test_failed_cleanup_keeps_the_item_error() {
        let mut orders = MockOrderRepository::new();
        orders.expect_save().returning(|o| {
            Ok(Order {
                id: Some(9),
                ..o.clone()
            })
        });
        orders
            .expect_delete_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let mut items = MockOrderItemRepository::new();
        items
            .expect_save_all()
            .returning(|_| Err(AppError::Pool("connection lost".to_string())));

        let result = service(orders, items, coffees()).create_order(request(&[(1, 1)]));

        match result {
            Err(AppError::Pool(message)) => assert_eq!(message, "connection lost"),
            other => panic!("expected the item error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_status_preserves_order_fields() {
        let existing = Order {
            id: Some(3),
            ..Order::new(101, "Alice Johnson", money("12.50"), OrderStatus::Pending)
        };
        let stored = existing.clone();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .with(eq(3))
            .returning(move |_| Ok(Some(stored.clone())));
        orders
            .expect_save()
            .withf(|o| o.status == OrderStatus::Ready && o.id == Some(3))
            .returning(|o| Ok(o.clone()));

        let updated = service(orders, MockOrderItemRepository::new(), MockCoffeeRepository::new())
            .update_status(3, OrderStatus::Ready)
            .unwrap();

        assert_eq!(updated.total_amount, existing.total_amount);
        assert_eq!(updated.order_date, existing.order_date);
    }

    #[test]
    fn test_update_status_of_missing_order_is_not_found() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|_| Ok(None));

        let result = service(orders, MockOrderItemRepository::new(), MockCoffeeRepository::new())
            .update_status(99, OrderStatus::Ready);

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_get_order_includes_items() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|id| {
            Ok(Some(Order {
                id: Some(id),
                ..Order::new(102, "Bob Smith", money("9.50"), OrderStatus::Ready)
            }))
        });
        let mut items = MockOrderItemRepository::new();
        items
            .expect_find_by_order_id()
            .with(eq(2))
            .returning(|id| Ok(vec![OrderItem::new(id, 9, 2, money("4.75"))]));

        let found = service(orders, items, MockCoffeeRepository::new())
            .get_order(2)
            .unwrap()
            .unwrap();

        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].line_total().to_string(), "9.50");
    }
}
