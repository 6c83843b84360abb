// src/services/coffee_service.rs
use crate::domain::coffee::{validate_coffee, Coffee, Size};
use crate::error::{AppError, AppResult};
use crate::repositories::CoffeeRepository;
use bigdecimal::BigDecimal;
use std::sync::Arc;

/// Fields of a coffee as supplied by a caller; used for create and full update
#[derive(Debug, Clone)]
pub struct CoffeeRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub size: Size,
}

impl CoffeeRequest {
    fn into_coffee(self) -> Coffee {
        Coffee::new(self.name, self.description, self.price, self.size)
    }
}

pub struct CoffeeService {
    coffee_repo: Arc<dyn CoffeeRepository>,
}

impl CoffeeService {
    pub fn new(coffee_repo: Arc<dyn CoffeeRepository>) -> Self {
        Self { coffee_repo }
    }

    pub fn list_coffees(&self) -> AppResult<Vec<Coffee>> {
        self.coffee_repo.find_all()
    }

    pub fn get_coffee(&self, id: i64) -> AppResult<Option<Coffee>> {
        self.coffee_repo.find_by_id(id)
    }

    pub fn search_by_name(&self, pattern: &str) -> AppResult<Vec<Coffee>> {
        self.coffee_repo.find_by_name_containing_ignore_case(pattern)
    }

    /// Coffees of `size` priced strictly above `min_price`
    pub fn filter_by_size_and_min_price(
        &self,
        size: Size,
        min_price: &BigDecimal,
    ) -> AppResult<Vec<Coffee>> {
        self.coffee_repo
            .find_by_size_and_price_greater_than(size, min_price)
    }

    /// Coffees of `size` priced at most `max_price`, most expensive first
    pub fn affordable(&self, size: Size, max_price: &BigDecimal) -> AppResult<Vec<Coffee>> {
        self.coffee_repo
            .find_affordable_coffees_by_size(size.as_str(), max_price)
    }

    pub fn create_coffee(&self, request: CoffeeRequest) -> AppResult<Coffee> {
        let coffee = request.into_coffee();

        validate_coffee(&coffee).map_err(AppError::Domain)?;
        let saved = self.coffee_repo.save(&coffee)?;

        tracing::info!(id = ?saved.id, name = %saved.name, "coffee created");
        Ok(saved)
    }

    /// Replace every field of an existing coffee
    pub fn update_coffee(&self, id: i64, request: CoffeeRequest) -> AppResult<Coffee> {
        if !self.coffee_repo.exists_by_id(id)? {
            return Err(AppError::not_found(format!("Coffee {}", id)));
        }

        let coffee = request.into_coffee().with_id(id);

        validate_coffee(&coffee).map_err(AppError::Domain)?;
        let saved = self.coffee_repo.save(&coffee)?;

        tracing::info!(id, "coffee updated");
        Ok(saved)
    }

    pub fn delete_coffee(&self, id: i64) -> AppResult<()> {
        self.coffee_repo.delete_by_id(id)?;
        tracing::info!(id, "coffee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::coffee_repository::MockCoffeeRepository;
    use mockall::predicate::eq;
    use std::str::FromStr;

    fn request(name: &str, price: &str) -> CoffeeRequest {
        CoffeeRequest {
            name: name.to_string(),
            description: None,
            price: BigDecimal::from_str(price).unwrap(),
            size: Size::Medium,
        }
    }

    #[test]
    fn test_create_coffee_saves_valid_coffee() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_save()
            .withf(|c| c.id.is_none() && c.name == "Cortado" && c.price.to_string() == "3.70")
            .times(1)
            .returning(|c| Ok(c.clone().with_id(13)));

        let service = CoffeeService::new(Arc::new(repo));
        let saved = service.create_coffee(request("Cortado", "3.7")).unwrap();

        assert_eq!(saved.id, Some(13));
    }

    #[test]
    fn test_create_coffee_rejects_negative_price() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_save().never();

        let service = CoffeeService::new(Arc::new(repo));
        let result = service.create_coffee(request("Cortado", "-1"));

        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_update_missing_coffee_is_not_found() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_exists_by_id().with(eq(77)).returning(|_| Ok(false));
        repo.expect_save().never();

        let service = CoffeeService::new(Arc::new(repo));
        let result = service.update_coffee(77, request("Cortado", "3.70"));

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_exists_by_id().with(eq(3)).returning(|_| Ok(true));
        repo.expect_save()
            .withf(|c| c.id == Some(3))
            .returning(|c| Ok(c.clone()));

        let service = CoffeeService::new(Arc::new(repo));
        let saved = service.update_coffee(3, request("Long Black", "3.10")).unwrap();

        assert_eq!(saved.id, Some(3));
        assert_eq!(saved.name, "Long Black");
    }

    #[test]
    fn test_affordable_passes_size_name() {
        let mut repo = MockCoffeeRepository::new();
        repo.expect_find_affordable_coffees_by_size()
            .withf(|size, max| size == "LARGE" && max.to_string() == "6.00")
            .returning(|_, _| Ok(vec![]));

        let service = CoffeeService::new(Arc::new(repo));
        let max = BigDecimal::from_str("6.00").unwrap();

        assert!(service.affordable(Size::Large, &max).unwrap().is_empty());
    }
}
