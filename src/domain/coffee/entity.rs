use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{to_money, DomainError};

/// A drink on the menu, sold in one cup size at one price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coffee {
    /// Database identity, `None` until first saved
    pub id: Option<i64>,

    /// Display name ("Caffe Latte")
    pub name: String,

    pub description: Option<String>,

    /// Unit price, two decimal places
    pub price: BigDecimal,

    pub size: Size,
}

/// Cup size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Coffee {
    /// Create an unsaved Coffee
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: BigDecimal,
        size: Size,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price: to_money(price),
            size,
        }
    }

    /// Same coffee with a fixed identity, used for updates
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "SMALL",
            Size::Medium => "MEDIUM",
            Size::Large => "LARGE",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SMALL" => Ok(Size::Small),
            "MEDIUM" => Ok(Size::Medium),
            "LARGE" => Ok(Size::Large),
            other => Err(DomainError::UnknownValue {
                kind: "size",
                value: other.to_string(),
            }),
        }
    }
}
