//! Sort options for queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn is_ascending(&self) -> bool {
        matches!(self, Direction::Asc)
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Parse a direction case-insensitively ("asc", "DESC", ...)
    pub fn parse(value: &str) -> Option<Direction> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A single ordering instruction: a property and a direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    #[serde(default)]
    pub direction: Direction,
}

impl Order {
    pub fn new(direction: Direction, property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(Direction::Asc, property)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(Direction::Desc, property)
    }

    /// Same property, opposite direction
    pub fn reversed(&self) -> Self {
        let direction = match self.direction {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        };
        Self::new(direction, self.property.clone())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction.as_str())
    }
}

/// An ordered list of [`Order`]s. An empty sort is "unsorted".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Ascending sort over the given properties, in order
    pub fn by<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            orders: properties.into_iter().map(Order::asc).collect(),
        }
    }

    pub fn by_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Append the orders of `other` after this sort's orders
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// Flip every order to descending
    pub fn descending(self) -> Self {
        self.with_direction(Direction::Desc)
    }

    /// Flip every order to ascending
    pub fn ascending(self) -> Self {
        self.with_direction(Direction::Asc)
    }

    fn with_direction(self, direction: Direction) -> Self {
        Self {
            orders: self
                .orders
                .into_iter()
                .map(|o| Order::new(direction, o.property))
                .collect(),
        }
    }

    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// The order registered for `property`, if any
    pub fn order_for(&self, property: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.property == property)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unsorted() {
            return write!(f, "UNSORTED");
        }
        let parts: Vec<String> = self.orders.iter().map(|o| o.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("asc"), Some(Direction::Asc));
        assert_eq!(Direction::parse("DESC"), Some(Direction::Desc));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn test_sort_by_is_ascending() {
        let sort = Sort::by(["name", "age"]);
        assert!(sort.is_sorted());
        assert_eq!(sort.orders().len(), 2);
        assert!(sort.iter().all(|o| o.direction.is_ascending()));
    }

    #[test]
    fn test_sort_and_keeps_order() {
        let sort = Sort::by(["name"]).and(Sort::by_orders(vec![Order::desc("age")]));
        let props: Vec<&str> = sort.iter().map(|o| o.property.as_str()).collect();
        assert_eq!(props, vec!["name", "age"]);
        assert_eq!(sort.order_for("age").unwrap().direction, Direction::Desc);
        assert!(sort.order_for("missing").is_none());
    }

    #[test]
    fn test_sort_descending() {
        let sort = Sort::by(["name"]).descending();
        assert!(sort.order_for("name").unwrap().direction.is_descending());
    }

    #[test]
    fn test_sort_display() {
        assert_eq!(Sort::unsorted().to_string(), "UNSORTED");
        let sort = Sort::by_orders(vec![Order::asc("name"), Order::desc("age")]);
        assert_eq!(sort.to_string(), "name: ASC,age: DESC");
    }

    #[test]
    fn test_order_reversed() {
        let order = Order::asc("name").reversed();
        assert_eq!(order, Order::desc("name"));
    }
}
