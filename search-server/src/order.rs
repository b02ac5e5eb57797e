//! Sort fields and directions for search results.
//!
//! Every field a client may name is an `OrderField` variant. Sortable fields
//! map to a fixed comparator; the rest are recognised but refused.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::dataset::User;

type Comparator = fn(&User, &User) -> Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Age,
    Name,
    About,
    Gender,
}

impl OrderField {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderField::Id => "Id",
            OrderField::Age => "Age",
            OrderField::Name => "Name",
            OrderField::About => "About",
            OrderField::Gender => "Gender",
        }
    }

    pub fn is_sortable(self) -> bool {
        self.comparator().is_some()
    }

    fn comparator(self) -> Option<Comparator> {
        match self {
            OrderField::Id => Some(by_id as Comparator),
            OrderField::Age => Some(by_age as Comparator),
            OrderField::Name => Some(by_name as Comparator),
            OrderField::About | OrderField::Gender => None,
        }
    }
}

fn by_id(a: &User, b: &User) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_age(a: &User, b: &User) -> Ordering {
    a.age.cmp(&b.age)
}

fn by_name(a: &User, b: &User) -> Ordering {
    a.name.cmp(&b.name)
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The name did not match any known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl FromStr for OrderField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Id" => Ok(OrderField::Id),
            "Age" => Ok(OrderField::Age),
            "Name" => Ok(OrderField::Name),
            "About" => Ok(OrderField::About),
            "Gender" => Ok(OrderField::Gender),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    Asc,
    #[default]
    AsIs,
    Desc,
}

impl OrderBy {
    /// Codes other than -1 and 1 leave the records in dataset order.
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => OrderBy::Asc,
            1 => OrderBy::Desc,
            _ => OrderBy::AsIs,
        }
    }
}

/// Stable sort, so ties keep dataset order.
pub fn sort_users(users: &mut [User], field: OrderField, order_by: OrderBy) {
    let Some(cmp) = field.comparator() else {
        return;
    };
    match order_by {
        OrderBy::Asc => users.sort_by(cmp),
        OrderBy::Desc => users.sort_by(|a, b| cmp(b, a)),
        OrderBy::AsIs => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, age: i64) -> User {
        User {
            id,
            name: name.to_string(),
            age,
            about: String::new(),
            gender: "female".to_string(),
        }
    }

    fn sample() -> Vec<User> {
        vec![user(2, "Cara", 40), user(0, "Abe", 25), user(1, "Bea", 33)]
    }

    fn ids(users: &[User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn parses_known_fields() {
        assert_eq!("Age".parse::<OrderField>(), Ok(OrderField::Age));
        assert_eq!(
            "age".parse::<OrderField>(),
            Err(UnknownField("age".to_string()))
        );
    }

    #[test]
    fn only_id_age_name_are_sortable() {
        assert!(OrderField::Id.is_sortable());
        assert!(OrderField::Age.is_sortable());
        assert!(OrderField::Name.is_sortable());
        assert!(!OrderField::About.is_sortable());
        assert!(!OrderField::Gender.is_sortable());
    }

    #[test]
    fn sorts_numeric_fields_numerically() {
        let mut users = sample();
        sort_users(&mut users, OrderField::Age, OrderBy::Asc);
        assert_eq!(ids(&users), vec![0, 1, 2]);
        sort_users(&mut users, OrderField::Id, OrderBy::Desc);
        assert_eq!(ids(&users), vec![2, 1, 0]);
    }

    #[test]
    fn sorts_names_lexicographically() {
        let mut users = sample();
        sort_users(&mut users, OrderField::Name, OrderBy::Desc);
        assert_eq!(ids(&users), vec![2, 1, 0]);
    }

    #[test]
    fn as_is_keeps_order() {
        let mut users = sample();
        sort_users(&mut users, OrderField::Age, OrderBy::AsIs);
        assert_eq!(ids(&users), vec![2, 0, 1]);
        assert_eq!(OrderBy::from_code(7), OrderBy::AsIs);
    }
}
