//! Process-wide settings read from environment variables.
//!
//! Each variable is read once, on first use. Invalid values print a message to *stderr* and exit
//! the process.

use std::{
    env::{self, VarError},
    process,
};

use keanu_linalg::Order;
use once_cell::sync::Lazy;

const DEFAULT_ORDER: Order = Order::RowMajor;

static PREFERRED_ORDER: Lazy<Order> = Lazy::new(|| {
    let order = match env::var("KEANU_ORDER") {
        Ok(v) => match parse_order(&v) {
            Some(order) => order,
            None => {
                eprintln!("invalid value set for `KEANU_ORDER` variable: '{v}'; exiting");
                process::exit(1);
            }
        },
        Err(VarError::NotPresent) => DEFAULT_ORDER,
        Err(VarError::NotUnicode(s)) => {
            eprintln!(
                "invalid value set for `KEANU_ORDER` variable: {}; exiting",
                s.to_string_lossy()
            );
            process::exit(1);
        }
    };
    log::debug!("preferred storage order: {order}");
    order
});

fn parse_order(value: &str) -> Option<Order> {
    match value {
        "row-major" => Some(Order::RowMajor),
        "column-major" => Some(Order::ColumnMajor),
        _ => None,
    }
}

/// Returns the storage order selected by the `KEANU_ORDER` environment variable.
///
/// Defaults to [`Order::RowMajor`] when the variable is unset.
pub fn preferred_order() -> Order {
    *PREFERRED_ORDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(parse_order("row-major"), Some(Order::RowMajor));
        assert_eq!(parse_order("column-major"), Some(Order::ColumnMajor));
        assert_eq!(parse_order("ColumnMajor"), None);
        assert_eq!(parse_order(""), None);
    }

    #[test]
    fn names_round_trip() {
        for order in [Order::RowMajor, Order::ColumnMajor] {
            assert_eq!(parse_order(&order.to_string()), Some(order));
        }
    }
}
