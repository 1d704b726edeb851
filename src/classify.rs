//! Number classification predicates
//!
//! Pure, total functions over a single `i64`:
//! - `is_prime`: Trial division by odd candidates up to the square root
//! - `is_perfect`: Sum of proper divisors equals the number
//! - `is_armstrong`: Sum of digits raised to the digit count equals the number
//! - `digit_sum`: Sum of the decimal digits of the magnitude
//! - `properties`: Ordered property flags (`armstrong` before parity)
//!
//! # Examples
//!
//! ```
//! use number_classifier::classify::{Classification, Property};
//!
//! let c = Classification::of(371);
//! assert!(!c.is_prime);
//! assert_eq!(c.properties, vec![Property::Armstrong, Property::Odd]);
//! assert_eq!(c.digit_sum, 11);
//! ```

use serde::Serialize;
use std::fmt;

/// A flag reported in the `properties` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Armstrong,
    Even,
    Odd,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Armstrong => "armstrong",
            Property::Even => "even",
            Property::Odd => "odd",
        };
        f.write_str(name)
    }
}

/// Everything computed locally for a number (the fun fact comes from elsewhere)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u64,
}

impl Classification {
    pub fn of(number: i64) -> Self {
        Self {
            number,
            is_prime: is_prime(number),
            is_perfect: is_perfect(number),
            properties: properties(number),
            digit_sum: digit_sum(number),
        }
    }
}

/// Pure: Primality by trial division
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let n = n as u64;
    let mut i: u64 = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Pure: Sum of proper divisors equals `n`
pub fn is_perfect(n: i64) -> bool {
    if n <= 1 {
        return false;
    }

    let n = n as u64;
    // divisor 1 is counted up front
    let mut sum: u128 = 1;
    let mut i: u64 = 2;
    while i * i <= n {
        if n % i == 0 {
            sum += u128::from(i);
            let complement = n / i;
            if complement != i {
                sum += u128::from(complement);
            }
        }
        i += 1;
    }
    sum == u128::from(n)
}

/// Pure: Armstrong (narcissistic) number test; negatives never qualify
pub fn is_armstrong(n: i64) -> bool {
    if n < 0 {
        return false;
    }

    let digits = decimal_digits(n.unsigned_abs());
    let power = digits.len() as u32;
    // 19 digits of 9^19 overflow u64
    let total: u128 = digits.iter().map(|&d| u128::from(d).pow(power)).sum();
    total == n as u128
}

/// Pure: Sum of the decimal digits of `|n|`
pub fn digit_sum(n: i64) -> u64 {
    decimal_digits(n.unsigned_abs()).iter().sum()
}

/// Pure: `Even` or `Odd`
pub fn parity(n: i64) -> Property {
    if n % 2 == 0 {
        Property::Even
    } else {
        Property::Odd
    }
}

/// Pure: Property flags in reporting order
pub fn properties(n: i64) -> Vec<Property> {
    let mut props = Vec::with_capacity(2);
    if is_armstrong(n) {
        props.push(Property::Armstrong);
    }
    props.push(parity(n));
    props
}

fn decimal_digits(mut value: u64) -> Vec<u64> {
    if value == 0 {
        return vec![0];
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(value % 10);
        value /= 10;
    }
    digits.reverse();
    digits
}
