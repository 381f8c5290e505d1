// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Sums `amount` per `key`, keeping keys in the order they were first seen.
pub fn group_sum<T, K, FK, FA>(items: &[T], key: FK, amount: FA) -> Vec<(K, Decimal)>
where
    K: Eq + Hash + Clone,
    FK: Fn(&T) -> K,
    FA: Fn(&T) -> Decimal,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, Decimal)> = Vec::new();
    for item in items {
        let k = key(item);
        let amt = amount(item);
        match index.get(&k) {
            Some(&i) => out[i].1 += amt,
            None => {
                index.insert(k.clone(), out.len());
                out.push((k, amt));
            }
        }
    }
    out
}

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month <= 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }

    /// First and last calendar day of the month.
    pub fn bounds(self) -> Option<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((first, next.pred_opt()?))
    }

    pub fn label(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// The `n` months ending at (and including) the month of `reference`, oldest first.
    pub fn trailing(reference: NaiveDate, n: usize) -> Vec<MonthKey> {
        let mut keys = Vec::with_capacity(n);
        let mut cur = Self::of(reference);
        for _ in 0..n {
            keys.push(cur);
            cur = cur.prev();
        }
        keys.reverse();
        keys
    }

    /// January through December of `year`.
    pub fn year(year: i32) -> Vec<MonthKey> {
        (1..=12).map(|m| Self::new(year, m)).collect()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
