use crate::{address_range, AddressRange};
use std::cmp::Ordering;
use thiserror::Error;

/// Generic map of 32-bit address ranges to values of type `T`.
///
/// The ranges cannot overlap. Entries may be added one at a time via [`AddressMap::insert`], or
/// all at once via [`TryFrom<Vec<(AddressRange, T)>>`].
#[derive(Debug)]
pub struct AddressMap<T> {
    ordered_ranges: Vec<(AddressRange, T)>,
}

impl<T> Default for AddressMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AddressMap<T> {
    /// Create new empty map.
    pub fn new() -> Self {
        Self {
            ordered_ranges: Vec::new(),
        }
    }

    /// Insert a new `(range, value)` binding, failing if `range` overlaps an existing one.
    ///
    /// On failure, the existing range it collided with is returned alongside the error.
    pub fn insert(&mut self, range: AddressRange, value: T) -> Result<(), OverlapError> {
        let index = self
            .ordered_ranges
            .partition_point(|(existing, _)| existing.start() < range.start());

        if let Some((existing, _)) = self.ordered_ranges.get(index) {
            if existing.overlaps(range) {
                return Err(OverlapError {
                    new: range,
                    existing: *existing,
                });
            }
        }
        if index > 0 {
            if let Some((existing, _)) = self.ordered_ranges.get(index - 1) {
                if existing.overlaps(range) {
                    return Err(OverlapError {
                        new: range,
                        existing: *existing,
                    });
                }
            }
        }

        self.ordered_ranges.insert(index, (range, value));
        Ok(())
    }

    /// Returns the address range that contains `address`.
    ///
    /// Note that even if `address` maps to a vacant region, that region's range will be returned.
    pub fn range(&self, address: u32) -> AddressRange {
        self.range_value(address).0
    }

    /// Returns the value that the address range containing `address` maps to, or `None` if that
    /// address range is vacant.
    pub fn value(&self, address: u32) -> Option<&T> {
        self.range_value(address).1
    }

    /// Returns the address range that contains `address`, and the value that it maps to.
    ///
    /// The second item will be `None` if `address` is in a vacant region.
    pub fn range_value(&self, address: u32) -> (AddressRange, Option<&T>) {
        match self.ordered_ranges.binary_search_by(|(range, _)| {
            if address < range.start() {
                Ordering::Less
            } else if address <= range.end() {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }) {
            Ok(index) => {
                let (range, value) = &self.ordered_ranges[index];
                (*range, Some(value))
            }
            Err(index) => {
                let start = index
                    .checked_sub(1)
                    .and_then(|i| self.ordered_ranges.get(i))
                    // Guaranteed not to overflow: that would mean `range.end() == u32::MAX`,
                    // which is impossible since `address > range.end()` per the binary search.
                    .map(|(range, _)| range.end() + 1)
                    .unwrap_or(0);
                let end = self
                    .ordered_ranges
                    .get(index)
                    // Guaranteed not to underflow: that would mean `range.start() == 0`, which
                    // is impossible since `address < range.start()` per the binary search.
                    .map(|(range, _)| range.start() - 1)
                    .unwrap_or(u32::MAX);
                (address_range![start, end], None)
            }
        }
    }
}

impl<T> TryFrom<Vec<(AddressRange, T)>> for AddressMap<T> {
    type Error = OverlapError;

    fn try_from(value: Vec<(AddressRange, T)>) -> Result<Self, Self::Error> {
        let mut map = Self::new();
        for (range, value) in value {
            map.insert(range, value)?;
        }
        Ok(map)
    }
}

#[derive(Error, Debug, Clone)]
#[error("address range {new} overlaps with previously added range {existing}")]
pub struct OverlapError {
    pub new: AddressRange,
    pub existing: AddressRange,
}

#[macro_export]
macro_rules! addr_map {
    ($([$start:expr, $end:expr] => $value:expr,)*) => {
        $crate::address_map::AddressMap::try_from(vec![
            $(($crate::address_range![$start, $end], $value)),*
        ]).unwrap()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_the_containing_range() {
        let map = addr_map! {
            [0x0000, 0x0fff] => "low",
            [0x1000, 0x1fff] => "high",
        };
        assert_eq!(map.value(0x0500), Some(&"low"));
        assert_eq!(map.value(0x1500), Some(&"high"));
        assert_eq!(map.value(0x2000), None);
    }

    #[test]
    fn insert_rejects_overlap() {
        let mut map = AddressMap::new();
        map.insert(address_range![0x0000, 0x0fff], "low").unwrap();
        let err = map.insert(address_range![0x0fff, 0x1fff], "high").unwrap_err();
        assert_eq!(err.existing, address_range![0x0000, 0x0fff]);
    }

    #[test]
    fn insert_allows_adjacent_ranges() {
        let mut map = AddressMap::new();
        map.insert(address_range![0x0000, 0x0fff], "low").unwrap();
        map.insert(address_range![0x1000, 0x1fff], "high").unwrap();
        assert_eq!(map.value(0x0fff), Some(&"low"));
        assert_eq!(map.value(0x1000), Some(&"high"));
    }
}
