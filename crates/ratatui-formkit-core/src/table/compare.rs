use crate::table::sort::SortDirection;
use crate::table::value::Record;
use crate::table::value::ValueRef;
use std::cmp::Ordering;

/// Compares the `key` field of two rows for display ordering.
pub fn compare_rows<R: Record>(a: &R, b: &R, key: &str, direction: SortDirection) -> Ordering {
    compare_values(a.field(key), b.field(key), direction)
}

/// Compares two cell values.
///
/// Missing values, nulls, and NaN always sort after present ones, in both directions. Everything
/// else is compared ascending and then flipped for [`SortDirection::Descending`]: values rank by
/// kind first (numbers, then booleans, then text), numbers compare numerically across `Int` and
/// `Float`, and two texts compare with [`locale_cmp`]. The result is a total order for any mix of
/// values, which `sort_by` requires.
pub fn compare_values(
    a: Option<ValueRef<'_>>,
    b: Option<ValueRef<'_>>,
    direction: SortDirection,
) -> Ordering {
    let (a, b) = match (a.and_then(SortKey::of), b.and_then(SortKey::of)) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let ord = match (a, b) {
        // Never NaN here, so `partial_cmp` always answers.
        (SortKey::Number(x), SortKey::Number(y)) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => locale_cmp(x, y),
        (a, b) => a.rank().cmp(&b.rank()),
    };

    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// A present value reduced to what ordering looks at.
#[derive(Clone, Copy)]
enum SortKey<'a> {
    Number(f64),
    Bool(bool),
    Text(&'a str),
}

impl<'a> SortKey<'a> {
    /// `None` for values that sort with the absent ones: null and NaN.
    fn of(value: ValueRef<'a>) -> Option<Self> {
        match value {
            ValueRef::Null => None,
            ValueRef::Bool(b) => Some(SortKey::Bool(b)),
            ValueRef::Text(t) => Some(SortKey::Text(t)),
            number => number
                .as_f64()
                .filter(|f| !f.is_nan())
                .map(SortKey::Number),
        }
    }

    fn rank(self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Bool(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

/// Human-friendly string order.
///
/// Letters compare case-insensitively first; on a tie lowercase sorts before uppercase, and the
/// raw code points settle anything left.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
