use crate::data::{Value, ValueKind};
use std::cmp::Ordering;

/// Compare optional values with absent/null placement.
/// `None` and `Value::Null` both count as null.
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>, nulls_first: bool) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => {
            if nulls_first {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (Some(_), None) => {
            if nulls_first {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Some(av), Some(bv)) => compare_non_null(av, bv),
    }
}

/// Numeric values compare numerically across Int64/Float64, strings
/// lexicographically, bools false < true. Callers guarantee both values
/// share a `ValueKind`; anything else compares equal.
pub(crate) fn compare_non_null(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        // -0.0 equals 0.0 so that both equal the integer 0; NaN falls to total_cmp
        (Value::Float64(x), Value::Float64(y)) => x.partial_cmp(y).unwrap_or_else(|| x.total_cmp(y)),
        (Value::Int64(x), Value::Float64(y)) => compare_int_float(*x, *y),
        (Value::Float64(x), Value::Int64(y)) => compare_int_float(*y, *x).reverse(),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Exact integer/float ordering. Casting the integer to f64 loses precision
/// above 2^53 and breaks transitivity.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal if f > whole => Ordering::Less,
        Ordering::Equal if f < whole => Ordering::Greater,
        other => other,
    }
}

/// The single ordering class shared by every non-null value, or `None` if
/// two classes are mixed. All-null input yields `Some(ValueKind::Null)`.
pub(crate) fn common_kind<'a, I>(values: I) -> Option<ValueKind>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut kind = ValueKind::Null;
    for value in values {
        match (kind, value.kind()) {
            (_, ValueKind::Null) => {}
            (ValueKind::Null, k) => kind = k,
            (current, k) if current == k => {}
            _ => return None,
        }
    }
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_numeric_ordering() {
        assert_eq!(compare_non_null(&Value::Int64(2), &Value::Float64(2.5)), Ordering::Less);
        assert_eq!(compare_non_null(&Value::Float64(3.0), &Value::Int64(3)), Ordering::Equal);
        assert_eq!(
            compare_non_null(&Value::String("apple".into()), &Value::String("banana".into())),
            Ordering::Less
        );
    }

    #[test]
    fn test_int_float_exact_above_2_pow_53() {
        let big = 1_i64 << 53;
        let float = Value::Float64(big as f64);
        assert_eq!(compare_non_null(&Value::Int64(big + 1), &float), Ordering::Greater);
        assert_eq!(compare_non_null(&float, &Value::Int64(big + 1)), Ordering::Less);
        assert_eq!(compare_non_null(&Value::Int64(big), &float), Ordering::Equal);

        assert_eq!(compare_non_null(&Value::Int64(i64::MAX), &Value::Float64(9.3e18)), Ordering::Less);
        assert_eq!(compare_non_null(&Value::Int64(i64::MIN), &Value::Float64(-9.3e18)), Ordering::Greater);
        assert_eq!(compare_non_null(&Value::Int64(-3), &Value::Float64(-2.5)), Ordering::Less);
        assert_eq!(compare_non_null(&Value::Int64(2), &Value::Float64(f64::INFINITY)), Ordering::Less);
        assert_eq!(compare_non_null(&Value::Int64(0), &Value::Float64(-0.0)), Ordering::Equal);
        assert_eq!(compare_non_null(&Value::Float64(-0.0), &Value::Float64(0.0)), Ordering::Equal);
    }

    #[test]
    fn test_null_placement() {
        let one = Value::Int64(1);
        assert_eq!(compare_values(None, Some(&one), false), Ordering::Greater);
        assert_eq!(compare_values(Some(&Value::Null), Some(&one), true), Ordering::Less);
        assert_eq!(compare_values(None, Some(&Value::Null), false), Ordering::Equal);
    }

    #[test]
    fn test_common_kind() {
        let values = [Value::Int64(1), Value::Null, Value::Float64(2.0)];
        assert_eq!(common_kind(values.iter()), Some(ValueKind::Numeric));
        let values = [Value::Int64(1), Value::String("x".into())];
        assert_eq!(common_kind(values.iter()), None);
        assert_eq!(common_kind(std::iter::empty()), Some(ValueKind::Null));
    }
}
