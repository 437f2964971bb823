use crate::{utils, Error, Result};
use std::{collections::BTreeSet, fmt::Display};

pub(crate) type FieldValue = u8;

/// Kind of a schedule field, with its allowed range and name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Minutes, `0-59`.
    Minute,
    /// Hours, `0-23`.
    Hour,
    /// Days of month, `1-31`.
    DayOfMonth,
    /// Months, `1-12` or `JAN-DEC`.
    Month,
    /// Days of week, `0-6` or `SUN-SAT`, `7` is Sunday as well as `0`.
    DayOfWeek,
}

impl FieldKind {
    const DAYS_OF_WEEK: [&'static str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    const MONTHS: [&'static str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    pub(crate) fn bounds(&self) -> (FieldValue, FieldValue) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 6),
        }
    }

    /// Resolves a single number token: name table lookup first, then bare
    /// base-10 with bounds validation.
    fn resolve(&self, token: &str) -> Result<FieldValue> {
        let (min, max) = self.bounds();
        let named = match self {
            Self::Month => utils::parse_string_value(token, &Self::MONTHS).map(|value| value + 1),
            // both 0 and 7 mean Sunday
            Self::DayOfWeek if token == "7" => Some(0),
            Self::DayOfWeek => utils::parse_string_value(token, &Self::DAYS_OF_WEEK),
            _ => None,
        };

        named
            .or_else(|| utils::parse_digital_value(token, min, max))
            .ok_or_else(|| Error::InvalidValue {
                kind: *self,
                value: token.to_owned(),
            })
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minute => write!(f, "minute"),
            Self::Hour => write!(f, "hour"),
            Self::DayOfMonth => write!(f, "day of month"),
            Self::Month => write!(f, "month"),
            Self::DayOfWeek => write!(f, "day of week"),
        }
    }
}

/// Single expression of a field, one piece of its comma separated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expression {
    All,
    Single(FieldValue),
    // start-end
    Range(FieldValue, FieldValue),
    // */step
    SkipAll(FieldValue),
    // start-end/step
    SkipRange(FieldValue, FieldValue, FieldValue),
}

/// Recognizes one expression in strict priority order: all, skip, range,
/// single. The slash is detected before the dash since a skip's left-hand
/// side may itself look like a range.
fn recognize(kind: FieldKind, expression: &str) -> Result<Expression> {
    if expression == "*" {
        return Ok(Expression::All);
    }

    if let Some((base, step)) = expression.split_once('/') {
        let step = step
            .parse::<FieldValue>()
            .ok()
            .filter(|step| *step > 0)
            .ok_or_else(|| Error::InvalidStep {
                kind,
                value: expression.to_owned(),
            })?;

        return if base == "*" {
            Ok(Expression::SkipAll(step))
        } else if base.contains('-') {
            let (start, end) = range_endpoints(kind, base, expression)?;
            Ok(Expression::SkipRange(start, end, step))
        } else {
            // a bare value is not a valid base of a skip expression
            Err(Error::InvalidStep {
                kind,
                value: expression.to_owned(),
            })
        };
    }

    if expression.contains('-') {
        let (start, end) = range_endpoints(kind, expression, expression)?;
        return Ok(Expression::Range(start, end));
    }

    Ok(Expression::Single(kind.resolve(expression)?))
}

fn range_endpoints(kind: FieldKind, range: &str, expression: &str) -> Result<(FieldValue, FieldValue)> {
    let (start, end) = range.split_once('-').unwrap();
    let start = kind.resolve(start)?;
    let end = kind.resolve(end)?;

    if start > end {
        return Err(Error::InvalidRange {
            kind,
            value: expression.to_owned(),
        });
    }

    Ok((start, end))
}

/// Expands a recognized expression into concrete values.
///
/// A skip keeps every step-th element of the base expansion by position, and
/// since the base is always a contiguous ascending run, that is the same as
/// stepping by value from its start.
fn expand(kind: FieldKind, expression: Expression, values: &mut BTreeSet<FieldValue>) {
    let (min, max) = kind.bounds();
    match expression {
        Expression::All => values.extend(min..=max),
        Expression::Single(value) => {
            values.insert(value);
        }
        Expression::Range(start, end) => values.extend(start..=end),
        Expression::SkipAll(step) => values.extend((min..=max).step_by(step as usize)),
        Expression::SkipRange(start, end, step) => values.extend((start..=end).step_by(step as usize)),
    }
}

/// Parsed schedule field: ordered set of all values the field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Field {
    values: Vec<FieldValue>,
}

impl Field {
    /// Parses a field's text into the set of values it matches.
    ///
    /// The result is sorted ascending, deduplicated and never empty: every
    /// valid expression expands to at least one value, and a field with no
    /// valid expressions is a parse error.
    pub(crate) fn parse(kind: FieldKind, input: &str) -> Result<Self> {
        let mut values = BTreeSet::new();

        for expression in input.split(',') {
            expand(kind, recognize(kind, expression)?, &mut values);
        }

        Ok(Self {
            values: values.into_iter().collect(),
        })
    }

    /// Membership test against a calendar component value.
    pub(crate) fn contains(&self, value: u32) -> bool {
        FieldValue::try_from(value).map_or(false, |value| self.values.binary_search(&value).is_ok())
    }

    #[cfg(test)]
    pub(crate) fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldKind::Minute, "*", Expression::All)]
    #[case(FieldKind::Minute, "5", Expression::Single(5))]
    #[case(FieldKind::Minute, "05", Expression::Single(5))]
    #[case(FieldKind::Minute, "2-5", Expression::Range(2, 5))]
    #[case(FieldKind::Minute, "1-1", Expression::Range(1, 1))]
    #[case(FieldKind::Minute, "*/10", Expression::SkipAll(10))]
    #[case(FieldKind::Minute, "10-30/5", Expression::SkipRange(10, 30, 5))]
    #[case(FieldKind::Minute, "0-59/1", Expression::SkipRange(0, 59, 1))]
    #[case(FieldKind::Hour, "23", Expression::Single(23))]
    #[case(FieldKind::DayOfMonth, "31", Expression::Single(31))]
    #[case(FieldKind::DayOfMonth, "1-30/5", Expression::SkipRange(1, 30, 5))]
    #[case(FieldKind::Month, "12", Expression::Single(12))]
    #[case(FieldKind::Month, "jan", Expression::Single(1))]
    #[case(FieldKind::Month, "JUN", Expression::Single(6))]
    #[case(FieldKind::Month, "dec", Expression::Single(12))]
    #[case(FieldKind::Month, "auG-DEC", Expression::Range(8, 12))]
    #[case(FieldKind::Month, "feb-oct/2", Expression::SkipRange(2, 10, 2))]
    #[case(FieldKind::DayOfWeek, "0", Expression::Single(0))]
    #[case(FieldKind::DayOfWeek, "7", Expression::Single(0))]
    #[case(FieldKind::DayOfWeek, "sun", Expression::Single(0))]
    #[case(FieldKind::DayOfWeek, "SAT", Expression::Single(6))]
    #[case(FieldKind::DayOfWeek, "Wed-sat", Expression::Range(3, 6))]
    #[case(FieldKind::DayOfWeek, "mon-fri", Expression::Range(1, 5))]
    fn recognize_valid_expression(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: Expression) {
        let expression = recognize(kind, input);
        assert!(expression.is_ok(), "kind = {kind:?}, input = '{input}'");
        assert_eq!(expression.unwrap(), expected, "input = '{input}'");
    }

    #[rstest]
    #[case(FieldKind::Minute, vec!["", " ", "60", "-1", "5-1", "1-60", "5-", "-5", "1-2-3", "a", "a-b", "1.5", "?", "L", "W", "1#1"])]
    #[case(FieldKind::Hour, vec!["", "24", "5-1", "0-24", "abc", "12-"])]
    #[case(FieldKind::DayOfMonth, vec!["", "0", "32", "0-5", "1-32", "20-10"])]
    #[case(FieldKind::Month, vec!["", "0", "13", "5-1", "j@n", "ja", "janx", "dec-jan"])]
    #[case(FieldKind::DayOfWeek, vec!["", "8", "5-7", "tue-mon", "we", "M@n", "sunday"])]
    fn recognize_invalid_expression(#[case] kind: FieldKind, #[case] inputs: Vec<&str>) {
        for input in inputs {
            let expression = recognize(kind, input);
            assert!(expression.is_err(), "kind = {kind:?}, input = '{input}'");
        }
    }

    #[rstest]
    #[case(FieldKind::Minute, "5/2")]
    #[case(FieldKind::Minute, "0/0")]
    #[case(FieldKind::Minute, "*/0")]
    #[case(FieldKind::Minute, "*/")]
    #[case(FieldKind::Minute, "/5")]
    #[case(FieldKind::Minute, "5/")]
    #[case(FieldKind::Minute, "*/-2")]
    #[case(FieldKind::Minute, "*/abc")]
    #[case(FieldKind::Minute, "1/2/3")]
    #[case(FieldKind::DayOfWeek, "sun/2")]
    fn recognize_invalid_skip_expression(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(matches!(
            recognize(kind, input),
            Err(Error::InvalidStep { value, .. }) if value == input
        ));
    }

    #[rstest]
    #[case(FieldKind::Minute, "5-1")]
    #[case(FieldKind::Minute, "30-20/2")]
    #[case(FieldKind::DayOfWeek, "5-7")]
    #[case(FieldKind::Month, "dec-jan")]
    fn recognize_descending_range(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(matches!(recognize(kind, input), Err(Error::InvalidRange { .. })));
    }

    #[rstest]
    #[case(FieldKind::Minute, "*", (0..=59).collect::<Vec<FieldValue>>())]
    #[case(FieldKind::Minute, "*/10", vec![0, 10, 20, 30, 40, 50])]
    #[case(FieldKind::Minute, "0-59/1", (0..=59).collect::<Vec<FieldValue>>())]
    #[case(FieldKind::Minute, "5-8", vec![5, 6, 7, 8])]
    #[case(FieldKind::Minute, "3-10/3", vec![3, 6, 9])]
    #[case(FieldKind::Minute, "4-14/3", vec![4, 7, 10, 13])]
    #[case(FieldKind::Minute, "12", vec![12])]
    #[case(FieldKind::Minute, "6-8,2,3,4", vec![2, 3, 4, 6, 7, 8])]
    #[case(FieldKind::Minute, "9-12,6-7", vec![6, 7, 9, 10, 11, 12])]
    #[case(FieldKind::Minute, "1,1,1-2", vec![1, 2])]
    #[case(FieldKind::Minute, "1-1", vec![1])]
    #[case(FieldKind::Hour, "*", (0..=23).collect::<Vec<FieldValue>>())]
    #[case(FieldKind::Hour, "*/6", vec![0, 6, 12, 18])]
    #[case(FieldKind::DayOfMonth, "*", (1..=31).collect::<Vec<FieldValue>>())]
    #[case(FieldKind::DayOfMonth, "*/10", vec![1, 11, 21, 31])]
    #[case(FieldKind::Month, "*", (1..=12).collect::<Vec<FieldValue>>())]
    #[case(FieldKind::Month, "jan-may", vec![1, 2, 3, 4, 5])]
    #[case(FieldKind::Month, "JAN-MAY", vec![1, 2, 3, 4, 5])]
    #[case(FieldKind::Month, "feb-oct/2", vec![2, 4, 6, 8, 10])]
    #[case(FieldKind::Month, "dec,mar,jun", vec![3, 6, 12])]
    #[case(FieldKind::DayOfWeek, "*", vec![0, 1, 2, 3, 4, 5, 6])]
    #[case(FieldKind::DayOfWeek, "mon-wed", vec![1, 2, 3])]
    #[case(FieldKind::DayOfWeek, "7", vec![0])]
    #[case(FieldKind::DayOfWeek, "sun,7", vec![0])]
    #[case(FieldKind::DayOfWeek, "6,3", vec![3, 6])]
    fn parse_field_values(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: Vec<FieldValue>) {
        let field = Field::parse(kind, input);
        assert!(field.is_ok(), "kind = {kind:?}, input = '{input}'");
        assert_eq!(field.unwrap().values(), expected, "input = '{input}'");
    }

    #[rstest]
    #[case(FieldKind::Minute, "")]
    #[case(FieldKind::Minute, "1,")]
    #[case(FieldKind::Minute, ",1")]
    #[case(FieldKind::Minute, "1, 2")]
    #[case(FieldKind::Minute, ",")]
    #[case(FieldKind::Minute, "1,60")]
    #[case(FieldKind::DayOfWeek, "mon,8")]
    fn parse_field_invalid_list(#[case] kind: FieldKind, #[case] input: &str) {
        assert!(Field::parse(kind, input).is_err(), "input = '{input}'");
    }

    #[rstest]
    #[case(FieldKind::Minute, "10,12,20-30/5,25-30,*/30")]
    #[case(FieldKind::Hour, "10,12,10-14,3-9/2,*/4")]
    #[case(FieldKind::DayOfMonth, "7,2,15-19/2,*/5")]
    #[case(FieldKind::Month, "4,12,1-2,10-12/2,sep")]
    #[case(FieldKind::DayOfWeek, "1,3-5,7")]
    fn parse_field_is_sorted_unique_and_bounded(#[case] kind: FieldKind, #[case] input: &str) {
        let field = Field::parse(kind, input).unwrap();
        let values = field.values();
        let (min, max) = kind.bounds();

        assert!(!values.is_empty());
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]), "input = '{input}'");
        assert!(values.iter().all(|value| (min..=max).contains(value)));
    }

    #[test]
    fn contains_checks_membership() {
        let field = Field::parse(FieldKind::Minute, "*/15").unwrap();

        assert!(field.contains(0));
        assert!(field.contains(45));
        assert!(!field.contains(7));
        assert!(!field.contains(60));
        assert!(!field.contains(1000));
    }
}
