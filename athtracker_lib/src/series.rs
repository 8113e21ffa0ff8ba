//! Daily high price series and the capability to fetch one.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AthError;

/// One day's high price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub high: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, high: f64) -> Self {
        Self { date, high }
    }
}

/// Price points ordered oldest first, one per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Sorts `points` by date. When a date appears more than once the point
    /// given last wins.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl FromIterator<PricePoint> for Series {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Series::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// How a source's prices are rendered in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFormat {
    /// Shortest representation that round-trips, always with a fractional part
    /// (`150.0`, `123.45`). Magnitudes below `1e-4` or from `1e16` up switch to
    /// exponent notation with a signed, two-digit exponent (`5e-05`, `1e+16`).
    Shortest,
    /// Fixed two decimal places (`150.00`).
    TwoDecimals,
}

impl PriceFormat {
    pub fn render(&self, price: f64) -> String {
        match self {
            PriceFormat::Shortest => shortest_repr(price),
            PriceFormat::TwoDecimals => format!("{:.2}", price),
        }
    }
}

fn shortest_repr(price: f64) -> String {
    if price.is_nan() {
        return "nan".to_string();
    }
    if price.is_infinite() {
        return if price > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.2345e2`, `-5e-5`.
    let sci = format!("{:e}", price);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{:?}", price);
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return format!("{:?}", price);
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let int_len = exp + 1;
    let body = if int_len <= 0 {
        format!("0.{}{}", "0".repeat(int_len.unsigned_abs() as usize), digits)
    } else {
        let int_len = int_len as usize;
        if digits.len() <= int_len {
            format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    };
    format!("{}{}", sign, body)
}

/// A source of daily price history.
#[allow(async_fn_in_trait)]
pub trait SeriesFetcher {
    /// Short name used in logs.
    fn source_name(&self) -> &'static str;

    /// How this source's prices should be printed.
    fn price_format(&self) -> PriceFormat;

    /// Fetch the full available daily history for `symbol`, oldest first.
    async fn fetch_series(&self, symbol: &str) -> Result<Series, AthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, high: f64) -> PricePoint {
        PricePoint::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), high)
    }

    #[test]
    fn series_sorts_oldest_first() {
        let series = Series::new(vec![
            point("2020-01-03", 3.0),
            point("2020-01-01", 1.0),
            point("2020-01-02", 2.0),
        ]);
        let highs: Vec<f64> = series.iter().map(|p| p.high).collect();
        assert_eq!(highs, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first().unwrap().date, point("2020-01-01", 0.0).date);
        assert_eq!(series.last().unwrap().date, point("2020-01-03", 0.0).date);
    }

    #[test]
    fn series_duplicate_date_keeps_last_given() {
        let series = Series::new(vec![
            point("2020-01-01", 1.0),
            point("2020-01-02", 2.0),
            point("2020-01-01", 9.0),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].high, 9.0);
    }

    #[test]
    fn series_from_iterator() {
        let series: Series = vec![point("2020-01-02", 2.0), point("2020-01-01", 1.0)]
            .into_iter()
            .collect();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].high, 1.0);
    }

    #[test]
    fn empty_series() {
        let series = Series::default();
        assert!(series.is_empty());
        assert!(series.first().is_none());
        assert!(series.last().is_none());
    }

    #[test]
    fn price_format_shortest() {
        assert_eq!(PriceFormat::Shortest.render(150.0), "150.0");
        assert_eq!(PriceFormat::Shortest.render(123.45), "123.45");
        assert_eq!(PriceFormat::Shortest.render(197.77), "197.77");
        assert_eq!(PriceFormat::Shortest.render(0.0), "0.0");
        assert_eq!(PriceFormat::Shortest.render(1234.5678), "1234.5678");
    }

    #[test]
    fn price_format_shortest_small_and_large() {
        assert_eq!(PriceFormat::Shortest.render(0.0001), "0.0001");
        assert_eq!(PriceFormat::Shortest.render(0.00012345), "0.00012345");
        assert_eq!(PriceFormat::Shortest.render(0.00005), "5e-05");
        assert_eq!(PriceFormat::Shortest.render(1.5e-7), "1.5e-07");
        assert_eq!(PriceFormat::Shortest.render(1234567890123456.0), "1234567890123456.0");
        assert_eq!(PriceFormat::Shortest.render(1e16), "1e+16");
        assert_eq!(PriceFormat::Shortest.render(2.5e100), "2.5e+100");
    }

    #[test]
    fn price_format_shortest_signs_and_non_finite() {
        assert_eq!(PriceFormat::Shortest.render(-12.5), "-12.5");
        assert_eq!(PriceFormat::Shortest.render(-0.00005), "-5e-05");
        assert_eq!(PriceFormat::Shortest.render(f64::NAN), "nan");
        assert_eq!(PriceFormat::Shortest.render(f64::INFINITY), "inf");
    }

    #[test]
    fn price_format_two_decimals() {
        assert_eq!(PriceFormat::TwoDecimals.render(150.0), "150.00");
        assert_eq!(PriceFormat::TwoDecimals.render(123.456), "123.46");
        assert_eq!(PriceFormat::TwoDecimals.render(0.5), "0.50");
    }
}
