//! Ordered multimap of group code → value for one structural record

use super::reader::DxfCodePair;

/// Group code of the subclass marker (`AcDbEntity`, `AcDbDimension`, ...)
pub const SUBCLASS_MARKER: i32 = 100;

/// The pairs of one record, in source order.
///
/// Lookups return the first occurrence of a code. Numeric accessors are
/// lenient: a missing or unparsable value yields the supplied default, the
/// way legacy writers' sloppy numbers are tolerated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairContainer {
    pairs: Vec<DxfCodePair>,
}

impl PairContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a pair
    pub fn add(&mut self, code: i32, value: impl Into<String>) {
        self.pairs.push(DxfCodePair::new(code, value));
    }

    /// Append an already built pair
    pub fn push(&mut self, pair: DxfCodePair) {
        self.pairs.push(pair);
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over all pairs in source order
    pub fn iter(&self) -> std::slice::Iter<'_, DxfCodePair> {
        self.pairs.iter()
    }

    /// First value stored under `code`
    pub fn first_value(&self, code: i32) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.code == code)
            .map(|pair| pair.value.as_str())
    }

    /// First value stored under `code`, or `default`
    pub fn value_or<'a>(&'a self, code: i32, default: &'a str) -> &'a str {
        self.first_value(code).unwrap_or(default)
    }

    /// First value under `code` parsed as a float, or `default`
    pub fn f64_or(&self, code: i32, default: f64) -> f64 {
        self.first_value(code).and_then(parse_f64).unwrap_or(default)
    }

    /// First value under `code` parsed as an integer, or `default`.
    ///
    /// Values written as reals (`"1.0"`) are truncated.
    pub fn i32_or(&self, code: i32, default: i32) -> i32 {
        self.first_value(code)
            .and_then(parse_int)
            .unwrap_or(default)
    }

    /// Every value stored under `code`, lazily, in source order
    pub fn values(&self, code: i32) -> impl Iterator<Item = &str> + '_ {
        self.pairs
            .iter()
            .filter(move |pair| pair.code == code)
            .map(|pair| pair.value.as_str())
    }

    /// All pairs from the first occurrence of `code` onward.
    ///
    /// Empty when `code` does not occur. Used by repeated-field records whose
    /// per-item groups start with a known code.
    pub fn pairs_from(&self, code: i32) -> &[DxfCodePair] {
        match self.pairs.iter().position(|pair| pair.code == code) {
            Some(start) => &self.pairs[start..],
            None => &[],
        }
    }

    /// Pairs between the subclass marker whose value is `subclass` and the
    /// next subclass marker. `None` when the marker is absent.
    pub fn subclass(&self, subclass: &str) -> Option<PairContainer> {
        let start = self
            .pairs
            .iter()
            .position(|pair| pair.code == SUBCLASS_MARKER && pair.value == subclass)?;

        let pairs = self.pairs[start + 1..]
            .iter()
            .take_while(|pair| pair.code != SUBCLASS_MARKER)
            .cloned()
            .collect();
        Some(PairContainer { pairs })
    }

    /// First value of `code` found after the `subclass` marker
    pub fn subclass_value(&self, code: i32, subclass: &str) -> Option<&str> {
        let start = self.pairs.iter().position(|pair| {
            pair.code == SUBCLASS_MARKER && pair.value.eq_ignore_ascii_case(subclass)
        })?;
        self.pairs[start + 1..]
            .iter()
            .find(|pair| pair.code == code)
            .map(|pair| pair.value.as_str())
    }
}

pub(crate) fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

pub(crate) fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();
    value
        .parse::<i32>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|v| v as i32))
}

impl FromIterator<(i32, String)> for PairContainer {
    fn from_iter<I: IntoIterator<Item = (i32, String)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(code, value)| DxfCodePair::new(code, value))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PairContainer {
    type Item = &'a DxfCodePair;
    type IntoIter = std::slice::Iter<'a, DxfCodePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(pairs: &[(i32, &str)]) -> PairContainer {
        pairs.iter().map(|(c, v)| (*c, v.to_string())).collect()
    }

    #[test]
    fn test_first_value_and_defaults() {
        let pc = container(&[(8, "WALLS"), (10, "1.5"), (10, "2.5"), (70, "abc")]);
        assert_eq!(pc.first_value(8), Some("WALLS"));
        assert_eq!(pc.first_value(6), None);
        assert_eq!(pc.value_or(6, "BYLAYER"), "BYLAYER");
        assert_eq!(pc.f64_or(10, 0.0), 1.5);
        assert_eq!(pc.i32_or(70, 9), 9);
        assert_eq!(pc.i32_or(62, 256), 256);
    }

    #[test]
    fn test_integer_written_as_real() {
        let pc = container(&[(70, "1.0")]);
        assert_eq!(pc.i32_or(70, 0), 1);
    }

    #[test]
    fn test_values_iterates_all_occurrences() {
        let pc = container(&[(10, "1"), (20, "2"), (10, "3"), (20, "4")]);
        let xs: Vec<&str> = pc.values(10).collect();
        assert_eq!(xs, vec!["1", "3"]);
        // a fresh iterator restarts from the beginning
        assert_eq!(pc.values(20).count(), 2);
    }

    #[test]
    fn test_pairs_from() {
        let pc = container(&[(90, "2"), (10, "1"), (20, "2"), (10, "3")]);
        let tail = pc.pairs_from(10);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].value, "1");
        assert!(pc.pairs_from(42).is_empty());
    }

    #[test]
    fn test_subclass_range() {
        let pc = container(&[
            (5, "1F"),
            (100, "AcDbEntity"),
            (8, "DIMS"),
            (100, "AcDbDimension"),
            (2, "*D1"),
            (10, "4.0"),
            (100, "AcDbAlignedDimension"),
            (10, "9.0"),
        ]);
        let entity = pc.subclass("AcDbEntity").unwrap();
        assert_eq!(entity.len(), 1);
        assert_eq!(entity.first_value(8), Some("DIMS"));

        let dim = pc.subclass("AcDbDimension").unwrap();
        assert_eq!(dim.first_value(2), Some("*D1"));
        assert_eq!(dim.f64_or(10, 0.0), 4.0);

        assert!(pc.subclass("AcDbLine").is_none());
        assert_eq!(pc.subclass_value(10, "acdbaligneddimension"), Some("9.0"));
    }
}
