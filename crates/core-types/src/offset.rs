use serde::{Deserialize, Serialize};

/// A named historical lookback, expressed as a number of trading-day bars
/// to trim from the end of a price series before analysis.
///
/// `bars == 0` is the "current" offset: the untruncated series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetSpec {
    pub name: String,
    pub bars: usize,
}

impl OffsetSpec {
    pub fn new(name: impl Into<String>, bars: usize) -> Self {
        Self {
            name: name.into(),
            bars,
        }
    }
}

/// An ordered set of offsets to evaluate per run.
///
/// Declaration order is preserved everywhere downstream: score tables, the
/// leaderboard, and the CSV artifact all list offset columns in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetTable(Vec<OffsetSpec>);

impl OffsetTable {
    pub fn new(specs: Vec<OffsetSpec>) -> Self {
        Self(specs)
    }

    /// The standard lookback table: current, one week, one month, three
    /// months, six months and one year of trading days.
    pub fn standard() -> Self {
        Self(vec![
            OffsetSpec::new("current", 0),
            OffsetSpec::new("1-week", 5),
            OffsetSpec::new("1-month", 21),
            OffsetSpec::new("3-month", 63),
            OffsetSpec::new("6-month", 126),
            OffsetSpec::new("1-year", 252),
        ])
    }

    pub fn specs(&self) -> &[OffsetSpec] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OffsetSpec> {
        self.0.iter()
    }

    /// Index of the "current" (zero-bar) offset, if one is declared.
    pub fn current_index(&self) -> Option<usize> {
        self.0.iter().position(|o| o.bars == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_preserves_declaration_order() {
        let table = OffsetTable::standard();
        let names: Vec<&str> = table.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["current", "1-week", "1-month", "3-month", "6-month", "1-year"]
        );
        assert_eq!(table.specs()[5].bars, 252);
    }

    #[test]
    fn current_index_finds_the_zero_bar_offset() {
        let table = OffsetTable::standard();
        assert_eq!(table.current_index(), Some(0));

        let table = OffsetTable::new(vec![
            OffsetSpec::new("1-week", 5),
            OffsetSpec::new("now", 0),
        ]);
        assert_eq!(table.current_index(), Some(1));

        let table = OffsetTable::new(vec![OffsetSpec::new("1-week", 5)]);
        assert_eq!(table.current_index(), None);
    }
}
