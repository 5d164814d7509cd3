/// One ticker's snapshot: label/value pairs in page order, led by `"Ticker"`.
///
/// Values are kept exactly as rendered (whitespace-stripped text); nothing is
/// parsed into numbers. A label seen twice keeps its first position and the
/// last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundamentalRecord {
    fields: Vec<(String, String)>,
}

impl FundamentalRecord {
    /// Label of the injected symbol field.
    pub const TICKER: &'static str = "Ticker";

    pub(crate) fn new(ticker: impl Into<String>) -> Self {
        Self {
            fields: vec![(Self::TICKER.to_string(), ticker.into())],
        }
    }

    /// Inserts or overwrites `label`. The ticker field is never replaced.
    pub(crate) fn insert(&mut self, label: String, value: String) {
        if label == Self::TICKER {
            return;
        }
        match self.fields.iter_mut().find(|(l, _)| *l == label) {
            Some((_, v)) => *v = value,
            None => self.fields.push((label, value)),
        }
    }

    /// The symbol this record was fetched for.
    pub fn ticker(&self) -> &str {
        &self.fields[0].1
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Labels in first-seen order, starting with `"Ticker"`.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Number of fields, the ticker included.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
