use wrr_common::{EntryConfig, WrrError, WrrResult};

/// A weighted item as supplied by a caller.
///
/// `key` is optional and falls back to `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: Option<String>,
    pub value: String,
    pub weight: u32,
}

impl Candidate {
    pub fn new(value: impl Into<String>, weight: u32) -> Self {
        Self {
            key: None,
            value: value.into(),
            weight,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The key this candidate will be stored under.
    pub fn resolved_key(&self) -> &str {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => &self.value,
        }
    }

    /// Validate the candidate and turn it into an entry with a zero threshold.
    pub(crate) fn into_entry(self) -> WrrResult<Entry> {
        if self.value.is_empty() {
            return Err(WrrError::EmptyValue);
        }
        let key = match self.key {
            Some(key) if !key.is_empty() => key,
            _ => self.value.clone(),
        };
        Ok(Entry {
            key,
            value: self.value,
            weight: self.weight,
            threshold: 0,
        })
    }
}

impl From<EntryConfig> for Candidate {
    fn from(config: EntryConfig) -> Self {
        Self {
            key: config.key,
            value: config.value,
            weight: config.weight,
        }
    }
}

impl From<&EntryConfig> for Candidate {
    fn from(config: &EntryConfig) -> Self {
        Self::from(config.clone())
    }
}

impl From<&Entry> for Candidate {
    fn from(entry: &Entry) -> Self {
        Self {
            key: Some(entry.key.clone()),
            value: entry.value.clone(),
            weight: entry.weight,
        }
    }
}

/// A stored entry.
///
/// `threshold` is the sum of the weights of every entry whose key sorts
/// before this one, so the entry owns the interval
/// `[threshold, threshold + weight)` of the drawn value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) weight: u32,
    pub(crate) threshold: u64,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Whether a drawn value `w` falls inside this entry's interval.
    pub fn covers(&self, w: u64) -> bool {
        self.threshold <= w && w < self.threshold + u64::from(self.weight)
    }
}
