use crate::error::{WheelError, WheelResult};

/// Ordered, non-empty list of prize labels. Order defines the segment order
/// around the wheel, starting at angle 0 and going clockwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeList {
    labels: Vec<String>,
}

impl PrizeList {
    pub fn new<I, S>(labels: I) -> WheelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(WheelError::EmptyPrizeList);
        }
        Ok(Self { labels })
    }

    /// Number of prizes (always >= 1)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Split a label into the two lines drawn inside a segment:
/// the first three words, then everything after them.
pub fn label_lines(label: &str) -> (String, String) {
    let words: Vec<&str> = label.split_whitespace().collect();
    let split = words.len().min(3);
    (words[..split].join(" "), words[split..].join(" "))
}
