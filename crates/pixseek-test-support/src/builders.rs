//! Synthetic record and page builders for testing.

use pixseek_core::{ImageRecord, ResultPage};

/// Builder for synthetic image records.
pub struct RecordBuilder;

impl RecordBuilder {
    /// Creates the `index`-th record of `query` (0-based).
    ///
    /// Ids, URLs and tags are derived from both arguments, so records of
    /// different queries never compare equal.
    #[must_use]
    pub fn numbered(query: &str, index: usize) -> ImageRecord {
        let slug: String = query
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let mut record = ImageRecord::new(
            Self::id_for(query, index),
            format!("https://cdn.test/{slug}/{index}_640.jpg"),
            format!("https://cdn.test/{slug}/{index}_1280.jpg"),
            format!("{query}, #{index}"),
        );
        record.likes = index as u64;
        record
    }

    /// Creates `count` consecutive records of `query` starting at `start`.
    #[must_use]
    pub fn run(query: &str, start: usize, count: usize) -> Vec<ImageRecord> {
        (start..start + count)
            .map(|i| Self::numbered(query, i))
            .collect()
    }

    fn id_for(query: &str, index: usize) -> u64 {
        let seed = query
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        seed.wrapping_mul(1_000_003).wrapping_add(index as u64)
    }
}

/// Builder for result pages cut from a synthetic catalog.
pub struct PageBuilder;

impl PageBuilder {
    /// Returns page `page` (1-based) of a `total`-record catalog for `query`.
    ///
    /// Pages past the end are empty but still report `total`.
    #[must_use]
    pub fn slice(query: &str, page: u32, page_size: u32, total: usize) -> ResultPage {
        let size = page_size as usize;
        let start = (page.max(1) as usize - 1) * size;
        let count = total.saturating_sub(start).min(size);
        ResultPage::new(RecordBuilder::run(query, start, count), total)
    }

    /// A page of `count` records reporting `total` matches.
    #[must_use]
    pub fn with_len(query: &str, count: usize, total: usize) -> ResultPage {
        ResultPage::new(RecordBuilder::run(query, 0, count), total)
    }
}
