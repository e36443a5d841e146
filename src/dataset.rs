//! Practice phrases with reference pitch statistics.

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::pronunciation::{PronunciationError, ReferenceItem, Result};

/// Non-empty list of reference items loaded from a JSON array of
/// `{"spelling", "mean_pitch", "std_pitch"}` records.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    items: Vec<ReferenceItem>,
}

impl ReferenceDataset {
    pub fn new(items: Vec<ReferenceItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(PronunciationError::config("dataset contains no reference items"));
        }
        for (idx, item) in items.iter().enumerate() {
            item.validate().map_err(|err| {
                PronunciationError::config(format!("dataset record {idx}: {err}"))
            })?;
            if !item.mean_pitch.is_finite() || !item.std_pitch.is_finite() {
                return Err(PronunciationError::config(format!(
                    "dataset record {idx} ({:?}) has non-finite pitch statistics",
                    item.text
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let items: Vec<ReferenceItem> =
            serde_json::from_str(data).map_err(PronunciationError::config)?;
        Self::new(items)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|err| {
            PronunciationError::config(format!("failed to read dataset {}: {err}", path.display()))
        })?;
        let dataset = Self::from_json(&data).map_err(|err| {
            PronunciationError::config(format!("{}: {err}", path.display()))
        })?;
        info!(path = %path.display(), items = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    pub fn items(&self) -> &[ReferenceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Uniformly random item.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &ReferenceItem {
        // `new` rejects empty datasets
        self.items.choose(rng).unwrap_or(&self.items[0])
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::ReferenceDataset;
    use crate::pronunciation::PronunciationError;

    const SAMPLE: &str = r#"[
        {"spelling": "hello world", "mean_pitch": 60.0, "std_pitch": 2.0},
        {"spelling": "good morning", "mean_pitch": 55.0, "std_pitch": 3.5}
    ]"#;

    #[test]
    fn loads_records_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dataset = ReferenceDataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.items()[1].text, "good morning");
        assert_eq!(dataset.items()[1].std_pitch, 3.5);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = ReferenceDataset::from_json("[]").unwrap_err();
        assert!(matches!(err, PronunciationError::Config { .. }));
    }

    #[test]
    fn missing_columns_are_rejected() {
        let err = ReferenceDataset::from_json(r#"[{"spelling": "hello"}]"#).unwrap_err();
        assert!(matches!(err, PronunciationError::Config { .. }));
    }

    #[test]
    fn blank_phrase_is_rejected() {
        let err = ReferenceDataset::from_json(
            r#"[{"spelling": " ", "mean_pitch": 1.0, "std_pitch": 1.0}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }

    #[test]
    fn sampling_covers_every_item() {
        let dataset = ReferenceDataset::from_json(SAMPLE).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 2];
        for _ in 0..64 {
            let item = dataset.sample(&mut rng);
            let idx = dataset.items().iter().position(|i| i == item).unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true, true]);
    }
}
