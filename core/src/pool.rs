use ndarray::Array2;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::*;

/// One candidate square text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub square: String,
    pub segment_index: u32,
    /// Entries sharing a kind and choice count are drawn from together.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub choices: Option<u32>,
}

impl PoolEntry {
    fn group_key(&self) -> (&str, u32) {
        (self.kind.as_str(), self.choices.unwrap_or(1))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquarePool {
    entries: Vec<PoolEntry>,
}

impl SquarePool {
    pub fn new(entries: Vec<PoolEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| BingoError::InvalidPool(err.to_string()))
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Sorted, deduplicated segment indices.
    pub fn segments(&self) -> Vec<u32> {
        let mut segments: Vec<u32> = self.entries.iter().map(|e| e.segment_index).collect();
        segments.sort_unstable();
        segments.dedup();
        segments
    }

    /// Draws square texts for `segment`.
    ///
    /// Every `(kind, choices)` group contributes `choices` texts picked with
    /// replacement, and the combined selection is shuffled.
    pub fn sample(&self, segment: u32, rng: &mut SmallRng) -> Vec<String> {
        use rand::prelude::*;

        let mut groups: BTreeMap<(&str, u32), Vec<&PoolEntry>> = BTreeMap::new();
        for entry in self.entries.iter().filter(|e| e.segment_index == segment) {
            groups.entry(entry.group_key()).or_default().push(entry);
        }

        let mut chosen = Vec::new();
        for ((_, choices), group) in groups {
            for _ in 0..choices {
                if let Some(entry) = group.choose(rng) {
                    chosen.push(entry.square.clone());
                }
            }
        }

        chosen.shuffle(rng);
        chosen
    }
}

/// Square texts laid out on the board grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    labels: Array2<String>,
}

impl BoardLayout {
    pub fn blank(size: Coord2) -> Self {
        Self {
            labels: Array2::default(size.to_nd_index()),
        }
    }

    /// Fills a board of `config` size from `segment` of the pool.
    ///
    /// The same seed always produces the same layout.
    pub fn generate(pool: &SquarePool, segment: u32, config: BoardConfig, seed: u64) -> Result<Self> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut selection = pool.sample(segment, &mut rng);
        if selection.is_empty() {
            return Err(BingoError::EmptySegment(segment));
        }

        let needed = config.total_squares();
        if selection.len() < needed {
            return Err(BingoError::NotEnoughSquares {
                segment,
                needed,
                available: selection.len(),
            });
        }
        if selection.len() > needed {
            log::debug!(
                "segment {} drew {} squares, using {}",
                segment,
                selection.len(),
                needed
            );
        }

        let mut layout = Self::blank(config.size);
        // column-major walk matches document order
        for label in layout.labels.iter_mut() {
            if let Some(text) = selection.pop() {
                *label = text;
            }
        }
        Ok(layout)
    }

    pub fn size(&self) -> Coord2 {
        let (cols, rows) = self.labels.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn label(&self, coords: Coord2) -> &str {
        &self.labels[coords.to_nd_index()]
    }

    /// Labels in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn entry(square: &str, segment_index: u32, kind: &str, choices: Option<u32>) -> PoolEntry {
        PoolEntry {
            square: square.to_string(),
            segment_index,
            kind: kind.to_string(),
            choices,
        }
    }

    fn pool() -> SquarePool {
        let mut entries = vec![entry("Free", 1, "free", None)];
        entries.extend((0..6).map(|i| entry(&format!("common {i}"), 1, "common", Some(3))));
        entries.extend((0..2).map(|i| entry(&format!("rare {i}"), 1, "rare", Some(1))));
        entries.push(entry("other segment", 2, "common", Some(1)));
        SquarePool::new(entries)
    }

    #[test]
    fn pool_reads_json_with_optional_choices() {
        let json = r#"[
            {"square": "Free", "segment_index": 1, "type": "free"},
            {"square": "Lag spike", "segment_index": 1, "type": "tech", "choices": 2}
        ]"#;

        let pool = SquarePool::from_json(json).unwrap();

        assert_eq!(pool.entries()[0].choices, None);
        assert_eq!(pool.entries()[1].kind, "tech");
        assert!(matches!(
            SquarePool::from_json("{}"),
            Err(BingoError::InvalidPool(_))
        ));
    }

    #[test]
    fn segments_are_sorted_and_unique() {
        assert_eq!(pool().segments(), vec![1, 2]);
    }

    #[test]
    fn sample_draws_choices_per_group() {
        let mut rng = SmallRng::seed_from_u64(7);

        let drawn = pool().sample(1, &mut rng);

        assert_eq!(drawn.len(), 5);
        assert_eq!(drawn.iter().filter(|s| *s == "Free").count(), 1);
        assert_eq!(drawn.iter().filter(|s| s.starts_with("common")).count(), 3);
        assert!(!drawn.iter().any(|s| s == "other segment"));
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new((1, 5));

        let a = BoardLayout::generate(&pool(), 1, config, 42).unwrap();
        let b = BoardLayout::generate(&pool(), 1, config, 42).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.size(), (1, 5));
        assert!(a.iter().all(|label| !label.is_empty()));
    }

    #[test]
    fn generate_reports_short_pools() {
        assert_eq!(
            BoardLayout::generate(&pool(), 9, BoardConfig::default(), 0),
            Err(BingoError::EmptySegment(9))
        );
        assert_eq!(
            BoardLayout::generate(&pool(), 1, BoardConfig::default(), 0),
            Err(BingoError::NotEnoughSquares {
                segment: 1,
                needed: 25,
                available: 5
            })
        );
    }
}
