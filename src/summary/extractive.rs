//! Extractive summarization by sentence centrality
//!
//! A small TextRank-style ranker: sentences are nodes, token-overlap
//! similarity forms the edge weights, and a damped power iteration scores
//! centrality. Selected sentences come back in document order.

use crate::error::{JobInsightError, Result};
use ndarray::{Array1, Array2};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextRankSummarizer {
    damping: f32,
    epsilon: f32,
    max_iterations: usize,
}

impl Default for TextRankSummarizer {
    fn default() -> Self {
        Self {
            damping: 0.85,
            epsilon: 1e-4,
            max_iterations: 100,
        }
    }
}

impl TextRankSummarizer {
    /// Select the `sentence_count` most central sentences. Fails on input
    /// that yields no rankable sentences; callers degrade to the heuristic
    /// fallback on error.
    pub fn summarize(&self, text: &str, sentence_count: usize) -> Result<Vec<String>> {
        let cleaned = normalize_whitespace(text);
        if cleaned.is_empty() {
            return Err(JobInsightError::Summarization(
                "No text to summarize".to_string(),
            ));
        }

        let sentences: Vec<String> = cleaned
            .unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() {
            return Err(JobInsightError::Summarization(
                "Input has no sentences".to_string(),
            ));
        }

        let token_sets: Vec<HashSet<String>> = sentences
            .iter()
            .map(|s| {
                s.unicode_words()
                    .map(|w| w.to_lowercase())
                    .filter(|w| w.chars().count() > 1)
                    .collect()
            })
            .collect();
        if token_sets.iter().all(|set| set.is_empty()) {
            return Err(JobInsightError::Summarization(
                "Input has no rankable tokens".to_string(),
            ));
        }

        if sentences.len() <= sentence_count {
            return Ok(sentences);
        }

        let scores = self.rank(&token_sets);

        let mut order: Vec<usize> = (0..sentences.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        let mut selected: Vec<usize> = order.into_iter().take(sentence_count).collect();
        selected.sort_unstable();

        Ok(selected.into_iter().map(|i| sentences[i].clone()).collect())
    }

    fn rank(&self, token_sets: &[HashSet<String>]) -> Vec<f32> {
        let n = token_sets.len();

        let mut similarity = Array2::<f32>::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let sim = jaccard(&token_sets[i], &token_sets[j]);
                similarity[[i, j]] = sim;
                similarity[[j, i]] = sim;
            }
        }

        // Row-normalize into a stochastic transition matrix
        for mut row in similarity.rows_mut() {
            let sum: f32 = row.sum();
            if sum > 0.0 {
                row.mapv_inplace(|v| v / sum);
            }
        }

        let mut scores = Array1::<f32>::from_elem(n, 1.0 / n as f32);
        let teleport = (1.0 - self.damping) / n as f32;

        for _ in 0..self.max_iterations {
            let next = similarity.t().dot(&scores) * self.damping + teleport;
            let delta: f32 = (&next - &scores).mapv(f32::abs).sum();
            scores = next;
            if delta < self.epsilon {
                break;
            }
        }

        scores.to_vec()
    }
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f32 / union as f32
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_requested_count_in_document_order() {
        let text = "The platform team builds ingestion services. \
                    The ingestion services process customer events. \
                    Snacks are available in the kitchen. \
                    Engineers on the platform team review ingestion changes. \
                    Customer events flow through the ingestion services daily. \
                    The office has a view of the river.";
        let ranker = TextRankSummarizer::default();
        let summary = ranker.summarize(text, 3).unwrap();

        assert_eq!(summary.len(), 3);
        // Document order preserved
        let positions: Vec<usize> = summary
            .iter()
            .map(|s| text.find(s.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_short_input_returned_whole() {
        let ranker = TextRankSummarizer::default();
        let summary = ranker.summarize("Only one sentence here.", 4).unwrap();
        assert_eq!(summary.len(), 1);
    }

    #[test]
    fn test_central_sentences_win() {
        let text = "Databases store ingestion records. \
                    Ingestion records feed the databases nightly. \
                    Zebras gallop. \
                    The databases serve ingestion dashboards.";
        let ranker = TextRankSummarizer::default();
        let summary = ranker.summarize(text, 2).unwrap();
        assert!(summary.iter().all(|s| !s.contains("Zebras")));
    }

    #[test]
    fn test_degenerate_input_fails() {
        let ranker = TextRankSummarizer::default();
        assert!(ranker.summarize("   ", 4).is_err());
        assert!(ranker.summarize("a b c", 4).is_err());
    }
}
