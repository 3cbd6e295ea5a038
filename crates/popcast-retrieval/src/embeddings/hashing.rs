//! Feature-hashing embedder.
//!
//! Each document becomes a bag of words and adjacent word pairs ("birth
//! rate", "baby bonus") with common function words removed. Every term is
//! hashed with blake3 into a bucket, weighted by sublinear term frequency,
//! and the vector is L2-normalized. Buckets only accumulate, so cosine
//! scores between two texts are never negative. Terms are visited in sorted
//! order so the output is bit-for-bit stable across processes.

use std::collections::BTreeMap;

use popcast_core::errors::PopcastResult;
use popcast_core::traits::IEmbeddingProvider;

/// Pairs carry less weight than single words.
const BIGRAM_WEIGHT: f32 = 0.5;

const STOPWORDS: &[&str] = &[
    "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "in", "is", "it", "its",
    "of", "on", "or", "that", "the", "this", "to", "was", "were", "will", "with",
];

pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, term: &str) -> usize {
        let digest = blake3::hash(term.as_bytes());
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest.as_bytes()[..8]);
        (u64::from_le_bytes(word) % self.dimensions as u64) as usize
    }

    fn words(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() >= 2 && !STOPWORDS.contains(&w.as_str()))
            .collect()
    }

    /// Term weights before hashing, keyed in sorted order.
    fn terms(text: &str) -> BTreeMap<String, f32> {
        let words = Self::words(text);
        let mut counts: BTreeMap<String, f32> = BTreeMap::new();
        for w in &words {
            *counts.entry(w.clone()).or_default() += 1.0;
        }
        for pair in words.windows(2) {
            *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += BIGRAM_WEIGHT;
        }
        counts
            .into_iter()
            .map(|(term, count)| (term, 1.0 + count.ln()))
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        for (term, weight) in Self::terms(text) {
            vec[self.bucket(&term)] += weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> PopcastResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::vector_search::cosine_similarity;

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = HashingEmbedder::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn stopwords_alone_embed_to_zero() {
        let p = HashingEmbedder::new(64);
        assert!(p.embed("of the and").unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_unit_length() {
        let p = HashingEmbedder::new(384);
        let v = p.embed("birth incentive policy in Thailand").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn identical_across_instances_and_case() {
        let text = "Pandemic recovery lifts births; pandemic recovery slows deaths";
        let a = HashingEmbedder::new(8).embed(text).unwrap();
        let b = HashingEmbedder::new(8).embed(&text.to_uppercase()).unwrap();
        let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn word_order_matters_through_pairs() {
        let p = HashingEmbedder::new(1 << 16);
        let query = p.embed("birth rate decline").unwrap();
        let same_pair = p.embed("the birth rate fell").unwrap();
        let split_pair = p.embed("rate of birth fell").unwrap();
        assert!(cosine_similarity(&query, &same_pair) > cosine_similarity(&query, &split_pair));
    }

    #[test]
    fn batch_matches_single() {
        let p = HashingEmbedder::new(64);
        let texts = vec!["a policy".to_string(), "demographic change".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        assert_eq!(batch[1], p.embed("demographic change").unwrap());
    }
}
