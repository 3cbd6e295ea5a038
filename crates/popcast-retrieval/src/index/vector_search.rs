//! Brute-force cosine similarity over stored embeddings.

use rusqlite::{params, Connection};

use popcast_core::errors::PopcastResult;

use crate::document::ContextDocument;
use crate::to_storage_err;

/// Documents for `country` scored against `query_embedding`, descending,
/// keeping only scores above `min_score`, at most `limit`.
pub fn search_vector(
    conn: &Connection,
    country: &str,
    query_embedding: &[f32],
    limit: usize,
    min_score: f64,
) -> PopcastResult<Vec<(ContextDocument, f64)>> {
    let query_norm_sq: f64 = query_embedding.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 || limit == 0 {
        return Ok(vec![]);
    }

    let mut stmt = conn
        .prepare(
            "SELECT country, title, url, content, embedding, dimensions
             FROM documents
             WHERE country = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![country], |row| {
            Ok((
                ContextDocument {
                    country: row.get(0)?,
                    title: row.get(1)?,
                    url: row.get(2)?,
                    content: row.get(3)?,
                },
                row.get::<_, Vec<u8>>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored = Vec::new();
    for row in rows {
        let (doc, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_embedding.len() {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let sim = cosine_similarity(query_embedding, &stored);
        if sim > min_score {
            scored.push((doc, sim));
        }
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

/// f32 slice to little-endian bytes.
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
