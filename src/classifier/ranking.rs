use crate::classifier::interface::ClassificationResult;
use std::cmp::Ordering;

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max_score = scores.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_sum: f32 = scores.iter().map(|&x| (x - max_score).exp()).sum();

    scores
        .iter()
        .map(|&x| (x - max_score).exp() / exp_sum)
        .collect()
}

/// Pairs each probability with the label at the same index and keeps the `k`
/// most probable. Equal probabilities keep their original index order.
pub fn rank(probabilities: &[f32], labels: &[String], k: usize) -> Vec<ClassificationResult> {
    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();

    indexed.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    indexed.truncate(k);

    indexed
        .into_iter()
        .map(|(idx, probability)| ClassificationResult {
            label: labels
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("class_{}", idx)),
            probability,
        })
        .collect()
}

/// `"n02099601-golden_retriever"` becomes `"Golden retriever"`.
pub fn clean_label(label: &str) -> String {
    let name = match label.split_once('-') {
        Some((_, rest)) => rest,
        None => label,
    };
    let name = name.replace('_', " ");

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_probability(probability: f32) -> String {
    format!("{:.2}%", probability * 100.0)
}
