//! One dimensional Gaussian smoothing used on section curves.

/// Convolve `values` with a sampled Gaussian of standard deviation `sigma`.
///
/// The kernel is truncated at four standard deviations and normalized to unit
/// sum. Samples beyond the ends are mirrored including the edge sample
/// (`d c b a | a b c d | d c b a`).
pub fn gaussian_filter1d(values: &[f64], sigma: f64) -> Vec<f64> {
    if values.is_empty() || sigma <= 0.0 {
        return values.to_vec();
    }

    let radius = (4.0 * sigma + 0.5) as usize;
    let weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let d = i as f64 - radius as f64;
            (-0.5 * d * d / (sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();

    let n = values.len() as isize;
    (0..n)
        .map(|i| {
            weights
                .iter()
                .enumerate()
                .map(|(k, w)| w * values[reflect(i + k as isize - radius as isize, n)])
                .sum::<f64>()
                / total
        })
        .collect()
}

fn reflect(mut index: isize, len: isize) -> usize {
    let period = 2 * len;
    index = index.rem_euclid(period);
    if index >= len {
        index = period - 1 - index;
    }
    index as usize
}
