//! Synthetic distance matrix generation, for tests and ad hoc
//! benchmarking.

use rand::Rng;

/// Generate a random symmetric N×N distance matrix with a zero diagonal,
/// flattened column-major (matching the on-disk format `load_distance_matrix`
/// expects).
pub fn random_distance_matrix(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut upper = vec![0.0_f64; n * n];

    for j in 0..n {
        for i in 0..j {
            let d: f64 = rng.gen_range(0.1..10.0);
            upper[i + j * n] = d;
            upper[j + i * n] = d;
        }
    }

    upper
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_symmetric_with_zero_diagonal() {
        let n = 6;
        let m = random_distance_matrix(n);
        for j in 0..n {
            assert_eq!(m[j + j * n], 0.0);
            for i in 0..n {
                assert_eq!(m[i + j * n], m[j + i * n]);
            }
        }
    }
}
