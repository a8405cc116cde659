/// Indices that sort `values` ascending, the permutation consumed by
/// [`invert_bijection`].
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    indices
}

/// Invert a permutation of `0..len`.
///
/// For each value `x` at index `i` of the input, the output holds `i` at
/// index `x`. The input must contain every index below its length exactly
/// once; this is not checked.
pub fn invert_bijection(arr: &[usize]) -> Vec<usize> {
    let mut inverted = vec![0; arr.len()];
    for (index, &value) in arr.iter().enumerate() {
        inverted[value] = index;
    }

    inverted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_bijection() {
        assert_eq!(invert_bijection(&[0, 1, 2, 3]), vec![0, 1, 2, 3]);
        assert_eq!(invert_bijection(&[1, 2, 0, 3]), vec![2, 0, 1, 3]);
        assert_eq!(invert_bijection(&[1, 0, 2, 3]), vec![1, 0, 2, 3]);
        assert_eq!(invert_bijection(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_argsort() {
        assert_eq!(argsort(&[3.0, 1.0, 2.0]), vec![1, 2, 0]);
        assert_eq!(argsort(&[1.0, 2.0, 3.0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_argsort_inversion_gives_ranks() {
        let values = [0.3, -1.5, 2.0, 0.0];
        let ranks = invert_bijection(&argsort(&values));
        assert_eq!(ranks, vec![2, 0, 3, 1]);
    }
}
