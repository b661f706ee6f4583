use simple_matrix::Matrix;
use std::iter;

/// Dynamic time warping over two sequences.
///
/// The first row and column accumulate along their single predecessor, every other
/// cell takes the cheapest of its three neighbours.
pub struct Dtw<T: Copy> {
    state_m: usize,
    state_n: usize,
    distance_fn: fn(T, T) -> f32,
    distance_cost_matrix: Option<Matrix<f32>>,
}
impl<T: Copy> Dtw<T> {
    /// Accumulated cost of the optimal alignment, infinity when a sequence is empty.
    pub fn compute_optimal_path(&mut self, first_sequence: &[T], second_sequence: &[T]) -> f32 {
        self.state_m = first_sequence.len();
        self.state_n = second_sequence.len();
        if self.state_m == 0 || self.state_n == 0 {
            self.distance_cost_matrix = None;
            return f32::INFINITY;
        }
        let mut distance_cost_matrix: Matrix<f32> =
            Matrix::from_iter(self.state_m, self.state_n, iter::repeat(f32::INFINITY));
        distance_cost_matrix.set(
            0,
            0,
            (self.distance_fn)(first_sequence[0], second_sequence[0]),
        );
        for (row_index, first_sequence_item) in first_sequence.iter().enumerate().skip(1) {
            let cost = (self.distance_fn)(*first_sequence_item, second_sequence[0]);
            let previous = cell(&distance_cost_matrix, row_index - 1, 0);
            distance_cost_matrix.set(row_index, 0, cost + previous);
        }
        for (column_index, second_sequence_item) in second_sequence.iter().enumerate().skip(1) {
            let cost = (self.distance_fn)(first_sequence[0], *second_sequence_item);
            let previous = cell(&distance_cost_matrix, 0, column_index - 1);
            distance_cost_matrix.set(0, column_index, cost + previous);
        }
        for (row_index, first_sequence_item) in first_sequence.iter().enumerate().skip(1) {
            for (column_index, second_sequence_item) in
                second_sequence.iter().enumerate().skip(1)
            {
                let cost = (self.distance_fn)(*first_sequence_item, *second_sequence_item);
                let insertion = cell(&distance_cost_matrix, row_index - 1, column_index);
                let deletion = cell(&distance_cost_matrix, row_index, column_index - 1);
                let matches = cell(&distance_cost_matrix, row_index - 1, column_index - 1);
                let min_value = [insertion, deletion, matches]
                    .iter()
                    .fold(f32::INFINITY, |a, &b| a.min(b));
                distance_cost_matrix.set(row_index, column_index, cost + min_value);
            }
        }
        self.distance_cost_matrix = Some(distance_cost_matrix);
        self.get_cost(self.state_m - 1, self.state_n - 1)
            .unwrap_or(f32::INFINITY)
    }
    /// Accumulated cost at a cell of the last computed matrix.
    pub fn get_cost(&self, row_index: usize, column_index: usize) -> Option<f32> {
        self.distance_cost_matrix
            .as_ref()
            .and_then(|matrix| matrix.get(row_index, column_index).copied())
    }
    pub fn new(distance_fn: fn(T, T) -> f32) -> Dtw<T> {
        Dtw {
            state_m: 0,
            state_n: 0,
            distance_fn,
            distance_cost_matrix: None,
        }
    }
}
fn cell(matrix: &Matrix<f32>, row_index: usize, column_index: usize) -> f32 {
    matrix
        .get(row_index, column_index)
        .copied()
        .unwrap_or(f32::INFINITY)
}

#[cfg(test)]
fn absolute_distance(a: f32, b: f32) -> f32 {
    (a - b).abs()
}

#[test]
fn aligns_identical_sequences_without_cost() {
    let mut dtw = Dtw::new(absolute_distance);
    let sequence = [1., 2., 3., 2., 1.];
    assert_eq!(dtw.compute_optimal_path(&sequence, &sequence), 0.);
}

#[test]
fn accumulates_boundaries_along_a_single_predecessor() {
    let mut dtw = Dtw::new(absolute_distance);
    let cost = dtw.compute_optimal_path(&[0., 1., 2.], &[0., 2.]);
    // first column: 0, 1, 3; first row: 0, 2
    assert_eq!(dtw.get_cost(1, 0), Some(1.));
    assert_eq!(dtw.get_cost(2, 0), Some(3.));
    assert_eq!(dtw.get_cost(0, 1), Some(2.));
    // (1, 1): |1 - 2| + min(2, 1, 0)
    assert_eq!(dtw.get_cost(1, 1), Some(1.));
    // (2, 1): |2 - 2| + min(1, 3, 1)
    assert_eq!(cost, 1.);
}

#[test]
fn warps_repeated_items() {
    let mut dtw = Dtw::new(absolute_distance);
    let cost = dtw.compute_optimal_path(&[1., 1., 2., 3.], &[1., 2., 2., 2., 3.]);
    assert_eq!(cost, 0.);
}

#[test]
fn empty_sequences_cost_infinity() {
    let mut dtw = Dtw::new(absolute_distance);
    assert_eq!(dtw.compute_optimal_path(&[], &[1.]), f32::INFINITY);
    assert_eq!(dtw.get_cost(0, 0), None);
}
