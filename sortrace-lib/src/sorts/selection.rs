//! Selection sort step emitter.

use std::collections::BTreeSet;

use super::StepFn;

/// Sort `values` in place, emitting `{min_index, j}` for every candidate
/// comparison and, when the outer pass ends in a swap, `{i, min_index}`
/// once before and once after the exchange.
pub fn sort(values: &mut [u32], emit: &mut StepFn) {
    for i in 0..values.len() {
        let mut min_index = i;

        for j in (i + 1)..values.len() {
            let highlighted: BTreeSet<usize> = [min_index, j].into_iter().collect();
            emit(values, &highlighted);

            if values[j] < values[min_index] {
                min_index = j;
            }
        }

        if i != min_index {
            let highlighted: BTreeSet<usize> = [i, min_index].into_iter().collect();
            emit(values, &highlighted);

            values.swap(i, min_index);

            emit(values, &highlighted);
        }
    }
}
