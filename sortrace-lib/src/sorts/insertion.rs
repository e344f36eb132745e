//! Insertion sort step emitter.

use std::collections::BTreeSet;

use super::StepFn;

/// Sort `values` in place, emitting `{j, j-1}` before every order test and,
/// when a swap occurs, `{j, j+1}` again after the element has moved.
pub fn sort(values: &mut [u32], emit: &mut StepFn) {
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 {
            let highlighted: BTreeSet<usize> = [j, j - 1].into_iter().collect();
            emit(values, &highlighted);

            if values[j] < values[j - 1] {
                values.swap(j, j - 1);
                j -= 1;

                let highlighted: BTreeSet<usize> = [j, j + 1].into_iter().collect();
                emit(values, &highlighted);
            } else {
                break;
            }
        }
    }
}
