//! Quick sort step emitter (Lomuto partition, last-element pivot).

use std::collections::BTreeSet;

use super::StepFn;

/// Sort `values` in place, emitting `{j, high, i}` before every pivot
/// comparison, `{i, j}` after every element swap, and `{i, high}` after the
/// final pivot swap of a partition.
pub fn sort(values: &mut [u32], emit: &mut StepFn) {
    if values.len() < 2 {
        return;
    }
    sort_range(values, 0, values.len() - 1, emit);
}

fn sort_range(values: &mut [u32], low: usize, high: usize, emit: &mut StepFn) {
    debug_assert!(low <= high);
    if low < high {
        let pivot_index = partition(values, low, high, emit);
        if pivot_index > low {
            sort_range(values, low, pivot_index - 1, emit);
        }
        if pivot_index < high {
            sort_range(values, pivot_index + 1, high, emit);
        }
    }
}

fn partition(values: &mut [u32], low: usize, high: usize, emit: &mut StepFn) -> usize {
    debug_assert!(low <= high);
    let pivot = values[high];
    let mut i = low;

    for j in low..high {
        let highlighted: BTreeSet<usize> = [j, high, i].into_iter().collect();
        emit(values, &highlighted);

        if values[j] < pivot {
            if i != j {
                values.swap(i, j);
                let highlighted: BTreeSet<usize> = [i, j].into_iter().collect();
                emit(values, &highlighted);
            }
            i += 1;
        }
    }

    if i != high {
        values.swap(i, high);
        let highlighted: BTreeSet<usize> = [i, high].into_iter().collect();
        emit(values, &highlighted);
    }

    i
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{hl, run_counting, trace};
    use super::super::Algorithm;

    #[test]
    fn emits_comparison_swap_and_pivot_steps() {
        let steps = trace(Algorithm::Quick, &[3, 1, 2]);
        let highlights: Vec<_> = steps.iter().map(|(_, set)| set.clone()).collect();

        let expected = vec![
            hl(&[0, 2]),    // compare values[0] against pivot 2
            hl(&[0, 1, 2]), // compare values[1] against pivot 2
            hl(&[0, 1]),    // swap 3 <-> 1 into the low side
            hl(&[1, 2]),    // final pivot swap
        ];
        assert_eq!(highlights, expected);
        assert_eq!(steps.last().unwrap().0, vec![1, 2, 3]);
    }

    #[test]
    fn two_element_swap_emits_pivot_exchange_only() {
        let steps = trace(Algorithm::Quick, &[2, 1]);
        let highlights: Vec<_> = steps.iter().map(|(_, set)| set.clone()).collect();
        assert_eq!(highlights, vec![hl(&[0, 1]), hl(&[0, 1])]);
        assert_eq!(steps[1].0, vec![1, 2]);
    }

    #[test]
    fn sorts_inputs_with_duplicates() {
        let (sorted, _) = run_counting(Algorithm::Quick, &[4, 2, 4, 1, 2, 4]);
        assert_eq!(sorted, vec![1, 2, 2, 4, 4, 4]);
    }
}
