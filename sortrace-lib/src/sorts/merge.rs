//! Merge sort step emitter.

use std::collections::BTreeSet;

use super::StepFn;

/// Sort `values` in place, emitting the full range when a merge begins,
/// `{left, right}` before every cross-run comparison, and the destination
/// index as each merged element is written back.
pub fn sort(values: &mut [u32], emit: &mut StepFn) {
    if values.len() < 2 {
        return;
    }
    sort_range(values, 0, values.len() - 1, emit);
}

fn sort_range(values: &mut [u32], low: usize, high: usize, emit: &mut StepFn) {
    debug_assert!(low <= high);
    if low < high {
        let mid = (low + high) / 2;
        sort_range(values, low, mid, emit);
        sort_range(values, mid + 1, high, emit);
        merge(values, low, mid, high, emit);
    }
}

fn merge(values: &mut [u32], low: usize, mid: usize, high: usize, emit: &mut StepFn) {
    debug_assert!(low <= mid && mid <= high);
    let mut merged = Vec::with_capacity(high - low + 1);
    let mut left = low;
    let mut right = mid + 1;

    let highlighted: BTreeSet<usize> = (low..=high).collect();
    emit(values, &highlighted);

    while left <= mid && right <= high {
        let highlighted: BTreeSet<usize> = [left, right].into_iter().collect();
        emit(values, &highlighted);

        if values[left] <= values[right] {
            merged.push(values[left]);
            left += 1;
        } else {
            merged.push(values[right]);
            right += 1;
        }
    }

    while left <= mid {
        merged.push(values[left]);
        left += 1;
    }

    while right <= high {
        merged.push(values[right]);
        right += 1;
    }

    for (offset, &value) in merged.iter().enumerate() {
        let index = low + offset;
        values[index] = value;
        let highlighted: BTreeSet<usize> = [index].into_iter().collect();
        emit(values, &highlighted);
    }
}
