//! Balanced contiguous partitioning.
//!
//! Piece `i` of `n` is `list[len * i / n .. len * (i + 1) / n]`. Pieces are
//! contiguous, concatenate back to the input, and differ in length by at
//! most one. When `len < n` some pieces are empty.

use std::num::NonZeroUsize;

/// Split `list` into `pieces` contiguous, near-equal slices.
pub fn split_indices<T>(list: &[T], pieces: NonZeroUsize) -> Vec<&[T]> {
    let n = pieces.get();
    let len = list.len();
    (0..n)
        .map(|i| {
            let (start, end) = piece_bounds(len, i, n);
            &list[start..end]
        })
        .collect()
}

// Widened so `len * (i + 1)` cannot overflow; both bounds stay <= len.
fn piece_bounds(len: usize, i: usize, n: usize) -> (usize, usize) {
    let bound = |k: usize| (len as u128 * k as u128 / n as u128) as usize;
    (bound(i), bound(i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_even_split() {
        let list: Vec<u32> = (0..6).collect();
        let parts = split_indices(&list, nz(3));
        assert_eq!(parts, vec![&[0, 1][..], &[2, 3][..], &[4, 5][..]]);
    }

    #[test]
    fn test_uneven_split_sizes() {
        let list: Vec<u32> = (0..10).collect();
        let sizes: Vec<usize> = split_indices(&list, nz(4)).iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![2, 3, 2, 3]);
    }

    #[test]
    fn test_more_pieces_than_items() {
        let list = [7u32, 8];
        let parts = split_indices(&list, nz(4));
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.concat(), vec![7, 8]);
        assert_eq!(parts.iter().filter(|p| p.is_empty()).count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let list: [u32; 0] = [];
        let parts = split_indices(&list, nz(3));
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_piece_bounds_do_not_overflow() {
        let n = 1 << 20;
        assert_eq!(piece_bounds(usize::MAX, n - 1, n).1, usize::MAX);
        let (start, end) = piece_bounds(usize::MAX, 1, 2);
        assert_eq!(end, usize::MAX);
        assert!(start <= end);
    }

    #[test]
    fn test_single_piece_is_whole() {
        let list: Vec<u32> = (0..5).collect();
        assert_eq!(split_indices(&list, nz(1)), vec![&list[..]]);
    }
}
