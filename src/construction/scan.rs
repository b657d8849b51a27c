use rayon::prelude::*;

const BLOCK_LEN: usize = 1 << 14;

/// Replaces every element by the combination of itself and all elements before it and returns the
/// combination of all elements.
///
/// `combine` has to be associative with `identity` as its neutral element. Blocks are reduced in
/// parallel, the block totals are scanned sequentially and then every block is rescanned in
/// parallel starting from its carry.
pub(crate) fn inclusive_scan<T, F>(data: &mut [T], identity: T, combine: F) -> T
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let block_totals: Vec<T> = data
        .par_chunks(BLOCK_LEN)
        .map(|block| block.iter().fold(identity, |acc, &x| combine(acc, x)))
        .collect();

    let mut total = identity;
    let carries: Vec<T> = block_totals
        .into_iter()
        .map(|block_total| {
            let carry = total;
            total = combine(total, block_total);
            carry
        })
        .collect();

    data.par_chunks_mut(BLOCK_LEN)
        .zip(carries.into_par_iter())
        .for_each(|(block, carry)| {
            let mut acc = carry;
            for x in block {
                acc = combine(acc, *x);
                *x = acc;
            }
        });

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let mut data: Vec<u32> = Vec::new();
        assert_eq!(inclusive_scan(&mut data, 0, |a, b| a + b), 0);
    }

    #[test]
    fn prefix_sums_across_blocks() {
        let n = 3 * BLOCK_LEN + 17;
        let mut data = vec![1u64; n];

        let total = inclusive_scan(&mut data, 0, |a, b| a + b);

        assert_eq!(total, n as u64);
        assert!(data.iter().enumerate().all(|(i, &x)| x == i as u64 + 1));
    }

    #[test]
    fn running_maximum() {
        let mut data = vec![3, 1, 4, 1, 5, 9, 2, 6];

        let total = inclusive_scan(&mut data, 0, |a: i32, b| a.max(b));

        assert_eq!(total, 9);
        assert_eq!(data, vec![3, 3, 4, 4, 5, 9, 9, 9]);
    }
}
