use skewsa::{
    RadixStrategy, SuffixArrayConstruction, ThreadCount,
    instrumentation::{Phase, Timings},
};

mod common;

use common::*;

#[test]
fn banana() {
    let res = SuffixArrayConstruction::for_text(b"banana".as_slice())
        .in_owned_buffer32()
        .single_threaded()
        .with_lcp()
        .run()
        .expect("construction should run without an error");

    assert_eq!(res.suffix_array(), &[5, 3, 1, 0, 4, 2]);
    assert_eq!(res.lcp(), &[1, 3, 0, 0, 2]);
}

#[test]
fn degenerate_sizes() {
    let (suffix_array, lcp) = skewsa::build_suffix_array_with_lcp::<u8>(&[]).unwrap();
    assert!(suffix_array.is_empty());
    assert!(lcp.is_empty());

    let (suffix_array, lcp) = skewsa::build_suffix_array_with_lcp(b"q").unwrap();
    assert_eq!(suffix_array, vec![0]);
    assert!(lcp.is_empty());

    let (suffix_array, lcp) = skewsa::build_suffix_array_with_lcp(b"aa").unwrap();
    assert_eq!(suffix_array, vec![1, 0]);
    assert_eq!(lcp, vec![1]);
}

#[test]
fn one_symbol_repeated() {
    let (suffix_array, lcp) = skewsa::build_suffix_array_with_lcp(b"aaaa").unwrap();
    assert_eq!(suffix_array, vec![3, 2, 1, 0]);
    assert_eq!(lcp, vec![1, 2, 3]);

    let text = vec![b'a'; 1000];
    let (suffix_array, lcp) = skewsa::build_suffix_array_with_lcp(&text).unwrap();

    assert_eq!(suffix_array, (0..1000).rev().collect::<Vec<usize>>());
    assert_eq!(lcp, (1..1000).collect::<Vec<usize>>());
}

#[test]
fn random_texts() {
    for (seed, &(len, alphabet_size)) in [(2, 2), (50, 2), (999, 3), (25_000, 4), (25_000, 200)]
        .iter()
        .enumerate()
    {
        let text = random_text(len, alphabet_size, 100 + seed as u64);

        let res = SuffixArrayConstruction::for_text(&text)
            .in_owned_buffer32()
            .multi_threaded(ThreadCount::rayon_default())
            .with_lcp()
            .run()
            .unwrap();

        assert!(is_suffix_array(&text, res.suffix_array()));
        assert!(is_lcp_array(&text, res.suffix_array(), res.lcp()));
    }
}

#[test]
fn long_repeats_use_sample_lcp() {
    // LCPs far above the direct probe length, resolved through the recursion
    for (block_len, len) in [(1, 3000), (2, 3001), (7, 5000), (100, 12_345)] {
        let text = repeated_block(block_len, len, block_len as u64);

        let res = SuffixArrayConstruction::for_text(&text)
            .in_owned_buffer64()
            .multi_threaded(ThreadCount::fixed(2))
            .with_lcp()
            .run()
            .unwrap();

        assert!(is_suffix_array(&text, res.suffix_array()));
        assert!(is_lcp_array(&text, res.suffix_array(), res.lcp()));
    }
}

#[test]
fn radix_strategies_agree() {
    let text = repeated_block(13, 8000, 21);

    let (packed_sa, packed_lcp) = SuffixArrayConstruction::for_text(&text)
        .in_owned_buffer32()
        .single_threaded()
        .with_lcp()
        .run()
        .unwrap()
        .into_vecs();
    let (three_pass_sa, three_pass_lcp) = SuffixArrayConstruction::for_text(&text)
        .in_owned_buffer32()
        .single_threaded()
        .with_lcp()
        .with_radix_strategy(RadixStrategy::AlwaysThreePass)
        .run()
        .unwrap()
        .into_vecs();

    assert_eq!(packed_sa, three_pass_sa);
    assert_eq!(packed_lcp, three_pass_lcp);
}

#[test]
fn borrowed_buffer_with_lcp() {
    let text = b"yabbadabbado";
    let mut buffer = vec![0u64; text.len()];

    let res = SuffixArrayConstruction::for_text(text.as_slice())
        .in_borrowed_buffer(&mut buffer)
        .multi_threaded(ThreadCount::fixed(2))
        .with_lcp()
        .run()
        .unwrap();

    assert!(is_lcp_array(text, res.suffix_array(), res.lcp()));

    let (suffix_array, lcp, _) = res.into_parts();
    assert_eq!(suffix_array.len(), text.len());
    assert_eq!(lcp.len(), text.len() - 1);
}

#[test]
fn instrumentation_times_lcp_phase() {
    let text = repeated_block(5, 6_000, 8);
    let mut timings = Timings::new();

    let res = SuffixArrayConstruction::for_text(&text)
        .in_owned_buffer32()
        .multi_threaded(ThreadCount::rayon_default())
        .with_lcp()
        .with_instrumentation(&mut timings)
        .run()
        .unwrap();

    assert!(is_lcp_array(&text, res.suffix_array(), res.lcp()));
    assert!(timings.total(Phase::Lcp) > std::time::Duration::ZERO);
}

#[test]
fn repeats_of_a_short_word() {
    let text = b"abcab".repeat(200);

    let res = SuffixArrayConstruction::for_text(&text)
        .in_owned_buffer32()
        .multi_threaded(ThreadCount::rayon_default())
        .with_lcp()
        .run()
        .unwrap();

    assert!(is_lcp_array(&text, res.suffix_array(), res.lcp()));
    assert_eq!(
        res.lcp().iter().max().copied(),
        Some(text.len() as u32 - 5)
    );
}
