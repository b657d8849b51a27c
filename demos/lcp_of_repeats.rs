use skewsa::{SuffixArrayConstruction, ThreadCount};

fn main() {
    // a short word repeated many times has very long common prefixes between its suffixes
    let text = b"abcab".repeat(200);

    // the LCP array is requested on the builder, before running the construction
    let res = SuffixArrayConstruction::for_text(&text)
        .in_owned_buffer32()
        .multi_threaded(ThreadCount::rayon_default())
        .with_lcp()
        .run()
        .unwrap();

    // the suffixes that start with the same rotation of the word are adjacent in the suffix array,
    // and each one shares everything but the last period with its neighbor
    let max_lcp = res.lcp().iter().max().copied().unwrap_or(0);
    println!("Text length: {}", text.len());
    println!("Longest common prefix of adjacent suffixes: {max_lcp}");

    let (suffix_array, lcp, _) = res.into_parts();

    println!("First suffixes: {:?}", &suffix_array[..10]);
    println!("Their LCPs: {:?}", &lcp[..9]);
}
