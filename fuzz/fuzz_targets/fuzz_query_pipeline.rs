#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lazyseq::{build_even_query, QueryBuilder, Sequence};

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i64>,
    modulus: i64,
    offset: i64,
    pulls: u8,
}

fuzz_target!(|input: Input| {
    // Limit length to prevent timeout
    if input.values.len() > 10_000 {
        return;
    }

    let seq = Sequence::new(input.values.clone());

    // Even query must match a plain filter, in order
    let expected: Vec<i64> = input.values.iter().copied().filter(|v| v % 2 == 0).collect();
    let query = build_even_query(Some(&seq)).unwrap();
    assert_eq!(query.collect_results().unwrap(), expected);

    // Pulling past the end never errors or repeats
    let mut execution = query.execute();
    let mut seen = Vec::new();
    for _ in 0..input.pulls {
        if let Some(value) = execution.try_next().unwrap() {
            seen.push(value);
        }
    }
    assert_eq!(seen.as_slice(), &expected[..seen.len()]);

    // Arbitrary filter + select stage
    let modulus = input.modulus.checked_abs().filter(|m| *m > 0).unwrap_or(1);
    let offset = input.offset;
    let query = QueryBuilder::new()
        .source(&seq)
        .filter(move |v| v % modulus == 0)
        .select(move |v| v.wrapping_add(offset))
        .build()
        .unwrap();
    let expected: Vec<i64> = input
        .values
        .iter()
        .copied()
        .filter(|v| v % modulus == 0)
        .map(|v| v.wrapping_add(offset))
        .collect();
    assert_eq!(query.collect_results().unwrap(), expected);
});
