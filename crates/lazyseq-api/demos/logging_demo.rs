use lazyseq::logging::{LogConfig, LogFormat};
use lazyseq::{build_even_query, drain, Sequence, SourceProvider};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Trace level shows every visited element
    let _guard = LogConfig::trace().with_format(LogFormat::Compact).try_init()?;

    println!("=== lazyseq Logging Demo ===\n");

    let provider = SourceProvider::new();

    println!("1. Building query (no elements are read)...");
    let query = build_even_query(Some(provider.get_sequence()))?;

    println!("\n2. Executing query...");
    let count = drain(&mut query.execute(), |value| {
        println!("   got {}", value);
        Ok(())
    })?;
    println!("   {} results", count);

    println!("\n3. Executing again from a fresh cursor...");
    let results = query.collect_results()?;
    println!("   {:?}", results);

    println!("\n4. Executing over a dropped source...");
    let numbers = Sequence::new(vec![10, 11, 12]);
    let detached = numbers.downgrade();
    let late_query = build_even_query(Some(&detached))?;
    drop(numbers);
    match late_query.collect_results() {
        Ok(values) => println!("   unexpected results: {:?}", values),
        Err(e) => println!("   failed on first pull: {}", e),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
