/// Even Query Demo
///
/// Builds the even-number query over the default data set, then executes it
/// and prints each result on its own line.
use lazyseq::logging::LogConfig;
use lazyseq::run_even_query_demo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout only carries the results
    let _guard = LogConfig::warn().try_init()?;

    let stdout = std::io::stdout();
    run_even_query_demo(stdout.lock())?;

    Ok(())
}
