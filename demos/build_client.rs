//! Builds a scanning service client and filters file names.
//!
//! This example shows how to:
//! - Resolve a named configuration through a `ConfigSet`
//! - Inspect the retry policy attached to the client
//! - Select files to submit with an include/exclude filter
//!
//! Run with: cargo run --example build_client

use clamav_client::prelude::*;

const CONFIG: &str = r#"
[clamav.default]
service_url = "http://localhost:8080"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let configs = ConfigSet::from_toml_str(CONFIG)?;
    let client = build_client(EndpointSource::named("default"), Some(&configs))?;

    println!("Service: {}", client.base_url());
    println!("Scan route: {}", client.routes().scan());

    let policy = client.retry_policy();
    println!(
        "Retries: total={} connect={} read={} backoff_factor={}",
        policy.total, policy.connect, policy.read, policy.backoff_factor
    );
    for errors in 1..=4 {
        println!("  wait after {} failures: {:?}", errors, policy.backoff_for(errors));
    }

    let filter = FilterSpec::new()
        .with_include(r".*\.(tar\.gz|zip|jar)")
        .with_exclude(r"debug-.*")
        .with_flags(PatternFlags::IGNORECASE)
        .compile()?;

    for name in ["release.tar.gz", "debug-build.zip", "README.md", "app.JAR"] {
        let verdict = if filter.matches(name) { "scan" } else { "skip" };
        println!("{name}: {verdict}");
    }

    // Mutually exclusive inputs are checked before anything is resolved.
    if let Err(e) = EndpointSource::from_parts(Some("default"), Some("http://localhost:8080")) {
        println!("Rejected: {e}");
    }

    Ok(())
}
