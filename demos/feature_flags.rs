//! Feature flags driven by the environment and command line.
//!
//! Try:
//!
//! ```sh
//! cargo run --example feature_flags
//! cargo run --example feature_flags -- -Tsearch 1
//! TOGGLEABLE_PRICING=2 cargo run --example feature_flags
//! ```

use hotswap_toggle::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let registry: ToggleRegistry = ToggleRegistry::builder()
        .with_default_env()
        .with_process_args()
        .build()?;

    // Activations may be queued before any feature code has registered
    registry.toggle("banner", 1)?;

    registry.add(
        "search",
        [
            variant(|| {
                println!("search: keyword index");
                Ok(())
            }),
            variant(|| {
                println!("search: semantic index");
                Ok(())
            }),
        ],
    )?;

    registry.add(
        "pricing",
        [
            variant(|| {
                println!("pricing: flat");
                Ok(())
            }),
            variant(|| {
                println!("pricing: tiered");
                Ok(())
            }),
            variant(|| Err("pricing: usage-based is not available in this region".into())),
        ],
    )?;

    for name in ["search", "pricing"] {
        if let Err(e) = registry.execute(name)? {
            eprintln!("{} failed: {}", name, e);
        }
    }

    let banner = registry.run(
        "banner",
        [
            variant(|| {
                println!("banner: hidden");
                Ok(())
            }),
            variant(|| {
                println!("banner: shown");
                Ok(())
            }),
        ],
    )?;
    if let Err(e) = banner {
        eprintln!("banner failed: {}", e);
    }

    if let Err(e) = registry.toggle("search", 7) {
        println!("rejected: {}", e);
    }

    println!("{:#?}", registry.snapshot());
    Ok(())
}
