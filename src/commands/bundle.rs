//! Bundle command: collect modules, emit the artifact, report the manifest

use console::Style;

use crate::cli::BundleArgs;
use crate::error::Result;
use crate::{collector, emitter, presets};

pub fn run(args: BundleArgs) -> Result<()> {
    let modules = collector::collect(&args.root, &args.suffix)?;
    let catalog = presets::catalog();

    emitter::emit(&modules, &catalog, &args.out)?;

    println!(
        "{} {} with {} modules",
        Style::new().bold().green().apply_to("Generated"),
        args.out.display(),
        modules.len(),
    );
    for name in emitter::sorted_names(&modules) {
        println!("  - {name}");
    }

    Ok(())
}
