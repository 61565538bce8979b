//! luapack - Lua module bundler
//!
//! Packages a tree of Lua source files into a single JavaScript artifact
//! holding the module-name-to-source mapping and the obfuscation preset
//! catalog, and provides a cache-defeating static file server for local
//! iteration.

use clap::Parser;

mod cli;
mod collector;
mod commands;
mod emitter;
mod error;
mod presets;
mod server;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bundle(args) => commands::bundle::run(args),
        Commands::Serve(args) => commands::serve::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
