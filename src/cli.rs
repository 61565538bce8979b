//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// luapack - Lua module bundler
#[derive(Parser, Debug)]
#[command(
    name = "luapack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundle a tree of Lua modules into a single embeddable JavaScript artifact",
    long_about = "luapack packages a directory of Lua source files into one JavaScript file \
                  declaring the module mapping and the obfuscation preset catalog, ready to be \
                  loaded by an in-browser Lua runtime.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  luapack bundle\n    \
                  luapack bundle --root prometheus-obfuscator/src --out lua-bundle.js\n    \
                  luapack serve --port 5000"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect modules and emit the bundle artifact
    Bundle(BundleArgs),

    /// Serve the working directory over HTTP with caching disabled
    Serve(ServeArgs),
}

/// Arguments for the bundle command
#[derive(Parser, Debug)]
pub struct BundleArgs {
    /// Root directory to scan for modules
    #[arg(long, default_value = "prometheus-obfuscator/src")]
    pub root: PathBuf,

    /// Destination artifact file
    #[arg(long, default_value = "lua-bundle.js")]
    pub out: PathBuf,

    /// Source file suffix to recognize
    #[arg(long, default_value = crate::collector::DEFAULT_SUFFIX)]
    pub suffix: String,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Directory to serve
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,
}
