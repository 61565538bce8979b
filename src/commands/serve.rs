//! Serve command: run the no-cache development file server

use crate::cli::ServeArgs;
use crate::error::Result;
use crate::server;

pub fn run(args: ServeArgs) -> Result<()> {
    server::serve(&args.dir, args.port)
}
