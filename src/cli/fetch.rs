use clap::Parser;

/// Arguments for the fetch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Warm the cache before going offline:\n    npm-unwrap fetch\n\n\
                   Use a shared cache:\n    npm-unwrap fetch --cache-dir /var/cache/npm-unwrap")]
pub struct FetchArgs {
    /// Ask the registry for tarballs of modules without a resolved URL
    #[arg(long)]
    pub resolve_missing: bool,
}
