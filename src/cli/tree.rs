use clap::Parser;

/// Arguments for the tree command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Only list modules without a resolved URL
    #[arg(long)]
    pub unresolved: bool,
}
