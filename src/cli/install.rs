use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install next to the shrinkwrap file:\n    npm-unwrap install\n\n\
                   Install into a build directory:\n    npm-unwrap install -s app/npm-shrinkwrap.json --dest build/app\n\n\
                   Skip install scripts:\n    npm-unwrap install --ignore-scripts")]
pub struct InstallArgs {
    /// Directory that receives node_modules
    #[arg(long, short = 'd', value_name = "DIR", default_value = ".")]
    pub dest: PathBuf,

    /// Ask the registry for tarballs of modules without a resolved URL
    #[arg(long)]
    pub resolve_missing: bool,

    /// Do not run install scripts or native builds
    #[arg(long)]
    pub ignore_scripts: bool,
}
