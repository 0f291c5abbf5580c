//! Tree command implementation

use npm_unwrap::error::Result;

use crate::cli::{GlobalArgs, TreeArgs};
use crate::commands::helpers::load_tree;

/// Print the resolved tree, or only its unresolved modules
pub fn run(global: &GlobalArgs, args: &TreeArgs) -> Result<()> {
    let app = load_tree(&global.shrinkwrap, None)?;

    if args.unresolved {
        for id in npm_unwrap::classify(&app).unresolved {
            println!("{id}");
        }
    } else {
        print!("{}", app.render_tree());
    }
    Ok(())
}
