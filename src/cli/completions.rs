use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    npm-unwrap completions bash > ~/.bash_completion.d/npm-unwrap\n\n\
                  Generate zsh completions:\n    npm-unwrap completions zsh > ~/.zfunc/_npm-unwrap\n\n\
                  Generate fish completions:\n    npm-unwrap completions fish > ~/.config/fish/completions/npm-unwrap.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
