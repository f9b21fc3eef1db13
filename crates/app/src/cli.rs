use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Start serving without first checking that the search backend answers.
    #[arg(long, default_value_t = false)]
    pub skip_backend_check: bool,
}
