use clap::Parser;
use todo::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = todo::tui::run(cli.dir.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
