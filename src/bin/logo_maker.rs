use clap::Parser;
use media_maker::cli::{logo, LogoCli};
use media_maker::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = match LogoCli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit 1; --help and --version exit 0
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let printer = Printer::new().with_verbose(cli.verbose);
    logo::run(cli, &printer)?;

    Ok(())
}
