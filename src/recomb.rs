extern crate clap;
use clap::*;

mod cmd_recomb;

fn main() -> anyhow::Result<()> {
    let app = Command::new("recomb")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`recomb` - Recombination site checker for circular DNA")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v info, -vv debug)"),
        )
        .subcommand(cmd_recomb::scan::make_subcommand())
        .subcommand(cmd_recomb::window::make_subcommand())
        .after_help(
            r###"Subcommands:

* scan   - Report pairs of positions sharing homologous windows
* window - Print the circular window at one position

Logging goes to stderr. RUST_LOG overrides -v.

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("scan", sub_matches)) => cmd_recomb::scan::execute(sub_matches),
        Some(("window", sub_matches)) => cmd_recomb::window::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
