use clap::*;
use recomb::libs::window::CircularSeq;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("window")
        .about("Prints the circular window anchored at a position")
        .after_help(
            r###"
Windows running past the end of the sequence wrap to its start.
The window is printed in lowercase.

Notes:
* Positions are 0-based; --start may equal the sequence length (same as 0).
* --len may not exceed the sequence length.
* Reads from stdin if input file is 'stdin'

Examples:
1. The 20bp window at position 100:
   recomb window plasmid.fa -s 100 -l 20

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input sequence file to process"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .short('s')
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(usize))
                .help("Start position (0-based)"),
        )
        .arg(
            Arg::new("len")
                .long("len")
                .short('l')
                .num_args(1)
                .default_value("20")
                .value_parser(value_parser!(usize))
                .help("Window length"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let opt_start = *args.get_one::<usize>("start").unwrap();
    let opt_len = *args.get_one::<usize>("len").unwrap();

    let seq = recomb::read_sequence(infile)?;
    let window = CircularSeq::new(&seq).window_string(opt_start, opt_len)?;
    log::debug!("Window {}+{} of {} bases", opt_start, opt_len, seq.chars().count());

    let mut writer = recomb::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("{}\n", window))?;
    writer.flush()?;

    Ok(())
}
