use clap::*;
use recomb::libs::homology::{self, ScanOpts};
use recomb::libs::window::CircularSeq;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("scan")
        .about("Scans a circular sequence for potential recombination sites")
        .after_help(
            r###"
This command compares the window anchored at every position with every window
at least --len bases downstream. A pair is reported when the number of identical
positions is at least len * percent.

Output format (tab-separated, 0-based positions):
    left    right
    left    right    left_window    right_window    (with --show-seq)

Notes:
* The sequence is circular: windows near the end wrap to the start.
* Case is ignored. Windows are printed in lowercase.
* Plain text input: the first line is the sequence.
* FASTA input: the first record is used.
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Run time and the number of sites are logged with -v

Examples:
1. Exact 20bp repeats:
   recomb scan plasmid.txt -l 20 -p 1.0

2. 90% identity over 30bp, with the matched windows:
   recomb scan plasmid.fa -l 30 -p 0.9 --show-seq

3. Use 4 threads:
   recomb scan plasmid.fa -l 30 -p 0.9 --parallel 4

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input sequence file to process"),
        )
        .arg(
            Arg::new("len")
                .long("len")
                .short('l')
                .num_args(1)
                .default_value("20")
                .value_parser(value_parser!(usize))
                .help("Minimum homology length for recombination"),
        )
        .arg(
            Arg::new("percent")
                .long("percent")
                .short('p')
                .num_args(1)
                .default_value("1.0")
                .value_parser(value_parser!(f64))
                .help("Fraction (0-1) of the homology length that must match"),
        )
        .arg(
            Arg::new("show_seq")
                .long("show-seq")
                .action(ArgAction::SetTrue)
                .help("Also print the two matched windows of each site"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
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
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt_len = *args.get_one::<usize>("len").unwrap();
    let opt_percent = *args.get_one::<f64>("percent").unwrap();
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    let is_show_seq = args.get_flag("show_seq");

    if !(0.0..=1.0).contains(&opt_percent) {
        log::warn!(
            "Match percent {} is outside 0-1, every or no pair will be reported",
            opt_percent
        );
    }

    //----------------------------
    // Ops
    //----------------------------
    let seq = recomb::read_sequence(infile)?;
    let circ = CircularSeq::new(&seq);
    let opts = ScanOpts::new(opt_len, opt_percent);
    log::info!(
        "Scanning {} bases, homology length {}, match threshold {}",
        circ.len(),
        opts.homology_len,
        opts.threshold()
    );

    let start = std::time::Instant::now();
    let sites = if opt_parallel > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opt_parallel)
            .build()?;
        pool.install(|| homology::scan_parallel(&circ, opts))?
    } else {
        homology::scan_circular(&circ, opts)?
    };
    log::info!("Potential recombination sites: {}", sites.len());
    log::info!("Scan run time: {:?}", start.elapsed());

    //----------------------------
    // Output
    //----------------------------
    // Opened after the scan, a failed run keeps an existing outfile
    let mut writer = recomb::writer(args.get_one::<String>("outfile").unwrap())?;
    for site in &sites {
        if is_show_seq {
            let left = circ.window_string(site.left, opts.homology_len)?;
            let right = circ.window_string(site.right, opts.homology_len)?;
            writer.write_fmt(format_args!("{}\t{}\t{}\n", site, left, right))?;
        } else {
            writer.write_fmt(format_args!("{}\n", site))?;
        }
    }
    writer.flush()?;

    Ok(())
}
