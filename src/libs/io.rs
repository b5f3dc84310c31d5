use anyhow::{bail, Context};
use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens `input` for buffered reading. `stdin` reads the standard input,
/// files ending in `.gz` are decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = recomb::reader("tests/seq/repeat.txt").unwrap();
/// assert_eq!(reader.lines().count(), 1);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Loads the sequence to scan.
///
/// FASTA input (first byte `>`) yields the sequence of the first record.
/// Anything else is read as plain text: the first line, without its line
/// terminator.
///
/// ```
/// let seq = recomb::read_sequence("tests/seq/repeat.txt").unwrap();
/// assert_eq!(seq, "ACGTACGT");
///
/// let seq = recomb::read_sequence("tests/seq/plasmid.fa").unwrap();
/// assert_eq!(seq.len(), 64);
/// ```
pub fn read_sequence(input: &str) -> anyhow::Result<String> {
    let mut reader = reader(input)?;

    let is_fasta = reader.fill_buf()?.first() == Some(&b'>');

    if is_fasta {
        let mut fa_in = noodles_fasta::io::Reader::new(reader);
        match fa_in.records().next() {
            Some(result) => {
                let record = result.with_context(|| format!("malformed FASTA in {}", input))?;
                let seq = String::from_utf8(record.sequence().as_ref().to_vec())?;
                Ok(seq)
            }
            None => bail!("no FASTA record in {}", input),
        }
    } else {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let seq = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(seq)
    }
}
