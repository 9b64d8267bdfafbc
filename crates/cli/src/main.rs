//! `rdf-closure`: a command-line front end for the deductive closure engine.
//!
//! Reads one or more RDF documents (or stdin), closes the merged graph under
//! the requested entailment regime, and writes the result back out.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use rdf_io::{NTriplesParser, RDFFormat};
use reasoning::{Closure, ClosureOptions, Regime};
use storage::Graph;

mod serialize;

/// Compute the deductive closure of one or more RDF graphs.
#[derive(Debug, Parser)]
#[command(name = "rdf-closure", version, about)]
struct Cli {
    /// Input files to close (merged into a single graph). Omit to read
    /// `-f`/stdin only.
    files: Vec<PathBuf>,

    /// Apply the RDFS entailment rules.
    #[arg(long = "rdfs", short = 'w', value_name = "yes|no", default_value = "no")]
    rdfs: YesNo,

    /// Apply the OWL 2 RL profile rules.
    #[arg(long = "owlrl", short = 'r', value_name = "yes|no", default_value = "no")]
    owlrl: YesNo,

    /// Apply the `owl:hasSelf`/`owl:rational`/restricted-datatype extension
    /// rules on top of the combined regime (implies `--owlrl` and `--rdfs`).
    #[arg(long = "extras", short = 'e', value_name = "yes|no", default_value = "no")]
    extras: YesNo,

    /// Inject the static RDFS/OWL-RL axiomatic triple tables.
    #[arg(long = "axioms", short = 'a', value_name = "yes|no", default_value = "no")]
    axioms: YesNo,

    /// Inject the datatype D-axioms (datatype subsumption + typing).
    #[arg(long = "daxioms", short = 'd', value_name = "yes|no", default_value = "no")]
    daxioms: YesNo,

    /// Prune tautological and axiomatic-noise triples from the output.
    #[arg(long = "trimming", short = 't', value_name = "yes|no", default_value = "no")]
    trimming: YesNo,

    /// Shorthand for `--rdfs=yes --owlrl=yes --extras=yes --trimming=yes
    /// --axioms=yes --daxioms=yes`.
    #[arg(long = "maximal", short = 'm')]
    maximal: bool,

    /// Output serialisation.
    #[arg(short = 'o', long = "output", value_enum, default_value = "turtle")]
    output: OutputFormat,

    /// Input format; `auto` detects from file extension.
    #[arg(short = 'i', long = "input", value_enum, default_value = "auto")]
    input: InputFormat,

    /// Read from this file instead of (or in addition to) the positional
    /// `files`; `-` means stdin.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum YesNo {
    Yes,
    No,
}

impl YesNo {
    fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Turtle,
    Json,
    Xml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum InputFormat {
    Auto,
    Turtle,
    Xml,
    Rdfa,
    Json,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already set");
    }

    if let Err(e) = run(Cli::parse()) {
        eprintln!("rdf-closure: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut graph = Graph::new();
    let mut any_input = false;

    for path in &cli.files {
        load_into(&mut graph, Source::Path(path), cli.input)?;
        any_input = true;
    }
    if let Some(file) = &cli.file {
        if file == "-" {
            load_into(&mut graph, Source::Stdin, cli.input)?;
        } else {
            load_into(&mut graph, Source::Path(Path::new(file)), cli.input)?;
        }
        any_input = true;
    }
    if !any_input {
        bail!("no input: pass one or more FILES, or -f FILE (-f - for stdin)");
    }

    info!(triples = graph.len(), "loaded input graph");

    let options = build_options(&cli);
    let report = Closure::new(options)
        .close(graph)
        .context("closure did not reach a fixed point")?;

    info!(
        triples = report.graph.len(),
        cycles = report.cycles,
        errors = report.errors.len(),
        "closure complete"
    );
    for e in &report.errors {
        eprintln!("rdf-closure: reasoning error: {e}");
    }

    let out = serialize::serialize(&report.graph, cli.output)?;
    std::io::stdout()
        .write_all(out.as_bytes())
        .context("writing output")?;
    Ok(())
}

fn build_options(cli: &Cli) -> ClosureOptions {
    let (rdfs, owlrl, extras, trimming, axioms, daxioms) = if cli.maximal {
        (true, true, true, true, true, true)
    } else {
        (
            cli.rdfs.is_yes(),
            cli.owlrl.is_yes(),
            cli.extras.is_yes(),
            cli.trimming.is_yes(),
            cli.axioms.is_yes(),
            cli.daxioms.is_yes(),
        )
    };

    let regime = if extras {
        Regime::Extension
    } else if rdfs && owlrl {
        Regime::Combined
    } else if owlrl {
        Regime::Owl2Rl
    } else {
        Regime::Rdfs
    };

    ClosureOptions::new(regime)
        .with_axioms(axioms)
        .with_datatype_axioms(daxioms)
        .with_trimming(trimming)
}

enum Source<'a> {
    Path(&'a Path),
    Stdin,
}

fn load_into(graph: &mut Graph, source: Source<'_>, requested: InputFormat) -> Result<()> {
    let (content, format) = match source {
        Source::Path(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let format = match requested {
                InputFormat::Auto => detect_format(path)?,
                other => to_rdf_format(other)?,
            };
            (content, format)
        }
        Source::Stdin => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("reading stdin")?;
            let format = match requested {
                InputFormat::Auto => RDFFormat::Turtle,
                other => to_rdf_format(other)?,
            };
            (content, format)
        }
    };

    let triples = match format {
        RDFFormat::Turtle => rdf_io::TurtleParser::new()
            .parse(&content)
            .context("parsing turtle input")?,
        RDFFormat::NTriples => NTriplesParser::new()
            .parse(&content)
            .context("parsing n-triples input")?,
        other => bail!("{other:?} input is not yet supported"),
    };
    for t in triples {
        graph.insert(&t);
    }
    Ok(())
}

fn to_rdf_format(input: InputFormat) -> Result<RDFFormat> {
    match input {
        InputFormat::Turtle => Ok(RDFFormat::Turtle),
        InputFormat::Xml => bail!("RDF/XML input is not yet supported"),
        InputFormat::Rdfa => bail!("RDFa input is not yet supported"),
        InputFormat::Json => bail!("JSON-LD input is not yet supported"),
        InputFormat::Auto => unreachable!("auto is resolved by extension before reaching here"),
    }
}

fn detect_format(path: &Path) -> Result<RDFFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ttl") => Ok(RDFFormat::Turtle),
        Some("nt") => Ok(RDFFormat::NTriples),
        Some("nq") => Ok(RDFFormat::NQuads),
        Some("trig") => Ok(RDFFormat::TriG),
        Some("jsonld") | Some("json") => Ok(RDFFormat::JSONLD),
        Some("rdf") | Some("owl") | Some("xml") => Ok(RDFFormat::RDFXML),
        _ => bail!(
            "cannot auto-detect input format for {}; pass -i explicitly",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximal_flag_overrides_individual_toggles() {
        let cli = Cli::parse_from(["rdf-closure", "--maximal"]);
        let options = build_options(&cli);
        assert_eq!(format!("{options:?}").contains("Extension"), true);
    }

    #[test]
    fn owlrl_alone_selects_owl2rl_regime() {
        let cli = Cli::parse_from(["rdf-closure", "--owlrl=yes"]);
        let options = build_options(&cli);
        assert!(format!("{options:?}").contains("Owl2Rl"));
    }

    #[test]
    fn rdfs_and_owlrl_together_select_combined_regime() {
        let cli = Cli::parse_from(["rdf-closure", "--rdfs=yes", "--owlrl=yes"]);
        let options = build_options(&cli);
        assert!(format!("{options:?}").contains("Combined"));
    }

    #[test]
    fn detect_format_reads_the_extension() {
        assert!(matches!(detect_format(Path::new("a.ttl")).unwrap(), RDFFormat::Turtle));
        assert!(matches!(detect_format(Path::new("a.nt")).unwrap(), RDFFormat::NTriples));
        assert!(detect_format(Path::new("a")).is_err());
    }
}
