use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use md2doc::{Config, DirSource, Element};

#[derive(Parser)]
#[command(name = "md2doc")]
#[command(about = "Convert question Markdown files into styled PDF documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the Markdown sources; output is written here too
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Config file (defaults to md2doc.toml inside the source directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the parsed elements as JSON instead of writing a PDF
    #[arg(long, global = true, conflicts_with = "typst")]
    dump: bool,

    /// Print the generated Typst markup instead of writing a PDF
    #[arg(long, global = true)]
    typst: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert question-N.md into question-N.pdf
    Question {
        /// Question number
        #[arg(default_value_t = 3)]
        number: u32,
    },
    /// Combine every configured question file into one document
    Batch,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.dir.join("md2doc.toml"));
    let config = Config::load(&config_path);
    let source = DirSource::new(&cli.dir);

    // Collect elements and pick the output name
    let (elements, output_name) = match &cli.command {
        Command::Question { number } => {
            let name = md2doc::question_file_name(*number);
            match md2doc::single_document(&source, &name) {
                Ok(elements) => (elements, md2doc::question_output_name(*number)),
                Err(e) => fail(e),
            }
        }
        Command::Batch => {
            match md2doc::batch_document(&source, &config.batch.files, &config.batch.title) {
                Ok(elements) => (elements, config.batch.output.clone()),
                Err(e) => fail(e),
            }
        }
    };

    if cli.dump {
        match serde_json::to_string_pretty(&elements) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
        return;
    }
    if cli.typst {
        println!("{}", md2doc::elements_to_typst(&elements, &config));
        return;
    }

    write_pdf(&elements, &config, cli.dir.join(&output_name));
}

fn write_pdf(elements: &[Element], config: &Config, output: PathBuf) {
    let pdf_bytes = match md2doc::elements_to_pdf(elements, config) {
        Ok(bytes) => bytes,
        Err(e) => fail(e),
    };

    if let Err(e) = fs::write(&output, pdf_bytes) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    println!("Created: {}", output.display());
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("{error}");
    std::process::exit(1);
}
