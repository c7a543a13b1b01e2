use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flashdeck::backend::PdfBackend;
use flashdeck::builder::DeckBuilder;
use flashdeck::model::{Deck, Flashcard, Topic};
use log::info;

/// Renders flashcard decks to printable PDF files.
///
/// Set `RUST_LOG=debug` to trace deck assembly.
#[derive(Parser)]
#[command(author, version, about = "Render flashcard decks to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON deck file (`{"topic": {..}, "flashcards": [..]}`).
    Render {
        /// Path to the deck file.
        input: PathBuf,

        /// Output PDF path.
        #[arg(short, long, default_value = "flashcards.pdf")]
        output: PathBuf,

        /// Document title stored in the PDF metadata.
        #[arg(long)]
        title: Option<String>,

        /// Add an outline with one entry per card.
        #[cfg(feature = "bookmarks")]
        #[arg(long)]
        bookmarks: bool,
    },

    /// Render a small built-in demo deck.
    #[command(name = "sample", aliases = ["demo"])]
    Sample {
        /// Output PDF path.
        #[arg(short, long, default_value = "sample_deck.pdf")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            title,
            #[cfg(feature = "bookmarks")]
            bookmarks,
        } => {
            let builder = DeckBuilder::new();
            #[cfg(feature = "bookmarks")]
            let builder = builder.with_bookmarks(bookmarks);
            render_file(&builder, &input, &output, title)
        }
        Commands::Sample { output } => {
            let (topic, flashcards) = sample_deck();
            let backend = PdfBackend::new().with_title("Biologia Celular");
            write_deck(&DeckBuilder::new(), &backend, &flashcards, &topic, &output)
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render_file(
    builder: &DeckBuilder,
    input: &Path,
    output: &Path,
    title: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let deck = Deck::from_json(&fs::read_to_string(input)?)?;

    let mut backend = PdfBackend::for_layout(builder.layout());
    if let Some(title) = title.or_else(|| deck.topic.name().map(str::to_owned)) {
        backend = backend.with_title(title);
    }

    write_deck(builder, &backend, &deck.flashcards, &deck.topic, output)
}

fn write_deck(
    builder: &DeckBuilder,
    backend: &PdfBackend,
    flashcards: &[Flashcard],
    topic: &Topic,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let bytes = builder.render(backend, flashcards, topic)?;
    fs::write(output, &bytes)?;
    info!(
        "Wrote {} pages to {}",
        1 + 2 * flashcards.len(),
        output.display()
    );
    println!("Generated {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn sample_deck() -> (Topic, Vec<Flashcard>) {
    let topic = Topic::new()
        .with_name("Biologia Celular")
        .with_description("Conceitos fundamentais sobre a estrutura e o funcionamento das células.");

    let flashcards = vec![
        Flashcard::new()
            .with_title("Célula")
            .with_question("O que é uma célula?")
            .with_answer("A unidade básica estrutural e funcional de todos os seres vivos."),
        Flashcard::new()
            .with_title("Mitocôndria")
            .with_question("Qual é a principal função da mitocôndria?")
            .with_answer(
                "Produzir a maior parte da energia química necessária para alimentar as \
                 reações bioquímicas da célula, armazenada na forma de ATP.",
            ),
        Flashcard::new()
            .with_title("Membrana plasmática")
            .with_question("Qual estrutura controla a entrada e saída de substâncias da célula?")
            .with_answer("A membrana plasmática, uma bicamada lipídica seletivamente permeável."),
    ];

    (topic, flashcards)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
