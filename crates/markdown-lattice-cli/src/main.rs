//! Command-line inspector: dump trees, lexemes and header occurrences for a
//! Markdown file. A debugging aid, not part of the library surface.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_lattice_bridge::{
    index_headers, Document, DocumentParser, ElementTypeRegistry, IndexSink, ParseCache,
    TokenStream,
};
use markdown_lattice_syntax::Flavour;

#[derive(Parser)]
#[command(name = "markdown-lattice", version, about = "Inspect Markdown parse results")]
struct Cli {
    /// Parse with plain CommonMark instead of the GFM-like default
    #[arg(long, global = true)]
    commonmark: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generic AST (block pass only, content holders unexpanded)
    Tree { path: PathBuf },
    /// Print the target tree after replay through the tree builder
    Replay { path: PathBuf },
    /// Print the flat lexeme stream
    Tokens { path: PathBuf },
    /// Print the header occurrences the index would receive
    Headers { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let flavour = if cli.commonmark {
        Flavour::commonmark()
    } else {
        Flavour::gfm()
    };

    match cli.command {
        Command::Tree { path } => {
            let text = read(&path)?;
            let ast = markdown_lattice_syntax::parse(&flavour, &text);
            print!("{}", ast.dump(&text));
        }
        Command::Replay { path } => {
            let text = read(&path)?;
            let (_registry, document) = parse_document(text, flavour)?;
            println!("{:#?}", document.tree());
        }
        Command::Tokens { path } => {
            let text = read(&path)?;
            let cache = ParseCache::new();
            let registry = Arc::new(ElementTypeRegistry::new());
            let stream = TokenStream::new(&cache, &registry, &flavour, &text);
            for lexeme in stream.lexemes() {
                println!(
                    "{:?}@{}..{} {:?}",
                    lexeme.kind,
                    lexeme.range.start,
                    lexeme.range.end,
                    &text[lexeme.range.clone()]
                );
            }
        }
        Command::Headers { path } => {
            let text = read(&path)?;
            let (registry, document) = parse_document(text, flavour)?;
            let mut sink = PrintSink;
            index_headers(&registry, document.tree(), &mut sink);
        }
    }
    Ok(())
}

fn parse_document(
    text: String,
    flavour: Flavour,
) -> Result<(Arc<ElementTypeRegistry>, Document)> {
    let registry = Arc::new(ElementTypeRegistry::new());
    let parser = DocumentParser::new(Arc::clone(&registry));
    let cache = ParseCache::new();
    let document = Document::parse(&parser, &cache, text, Some(flavour))?;
    Ok((registry, document))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

struct PrintSink;

impl IndexSink for PrintSink {
    fn occurrence(&mut self, key: &str, text: &str) {
        println!("{key}: {text}");
    }
}
