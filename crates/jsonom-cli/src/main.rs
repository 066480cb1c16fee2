//! `jsonom` CLI — reformat and inspect JSON through the order-preserving
//! object model.
//!
//! ## Usage
//!
//! ```sh
//! # Compact a document, keeping key order and number literals (stdin → stdout)
//! echo '{ "b": 1.50, "a": [1, 2] }' | jsonom fmt
//!
//! # Compact from file to file
//! jsonom fmt -i data.json -o data.min.json
//!
//! # Compact every document in a concatenated stream, one per line
//! cat events.jsonl | jsonom fmt --all
//!
//! # Count objects, arrays, values, nesting depth and distinct keys
//! jsonom stats -i data.json
//!
//! # List the root object's keys in document order
//! jsonom keys -i data.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jsonom_core::{
    decode, decode_tokens, encode_to_string, Lexer, MapInterner, Node, NodeKind, PathAdapter,
    PathModel,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jsonom",
    version,
    about = "Order-preserving JSON reformatter and inspector"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and re-encode as compact JSON, keeping key order and number text
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reformat every concatenated document instead of only the first
        #[arg(long)]
        all: bool,
    },
    /// Show document statistics (node counts, depth, distinct keys)
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the root object's keys, one per line, in document order
    Keys {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { input, output, all } => {
            let json = read_input(input.as_deref())?;
            let formatted = if all {
                format_all(&json)?
            } else {
                match decode(&json, None).context("Failed to decode JSON")? {
                    Some(node) => format!("{}\n", encode(&node)?),
                    None => String::new(),
                }
            };
            write_output(output.as_deref(), &formatted)?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let mut interner = MapInterner::new();
            let node = decode(&json, Some(&mut interner)).context("Failed to decode JSON")?;
            let mut stats = Stats::default();
            if let Some(node) = &node {
                stats.visit(node, 0);
            }
            println!("Objects:     {}", stats.objects);
            println!("Arrays:      {}", stats.arrays);
            println!("Values:      {}", stats.values);
            println!("Max depth:   {}", stats.max_depth);
            println!("Unique keys: {}", interner.len());
        }
        Commands::Keys { input } => {
            let json = read_input(input.as_deref())?;
            let Some(node) = decode(&json, None).context("Failed to decode JSON")? else {
                return Ok(());
            };
            let model = PathAdapter::new(&node);
            let root = model.root();
            if model.kind(root) != NodeKind::Object {
                bail!("Root value is not an object");
            }
            for key in model.keys(root) {
                println!("{key}");
            }
        }
    }

    Ok(())
}

/// Re-encode each document of a concatenated stream on its own line. Keys
/// are interned once for the whole stream.
fn format_all(json: &[u8]) -> Result<String> {
    let mut lexer = Lexer::from_slice(json);
    let mut interner = MapInterner::new();
    let mut out = String::new();
    let mut count = 0usize;
    while let Some(node) = decode_tokens(&mut lexer, Some(&mut interner))
        .with_context(|| format!("Failed to decode JSON document {}", count + 1))?
    {
        out.push_str(&encode(&node)?);
        out.push('\n');
        count += 1;
    }
    Ok(out)
}

fn encode(node: &Node) -> Result<String> {
    encode_to_string(node).context("Failed to encode JSON")
}

/// Node counts gathered by a depth-first walk. Containers count one level of
/// depth each; a scalar root has depth 0.
#[derive(Debug, Default)]
struct Stats {
    objects: usize,
    arrays: usize,
    values: usize,
    max_depth: usize,
}

impl Stats {
    fn visit(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Object(obj) => {
                self.objects += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for pair in obj {
                    self.visit(pair.value(), depth + 1);
                }
            }
            Node::Array(arr) => {
                self.arrays += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for elem in arr {
                    self.visit(elem, depth + 1);
                }
            }
            Node::Value(_) => self.values += 1,
        }
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
