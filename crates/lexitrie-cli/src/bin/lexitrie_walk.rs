// lexitrie-walk: Walk a dictionary file and print trie statistics.
//
// Parses the dictionary header, then visits every PtNode of the trie body in
// postorder. Exits with status 1 if the file cannot be read, the header is
// invalid or the trie structure is corrupt.
//
// Usage:
//   lexitrie-walk [OPTIONS] FILE
//
// Options:
//   --limits-json PATH   JSON file overriding traversal ceilings
//   -q, --quiet          Only log warnings
//   -h, --help           Print help

use std::io::{self, Write};
use std::path::Path;

use lexitrie_core::TraversalLimits;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (limits_path, args) = lexitrie_cli::parse_limits_path(&args);

    if lexitrie_cli::wants_help(&args) {
        println!("lexitrie-walk: Walk a dictionary file and print trie statistics.");
        println!();
        println!("Usage: lexitrie-walk [OPTIONS] FILE");
        println!();
        println!("Options:");
        println!("  --limits-json PATH   JSON file overriding traversal ceilings");
        println!("  -q, --quiet          Only log warnings");
        println!("  -h, --help           Print this help");
        return;
    }

    let quiet = args.iter().any(|a| a == "-q" || a == "--quiet");
    lexitrie_cli::init_logging(quiet);

    let Some(path) = args.iter().find(|a| !a.starts_with('-')) else {
        lexitrie_cli::fatal("missing dictionary FILE argument");
    };

    let limits = match limits_path {
        Some(p) => lexitrie_cli::load_limits(Path::new(&p)).unwrap_or_else(|e| lexitrie_cli::fatal(&e)),
        None => TraversalLimits::default(),
    };

    let data = std::fs::read(path)
        .unwrap_or_else(|e| lexitrie_cli::fatal(&format!("failed to read {path}: {e}")));
    let report = lexitrie_cli::walk_dictionary(&data, limits).unwrap_or_else(|e| lexitrie_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let _ = writeln!(out, "version:    {}", report.header.version);
    let _ = writeln!(out, "attributes: {}", report.header.attributes.len());
    let _ = writeln!(out, "body bytes: {}", report.body_size);
    let _ = writeln!(out, "nodes:      {}", report.stats.node_count);
    let _ = writeln!(out, "terminals:  {}", report.stats.terminal_count);
    let _ = writeln!(out, "deleted:    {}", report.stats.deleted_count);
    let _ = writeln!(out, "levels:     {}", report.stats.level_count);
    let _ = writeln!(out, "max depth:  {}", report.stats.max_depth);
    let _ = out.flush();
    drop(out);

    if let Some(error) = report.error {
        lexitrie_cli::fatal(&format!("corrupt dictionary: {error}"));
    }
}
