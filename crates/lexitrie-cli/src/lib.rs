// lexitrie-cli: shared utilities for CLI tools.

use std::path::Path;
use std::process;

use lexitrie_core::TraversalLimits;
use lexitrie_format::header::DictionaryHeader;
use lexitrie_format::{DynamicTrieReader, ExtendableBuffer};
use lexitrie_traverse::{ReadingHelper, TraversalError, TrieStats};

/// Result of walking a dictionary file.
#[derive(Debug)]
pub struct WalkReport {
    pub header: DictionaryHeader,
    pub body_size: usize,
    pub stats: TrieStats,
    pub error: Option<TraversalError>,
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default of `lexitrie=info`; `quiet` lowers the
/// default to warnings only.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "lexitrie=warn" } else { "lexitrie=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load traversal limits from a JSON file. Missing fields keep their defaults.
pub fn load_limits(path: &Path) -> Result<TraversalLimits, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("failed to parse limits in {}: {}", path.display(), e))
}

/// Parse the header of `data` and walk the trie body in postorder.
pub fn walk_dictionary(data: &[u8], limits: TraversalLimits) -> Result<WalkReport, String> {
    let header =
        DictionaryHeader::parse(data).map_err(|e| format!("invalid dictionary header: {e}"))?;
    let body = header.body(data);
    tracing::info!(
        version = header.version,
        attributes = header.attributes.len(),
        body_size = body.len(),
        "loaded dictionary"
    );

    let buffer = ExtendableBuffer::new(body);
    let mut helper = ReadingHelper::with_limits(DynamicTrieReader::new(&buffer), limits);
    helper.init_with_node_array_pos(0);
    let mut stats = TrieStats::default();
    // TrieStats never stops the walk, so an incomplete walk means an error.
    let completed = helper.traverse_all_nodes_in_postorder_depth_first(&mut stats);
    debug_assert_eq!(completed, helper.error().is_none());

    Ok(WalkReport {
        body_size: body.len(),
        header,
        stats,
        error: helper.error().cloned(),
    })
}

/// Parse a `--limits-json=PATH` or `--limits-json PATH` argument.
///
/// Returns `(limits_path, remaining_args)`.
pub fn parse_limits_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut limits_path = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--limits-json=") {
            limits_path = Some(val.to_string());
        } else if arg == "--limits-json" {
            match iter.next() {
                Some(val) => limits_path = Some(val.clone()),
                None => fatal("--limits-json requires a value"),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (limits_path, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Header with no attributes followed by `body`.
    fn dictionary(body: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&lexitrie_format::header::MAGIC_NUMBER.to_be_bytes());
        data.extend_from_slice(&3u16.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&12u32.to_be_bytes());
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn limits_path_forms() {
        let (path, rest) = parse_limits_path(&args(&["--limits-json=a.json", "dict"]));
        assert_eq!(path.as_deref(), Some("a.json"));
        assert_eq!(rest, args(&["dict"]));

        let (path, rest) = parse_limits_path(&args(&["dict", "--limits-json", "b.json"]));
        assert_eq!(path.as_deref(), Some("b.json"));
        assert_eq!(rest, args(&["dict"]));
    }

    #[test]
    fn help_flag() {
        assert!(wants_help(&args(&["-h"])));
        assert!(!wants_help(&args(&["dict"])));
    }

    #[test]
    fn walk_small_dictionary() {
        // One root array with a single terminal leaf.
        let body = [0x01, 0xD0, 0x00, 0x00, 0x00, b'a', 10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let report = walk_dictionary(&dictionary(&body), TraversalLimits::default()).unwrap();
        assert!(report.error.is_none());
        assert_eq!(report.body_size, body.len());
        assert_eq!(report.stats.node_count, 1);
        assert_eq!(report.stats.terminal_count, 1);
    }

    #[test]
    fn walk_reports_corruption() {
        // Empty array linking to itself.
        let body = [0x00, 0x80, 0x00, 0x01];
        let limits = TraversalLimits::default().with_max_node_array_count(8);
        let report = walk_dictionary(&dictionary(&body), limits).unwrap();
        assert!(matches!(
            report.error,
            Some(TraversalError::NodeArrayCountOverflow { count: 9, limit: 8 })
        ));
    }

    #[test]
    fn walk_rejects_bad_header() {
        let err = walk_dictionary(&[0u8; 4], TraversalLimits::default()).unwrap_err();
        assert!(err.starts_with("invalid dictionary header"));
    }
}
