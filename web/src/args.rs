use clap::Parser;

/// Options read from the location fragment, e.g. `#-vv&--segment=2&--seed=7`.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Force a layout seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Which segment of the square pool to draw from
    #[arg(long)]
    pub segment: Option<u32>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Default::default(),
            seed: None,
            segment: None,
        }
    }
}

impl Args {
    /// Parses the fragment, falling back to defaults so a mangled link still
    /// loads. The parse error is handed back for logging once a logger exists.
    pub(crate) fn from_fragment_or_default(fragment: &str) -> (Self, Option<clap::Error>) {
        match Self::from_fragment(fragment) {
            Ok(args) => (args, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub(crate) fn from_fragment(fragment: &str) -> Result<Self, clap::Error> {
        // the leading empty chunk stands in for the binary name
        let chunks = fragment.split(['#', '&']).filter(|chunk| !chunk.is_empty());
        Self::try_parse_from(std::iter::once("").chain(chunks))
    }
}

fn is_board_arg(chunk: &str) -> bool {
    chunk.starts_with("--seed") || chunk.starts_with("--segment") || chunk.starts_with("-s")
}

/// Rewrites `fragment` so it pins the current layout, keeping unrelated flags.
pub(crate) fn with_board_args(fragment: &str, segment: u32, seed: u64) -> String {
    let mut chunks: Vec<String> = fragment
        .trim_start_matches('#')
        .split('&')
        .filter(|chunk| !chunk.is_empty() && !is_board_arg(chunk))
        .map(str::to_string)
        .collect();
    chunks.push(format!("--segment={segment}"));
    chunks.push(format!("--seed={seed}"));
    format!("#{}", chunks.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_parses_to_defaults() {
        let args = Args::from_fragment("").unwrap();

        assert_eq!(args.seed, None);
        assert_eq!(args.segment, None);
    }

    #[test]
    fn fragment_flags_are_parsed() {
        let args = Args::from_fragment("#-vv&--segment=3&--seed=99").unwrap();

        assert_eq!(args.seed, Some(99));
        assert_eq!(args.segment, Some(3));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn bad_seed_is_rejected() {
        assert!(Args::from_fragment("#--seed=soon").is_err());
    }

    #[test]
    fn bad_fragment_falls_back_to_defaults() {
        let (args, err) = Args::from_fragment_or_default("#--seed=abc&--segment=2");

        assert!(err.is_some());
        assert_eq!(args.seed, None);
        assert_eq!(args.segment, None);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn good_fragment_has_no_error() {
        let (args, err) = Args::from_fragment_or_default("#--segment=2");

        assert!(err.is_none());
        assert_eq!(args.segment, Some(2));
    }

    #[test]
    fn bare_hash_is_not_an_argument() {
        assert!(Args::from_fragment("#").is_ok());
        assert!(Args::from_fragment("#&&-v").is_ok());
    }

    #[test]
    fn board_args_replace_previous_ones() {
        assert_eq!(
            with_board_args("#-v&--seed=1&--segment=2", 4, 5),
            "#-v&--segment=4&--seed=5"
        );
        assert_eq!(with_board_args("", 1, 0), "#--segment=1&--seed=0");
    }

    #[test]
    fn written_fragment_parses_back() {
        let args = Args::from_fragment(&with_board_args("#-v", 2, 1234)).unwrap();

        assert_eq!(args.segment, Some(2));
        assert_eq!(args.seed, Some(1234));
    }
}
