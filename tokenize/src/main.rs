use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use nagare::analyzer::FeatureLayout;
use nagare::char_filter::PatternReplaceCharFilter;
use nagare::chunk::ChunkPolicy;
use nagare::common::{DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CHUNK_SIZE, DEFAULT_MAX_CHUNK_SIZE};
use nagare::errors::NagareError;
use nagare::filter::{KeywordMarkerFilter, MorphemeField, MorphemeFieldFilter};
use nagare::source::{CharSource, Utf8Source};
use nagare::token::{Token, TokenStream};
use nagare::{ChunkedTokenizer, VibratoAnalyzer};
use vibrato::{Dictionary, Tokenizer};

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Tokens,
    Wakati,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Layout {
    Ipadic,
    Unidic,
}

#[derive(Parser, Debug)]
#[clap(
    name = "tokenize",
    about = "Tokenizes text from stdin as one stream, chunk by chunk."
)]
struct Args {
    /// System dictionary (in zstd if the name ends with `.zst`).
    #[clap(short = 'i', long)]
    sysdic_in: PathBuf,

    /// Output mode.
    #[clap(short = 'O', long, value_enum, default_value = "tokens")]
    output_mode: OutputMode,

    /// Column layout of the feature strings in the dictionary.
    #[clap(short = 'L', long, value_enum, default_value = "ipadic")]
    layout: Layout,

    /// Keeps punctuation tokens.
    #[clap(short = 'P', long)]
    keep_punctuation: bool,

    /// Initial size of the chunk buffer in characters.
    #[clap(long, default_value_t = DEFAULT_INITIAL_CHUNK_SIZE)]
    initial_chunk_size: usize,

    /// Factor by which the chunk buffer grows.
    #[clap(long, default_value_t = DEFAULT_GROWTH_FACTOR)]
    growth_factor: usize,

    /// Maximum size of the chunk buffer in characters.
    #[clap(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    max_chunk_size: usize,

    /// Morpheme field written as the token text
    /// (surface, dictionary, normalized or reading).
    #[clap(short = 'f', long, value_parser = parse_field, default_value = "surface")]
    field: MorphemeField,

    /// Token text kept as is regardless of the field. Can be repeated.
    #[clap(short = 'k', long)]
    keyword: Vec<String>,

    /// Regular expression replaced in the input before tokenization.
    /// The whole input is buffered when specified.
    #[clap(short = 'p', long)]
    pattern: Option<String>,

    /// Replacement of the pattern.
    #[clap(short = 'r', long, default_value = "")]
    replacement: String,

    /// Ignores spaces from tokens.
    #[clap(short = 'S', long)]
    ignore_space: bool,

    /// Maximum length of unknown words.
    #[clap(short = 'M', long)]
    max_grouping_len: Option<usize>,
}

fn parse_field(field: &str) -> Result<MorphemeField, String> {
    field.parse().map_err(|e: NagareError| e.to_string())
}

fn load_dictionary(path: &Path) -> Result<Dictionary, Box<dyn Error>> {
    let is_zstd = path.extension().map_or(false, |ext| ext == "zst");
    let rdr: Box<dyn Read> = if is_zstd {
        Box::new(zstd::Decoder::new(File::open(path)?)?)
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    Ok(Dictionary::read(rdr)?)
}

fn write_token<W>(out: &mut W, token: &Token, mode: OutputMode) -> io::Result<()>
where
    W: Write,
{
    match mode {
        OutputMode::Tokens => {
            let (pos, reading) = token.morpheme.as_ref().map_or((String::new(), ""), |m| {
                (m.part_of_speech().join(","), m.reading_form())
            });
            writeln!(
                out,
                "{}\t{}\t{}\t{}..{}{}",
                token.text,
                pos,
                reading,
                token.offset_from,
                token.offset_to,
                if token.keyword { "\tkeyword" } else { "" }
            )
        }
        OutputMode::Wakati => write!(out, "{} ", token.text),
        OutputMode::Json => {
            serde_json::to_writer(&mut *out, token)?;
            writeln!(out)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = load_dictionary(&args.sysdic_in)?;
    let tokenizer = Tokenizer::new(dict)
        .ignore_space(args.ignore_space)?
        .max_grouping_len(args.max_grouping_len.unwrap_or(0));
    let layout = match args.layout {
        Layout::Ipadic => FeatureLayout::ipadic(),
        Layout::Unidic => FeatureLayout::unidic(),
    };
    let analyzer = VibratoAnalyzer::new(tokenizer).feature_layout(layout);

    let policy = ChunkPolicy::new(
        args.initial_chunk_size,
        args.growth_factor,
        args.max_chunk_size,
    )?;
    log::info!("chunk policy: {:?}", policy);

    let stdin = Utf8Source::new(io::stdin().lock());
    let input: Box<dyn CharSource> = match args.pattern.as_deref() {
        Some(pattern) => Box::new(PatternReplaceCharFilter::new(
            stdin,
            pattern,
            args.replacement.as_str(),
        )?),
        None => Box::new(stdin),
    };

    let mut tokenizer = ChunkedTokenizer::new(analyzer)
        .discard_punctuation(!args.keep_punctuation)
        .chunk_policy(policy);
    tokenizer.set_input(input);
    let marker = KeywordMarkerFilter::new(tokenizer, args.keyword);
    let mut stream = MorphemeFieldFilter::new(marker, args.field);
    eprintln!("Ready to tokenize");

    let mut out = BufWriter::new(io::stdout().lock());
    let mut num_tokens = 0;
    while let Some(token) = stream.next_token()? {
        write_token(&mut out, token, args.output_mode)?;
        num_tokens += 1;
    }
    let end = stream.end();
    match args.output_mode {
        OutputMode::Tokens => writeln!(out, "EOS\t{}..{}", end.start, end.end)?,
        OutputMode::Wakati => writeln!(out)?,
        OutputMode::Json => {}
    }
    out.flush()?;
    eprintln!("{num_tokens} tokens, final offset {}", end.end);

    Ok(())
}
