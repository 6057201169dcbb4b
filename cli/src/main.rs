mod corpus;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use corpus::{load_corpus, InputDoc};
use quarry_core::{cosine_similarity, Analyzer, Bm25Params, InvertedIndex, StopwordRegistry, DEFAULT_LANGUAGE};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Build an in-memory inverted index and rank documents with BM25", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a corpus and rank its documents against a query
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query text
        #[arg(long, short)]
        query: String,
        /// Number of hits to print (0 prints only the hit count)
        #[arg(long, default_value_t = 10)]
        top_k: usize,
        /// BM25 term-frequency saturation, >= 0
        #[arg(long, default_value_t = quarry_core::bm25::DEFAULT_K1, value_parser = parse_k1)]
        k1: f64,
        /// BM25 length-normalization strength, in [0, 1]
        #[arg(long, default_value_t = quarry_core::bm25::DEFAULT_B, value_parser = parse_b)]
        b: f64,
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print corpus and vocabulary statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Number of highest-DF terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Cosine similarity of two comma-separated vectors
    Cosine {
        #[arg(long, allow_hyphen_values = true)]
        a: String,
        #[arg(long, allow_hyphen_values = true)]
        b: String,
    },
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (.txt/.json/.jsonl file or a directory)
    #[arg(long, short)]
    input: PathBuf,
    /// Stopword language code
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    lang: String,
    /// JSON file of extra stopword sets: {"<lang>": ["word", ...]}
    #[arg(long)]
    stopwords: Option<PathBuf>,
}

#[derive(Serialize)]
struct SearchHit<'a> {
    doc_id: u32,
    score: f64,
    title: Option<&'a str>,
    text: &'a str,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    query_terms: Vec<String>,
    took_s: f64,
    total_hits: usize,
    results: Vec<SearchHit<'a>>,
}

#[derive(Serialize)]
struct StatsResponse<'a> {
    language: &'a str,
    num_docs: usize,
    num_terms: usize,
    average_document_length: f64,
    top_terms: Vec<TermStat<'a>>,
}

#[derive(Serialize)]
struct TermStat<'a> {
    term: &'a str,
    df: u32,
    idf: f64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, top_k, k1, b, json } => {
            search(&corpus, &query, top_k, Bm25Params { k1, b }, json)
        }
        Commands::Stats { corpus, top, json } => stats(&corpus, top, json),
        Commands::Cosine { a, b } => {
            let a = parse_vector(&a).context("parsing --a")?;
            let b = parse_vector(&b).context("parsing --b")?;
            println!("{:.6}", cosine_similarity(&a, &b)?);
            Ok(())
        }
    }
}

fn open_index(args: &CorpusArgs) -> Result<(Vec<InputDoc>, InvertedIndex)> {
    let mut registry = StopwordRegistry::builtin();
    if let Some(path) = &args.stopwords {
        load_stopwords(&mut registry, path)?;
    }
    let analyzer = Analyzer::new(&registry, &args.lang)?;
    let docs = load_corpus(&args.input)?;
    let start = std::time::Instant::now();
    let index = InvertedIndex::build_with(docs.iter().map(|d| d.text.as_str()), &analyzer)?;
    tracing::info!(
        num_docs = index.corpus_size(),
        num_terms = index.num_terms(),
        took_s = start.elapsed().as_secs_f64(),
        "index built"
    );
    Ok((docs, index))
}

fn load_stopwords(registry: &mut StopwordRegistry, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let sets: HashMap<String, Vec<String>> =
        serde_json::from_str(&text).with_context(|| format!("parsing stopwords file {}", path.display()))?;
    for (lang, words) in sets {
        tracing::debug!(%lang, words = words.len(), "registering stopwords");
        registry.register(lang, words);
    }
    Ok(())
}

fn search(args: &CorpusArgs, query: &str, top_k: usize, params: Bm25Params, json: bool) -> Result<()> {
    let (docs, index) = open_index(args)?;
    let response = rank_hits(&docs, &index, query, top_k, params);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    println!("query terms: {:?} ({} hits)", response.query_terms, response.total_hits);
    for hit in &response.results {
        let label = hit.title.unwrap_or(hit.text);
        println!("{:>10.4}  #{:<5} {}", hit.score, hit.doc_id, label);
    }
    Ok(())
}

fn rank_hits<'a>(docs: &'a [InputDoc], index: &InvertedIndex, query: &'a str, top_k: usize, params: Bm25Params) -> SearchResponse<'a> {
    let start = std::time::Instant::now();
    let result = index.search(query);
    let ranked = result.rank(index, params);
    let took_s = start.elapsed().as_secs_f64();

    let results: Vec<SearchHit> = ranked
        .iter()
        .take(top_k)
        .map(|hit| {
            let doc = &docs[hit.id as usize];
            SearchHit { doc_id: hit.id, score: hit.score, title: doc.title.as_deref(), text: &doc.text }
        })
        .collect();
    SearchResponse { query, query_terms: result.query_terms, took_s, total_hits: ranked.len(), results }
}

fn stats(args: &CorpusArgs, top: usize, json: bool) -> Result<()> {
    let (_docs, index) = open_index(args)?;
    let response = collect_stats(&index, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    println!(
        "docs: {}  terms: {}  avg length: {:.2}  language: {}",
        response.num_docs, response.num_terms, response.average_document_length, response.language
    );
    for t in &response.top_terms {
        println!("{:>6}  {:>8.4}  {}", t.df, t.idf, t.term);
    }
    Ok(())
}

/// Highest-DF terms first, alphabetical on ties.
fn collect_stats(index: &InvertedIndex, top: usize) -> StatsResponse<'_> {
    let mut terms: Vec<(&str, u32)> = index.document_frequency().iter().map(|(t, &df)| (t.as_str(), df)).collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let top_terms: Vec<TermStat> = terms
        .into_iter()
        .take(top)
        .map(|(term, df)| TermStat { term, df, idf: index.idf(term) })
        .collect();
    StatsResponse {
        language: index.analyzer().language(),
        num_docs: index.corpus_size(),
        num_terms: index.num_terms(),
        average_document_length: index.average_document_length(),
        top_terms,
    }
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    if !v.is_finite() {
        return Err(format!("{s:?} is not finite"));
    }
    Ok(v)
}

fn parse_k1(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if v < 0.0 {
        return Err(format!("k1 must be >= 0, got {v}"));
    }
    Ok(v)
}

fn parse_b(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(format!("b must be within [0, 1], got {v}"));
    }
    Ok(v)
}

fn parse_vector(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().with_context(|| format!("invalid number {p:?}")))
        .collect()
}
