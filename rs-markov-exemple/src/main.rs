use rs_markov_core::model::builder::{self, TokenKind};
use rs_markov_core::model::chain_model::ChainModel;
use rs_markov_core::model::generator::{Selection, SentenceGenerator};
use rs_markov_core::model::random::{Lexicographic, RngSource};
use rs_markov_core::model::store::ModelStore;

/// Tags a pre-normalized sentence the way the external tokenizer would:
/// whitespace-separated tokens, single-character non-terminator symbols
/// marked as punctuation.
fn tag(sentence: &str) -> Vec<(String, TokenKind)> {
    sentence
        .split_whitespace()
        .map(|token| {
            let kind = if token == "." || token.chars().all(char::is_alphanumeric) {
                TokenKind::Word
            } else {
                TokenKind::Punctuation
            };
            (token.to_owned(), kind)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RS_MARKOV_LOG=debug shows store and corpus-build details
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RS_MARKOV_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // What the external tokenizer hands over: normalized tokens with a
    // kind; the filter drops punctuation but keeps the terminator
    let corpus = [
        "the small cat sat on the mat .",
        "the small dog ran , after the cat .",
        "the cat saw the dog .",
        "the dog sat on the mat .",
    ];

    let mut model = ChainModel::new();
    for sentence in corpus {
        let tokens = builder::filter_tagged(tag(sentence));
        model = builder::build(tokens, model);
    }
    println!("Built a model with {} contexts", model.len());

    // Persist the model, then reload it the fast way (the second run of
    // this program picks up the binary snapshot instead of the JSON)
    let path = std::env::temp_dir().join("rs-markov-exemple.json");
    // Drop any snapshot left by a previous run so the reload below
    // reads the JSON and rewrites the snapshot
    let _ = std::fs::remove_file(path.with_extension("bin"));
    ModelStore::save(&model, &path)?;
    let model = ModelStore::load_with_snapshot(&path)?;
    println!("Reloaded the model from {}", path.display());

    // Uniform selection reproduces the reference chain behavior: every
    // distinct successor is equally likely, counts are ignored
    let generator = SentenceGenerator::new(50)?;
    for i in 0..5 {
        let sentence = generator.generate(&model, &mut RngSource::thread())?;
        println!(
            "Generated sentence {} ({:?}): {}",
            i + 1,
            sentence.stop,
            sentence.tokens.join(" ")
        );
    }

    // Weighted selection draws proportionally to the observation counts
    let weighted = SentenceGenerator::new(50)?.with_selection(Selection::Weighted);
    let sentence = weighted.generate(&model, &mut RngSource::seeded(42))?;
    println!("Weighted, seeded walk: {}", sentence.tokens.join(" "));

    // The same seed always replays the same walk
    let replay = weighted.generate(&model, &mut RngSource::seeded(42))?;
    assert_eq!(sentence, replay);

    // The deterministic source always takes the lexicographically first
    // branch, which is what the test suite uses
    let sentence = generator.generate(&model, &mut Lexicographic)?;
    println!("Deterministic walk: {}", sentence.tokens.join(" "));

    // Generating from an empty model is a real error, not a placeholder
    match generator.generate(&ChainModel::new(), &mut RngSource::thread()) {
        Ok(_) => println!("Should not happen"),
        Err(err) => println!("Empty model is rejected: {err}"),
    }

    // So is a zero step budget
    match SentenceGenerator::new(0) {
        Ok(_) => println!("Should not happen"),
        Err(err) => println!("Zero budget is rejected: {err}"),
    }

    Ok(())
}
