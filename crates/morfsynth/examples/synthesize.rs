use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use morfsynth::Synthesizer;
use morfsynth_types::AnalyzedToken;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: cargo run -p morfsynth --example synthesize -- <synth.dict> <tags.txt> <lemma> <tag> [--pattern]";

fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let dict_path = args.next().map(PathBuf::from).context(USAGE)?;
    let tags_path = args.next().map(PathBuf::from).context(USAGE)?;
    let lemma = args.next().context(USAGE)?;
    let tag = args.next().context(USAGE)?;
    let is_pattern = match args.next().as_deref() {
        None => false,
        Some("--pattern") => true,
        Some(other) => bail!("unexpected argument `{other}`; {USAGE}"),
    };

    let synth = Synthesizer::new(&dict_path, &tags_path);
    let token = AnalyzedToken::new(lemma.as_str(), None);

    println!("Dictionary: {}", dict_path.display());
    println!("Lemma: {lemma}");
    println!("Tag{}: {tag}", if is_pattern { " pattern" } else { "" });

    match synth.synthesize_with(&token, Some(&tag), is_pattern)? {
        None => println!("(no tag supplied)"),
        Some(forms) if forms.is_empty() => println!("(no forms found)"),
        Some(forms) => {
            for form in forms {
                println!("  {form}");
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
