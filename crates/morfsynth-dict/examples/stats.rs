use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use morfsynth_dict::{LoadMode, SynthDict, load_tag_inventory};
use morfsynth_types::lookup_key;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_path = args.next().map(PathBuf::from).context(
        "usage: cargo run -p morfsynth-dict --example stats -- <synth.dict> [tags.txt]",
    )?;
    let tags_path = args.next().map(PathBuf::from);

    let dict = SynthDict::load_with_mode(&dict_path, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", dict_path.display()))?;

    println!("Dictionary: {}", dict_path.display());
    println!("Keys   : {}", dict.key_count());
    println!("Entries: {}", dict.entry_count());

    if let Some(tags_path) = tags_path {
        let tags = load_tag_inventory(&tags_path)
            .with_context(|| format!("loading tag inventory from {}", tags_path.display()))?;
        println!("Tags   : {} ({})", tags.len(), tags_path.display());
    }

    // Spot-check a couple of keys to confirm lookup.
    for (lemma, tag) in [("kot", "subst:sg:nom:m2"), ("bić", "verb:fin:sg:ter:imperf:aff")] {
        let hits = dict.lookup(&lookup_key(lemma, tag));
        println!("'{lemma}' + '{tag}': {} entries", hits.len());
    }

    Ok(())
}
