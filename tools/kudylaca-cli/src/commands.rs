use anyhow::{anyhow, Context};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::{AlignedVec, Deserialize};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use kudylaca_parser::parser::split_words;
use kudylaca_parser::{
    affix_inventory, build_lexicon, collision_probability, find_collisions, load_lexicon, lookup as find_entry,
    CollisionRisk, EncodedWord, GrammarReport, IdOptions, UsageStats, WordIdCodec, SAMPLE_WORDS,
};
use kudylaca_protocol::{GrammarTag, LexiconEntry};

pub struct Output {
    pub json: bool,
}

impl Output {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }
}

fn print_report(report: &GrammarReport) {
    let a = &report.analysis;
    println!("Word:       {}", report.word);
    match a.time_prefix {
        Some(t) => println!("Time:       {} ({})", t.text(), t.label()),
        None => println!("Time:       -"),
    }
    if a.modality_prefixes.is_empty() {
        println!("Modality:   -");
    } else {
        for m in &a.modality_prefixes {
            println!("Modality:   {} ({})", m.text(), m.label());
        }
    }
    match a.suffix {
        Some(s) => println!("Suffix:     {} ({})", s.text(), s.label()),
        None => println!("Suffix:     -"),
    }
    println!("Stem:       {} [{:?}]", a.stem, a.kind);
    println!("Syllables:  {}", report.syllables.join("-"));
    for note in &report.notes {
        println!("  * {}", note);
    }
}

fn print_grammar(grammar: &GrammarTag) {
    if let Some(t) = grammar.time {
        println!("Time:       {} ({})", t.text(), t.label());
    }
    for m in grammar.modality.modalities() {
        println!("Modality:   {} ({})", m.text(), m.label());
    }
    if let Some(s) = grammar.suffix {
        println!("Suffix:     {} ({})", s.text(), s.label());
    }
}

#[derive(Serialize)]
struct EncodeResult<'a> {
    encoded: &'a EncodedWord,
    compact_id: String,
    reconstructed: String,
    round_trip: bool,
}

pub fn encode(out: &Output, word: &str, options: &IdOptions) -> anyhow::Result<()> {
    let codec = WordIdCodec::default();
    let encoded = codec.encode(word, options)?;
    let compact_id = codec
        .encode(word, &IdOptions { include_length: false, ..options.clone() })?
        .id;
    let reconstructed = codec.decode(&encoded.id, options)?.word;
    let round_trip = reconstructed == encoded.word;

    let result = EncodeResult {
        encoded: &encoded,
        compact_id,
        reconstructed,
        round_trip,
    };
    out.emit(&result, || {
        print_report(&codec.describe(word));
        println!();
        println!("Identifier:    {}", result.encoded.id);
        println!("Compact:       {}", result.compact_id);
        println!("Delimiter:     '{}'", options.delimiter);
        println!("Decoded:       {}", result.reconstructed);
        if result.round_trip {
            println!("Round trip:    ok");
        } else {
            println!("Round trip:    differs from '{}'", result.encoded.word);
        }
    })
}

pub fn decode(out: &Output, id: &str, options: &IdOptions) -> anyhow::Result<()> {
    let decoded = WordIdCodec::default().decode(id, options).map_err(|e| {
        warn!(id, error = %e, "identifier rejected");
        e
    })?;
    out.emit(&decoded, || {
        println!("Identifier: {}", id);
        println!("Word:       {}", decoded.word);
        println!("Syllables:  {}", decoded.syllables.join(" "));
        if let Some(grammar) = &decoded.grammar {
            print_grammar(grammar);
        }
    })
}

pub fn analyze(out: &Output, word: &str) -> anyhow::Result<()> {
    let report = WordIdCodec::default().describe(word);
    out.emit(&report, || print_report(&report))
}

pub fn affixes(out: &Output) -> anyhow::Result<()> {
    let inventory = affix_inventory();
    out.emit(&inventory, || {
        println!("{:<9} | {:<16} | {:<5} | example", "kind", "meaning", "affix");
        println!("{}", "-".repeat(50));
        for info in &inventory {
            println!("{:<9} | {:<16} | {:<5} | {}", info.kind.name(), info.label, info.affix, info.example);
        }
    })
}

#[derive(Serialize)]
struct CollisionEstimate {
    word_count: u64,
    probability: f64,
    risk: CollisionRisk,
}

pub fn collisions(out: &Output, count: u64) -> anyhow::Result<()> {
    let probability = collision_probability(count);
    let estimate = CollisionEstimate {
        word_count: count,
        probability,
        risk: CollisionRisk::from_probability(probability),
    };
    out.emit(&estimate, || {
        println!("Words:        {}", estimate.word_count);
        println!("Probability:  {:.10}", estimate.probability);
        println!("Percent:      {:.6}%", estimate.probability * 100.0);
        println!("Risk:         {}", estimate.risk.label());
        println!("(fixed model of 1024 identifier slots)");
    })
}

fn print_stats(stats: &UsageStats) {
    println!("Words processed:          {}", stats.words_processed);
    println!("Syllables processed:      {}", stats.syllables_processed);
    println!("Words with grammar:       {}", stats.grammar_processed);
    if let Some(avg) = stats.average_syllables() {
        println!("Average syllables/word:   {:.2}", avg);
    }
}

#[derive(Serialize)]
struct SampleRow {
    word: String,
    id: Option<String>,
    reconstructed: Option<String>,
    error: Option<String>,
    round_trip: bool,
}

#[derive(Serialize)]
struct SampleRun {
    rows: Vec<SampleRow>,
    stats: UsageStats,
}

pub fn samples(out: &Output, options: &IdOptions) -> anyhow::Result<()> {
    let codec = WordIdCodec::default();
    let mut stats = UsageStats::default();
    let mut rows = Vec::with_capacity(SAMPLE_WORDS.len());

    for &word in SAMPLE_WORDS {
        let row = match codec.encode(word, options) {
            Ok(encoded) => {
                stats.record(&encoded);
                let reconstructed = codec.decode(&encoded.id, options)?.word;
                SampleRow {
                    word: word.to_string(),
                    round_trip: reconstructed == encoded.word,
                    id: Some(encoded.id),
                    reconstructed: Some(reconstructed),
                    error: None,
                }
            }
            Err(err) => SampleRow {
                word: word.to_string(),
                id: None,
                reconstructed: None,
                error: Some(err.to_string()),
                round_trip: false,
            },
        };
        rows.push(row);
    }

    let run = SampleRun { rows, stats };
    out.emit(&run, || {
        for row in &run.rows {
            let mark = if row.round_trip { "ok " } else { "-- " };
            match (&row.id, &row.error) {
                (Some(id), _) => println!(
                    "{}{:<18} -> {:<22} -> {}",
                    mark,
                    row.word,
                    id,
                    row.reconstructed.as_deref().unwrap_or("")
                ),
                (None, Some(err)) => println!("{}{:<18} -> {}", mark, row.word, err),
                (None, None) => {}
            }
        }
        println!();
        print_stats(&run.stats);
    })
}

#[derive(Serialize)]
struct BatchRow<'a> {
    word: &'a str,
    id: Option<String>,
    error: Option<String>,
}

pub fn batch(out: &Output, file: &Path, options: &IdOptions) -> anyhow::Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {:?}", file))?;
    let codec = WordIdCodec::default();
    let mut stats = UsageStats::default();
    let mut rows = Vec::new();

    for word in split_words(&text) {
        let row = match codec.encode(word, options) {
            Ok(encoded) => {
                stats.record(&encoded);
                BatchRow { word, id: Some(encoded.id), error: None }
            }
            Err(err) => BatchRow { word, id: None, error: Some(err.to_string()) },
        };
        rows.push(row);
    }

    info!(words = rows.len(), "batch encoded");
    if out.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in &rows {
        match (&row.id, &row.error) {
            (Some(id), _) => println!("{}\t{}", row.word, id),
            (None, Some(err)) => println!("{}\terror: {}", row.word, err),
            (None, None) => {}
        }
    }
    println!();
    print_stats(&stats);
    Ok(())
}

fn read_word_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    if let Ok(words) = serde_json::from_str::<Vec<String>>(&data) {
        return Ok(words);
    }
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn compile(input: &Path, output: &Path, options: &IdOptions) -> anyhow::Result<()> {
    info!("Reading word list from {:?}", input);
    let words = read_word_list(input)?;

    let codec = WordIdCodec::default();
    let (lexicon, encoded, rejected) = build_lexicon(&codec, words.iter().map(String::as_str), options);
    info!(entries = lexicon.entries.len(), rejected = rejected.len(), "lexicon built");

    for (id, words) in find_collisions(&encoded) {
        warn!(id = %id, words = ?words, "identifier collision");
    }

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .map_err(|e| anyhow!("failed to archive lexicon: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(output, &bytes).with_context(|| format!("writing {:?}", output))?;
    info!("Lexicon written to {:?}", output);
    Ok(())
}

pub fn lookup(out: &Output, lexicon: &Path, id: &str) -> anyhow::Result<()> {
    let data = fs::read(lexicon).with_context(|| format!("reading {:?}", lexicon))?;
    let mut aligned = AlignedVec::with_capacity(data.len());
    aligned.extend_from_slice(&data);

    let archived = load_lexicon(&aligned)?;
    let entry = find_entry(archived, id).ok_or_else(|| anyhow!("no word with identifier {}", id))?;
    let entry: LexiconEntry = entry
        .deserialize(&mut rkyv::Infallible)
        .map_err(|e| anyhow!("failed to read lexicon entry: {:?}", e))?;

    out.emit(&entry, || {
        println!("Identifier: {}", entry.id);
        println!("Word:       {}", entry.word);
        println!("Stem:       {}", entry.stem);
        print_grammar(&entry.grammar());
    })
}
