use wasm_bindgen::prelude::*;
use kudylaca_parser::{collision_probability, load_lexicon, lookup, CollisionRisk, IdOptions, WordIdCodec};
use kudylaca_protocol::LexiconEntry;
use rkyv::{AlignedVec, Deserialize};
use serde::Serialize;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response for an identifier, sent back to JavaScript
#[derive(Serialize)]
pub struct IdReport {
    pub id: String,
    pub word: String,
    pub syllables: Vec<String>,
    pub reconstructed: String,
    pub round_trip: bool,
}

#[derive(Serialize)]
pub struct CollisionReport {
    pub probability: f64,
    pub risk: &'static str,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// The codec instance running in the browser
#[wasm_bindgen]
pub struct KudylacaEngine {
    codec: WordIdCodec,
    options: IdOptions,
    // Raw lexicon archive (loaded via fetch() in JS), aligned for rkyv
    lexicon: AlignedVec,
}

#[wasm_bindgen]
impl KudylacaEngine {
    /// `data` may be empty when no lexicon is needed.
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<KudylacaEngine, JsError> {
        let mut lexicon = AlignedVec::with_capacity(data.len());
        lexicon.extend_from_slice(&data);
        if !lexicon.is_empty() {
            load_lexicon(&lexicon).map_err(|e| JsError::new(&e.to_string()))?;
        }
        Ok(Self {
            codec: WordIdCodec::default(),
            options: IdOptions::default(),
            lexicon,
        })
    }

    /// Syllable delimiter and which fields identifiers carry.
    pub fn configure(&mut self, delimiter: String, include_length: bool, include_grammar: bool) {
        self.options = IdOptions {
            delimiter,
            include_length,
            include_grammar,
        };
    }

    pub fn analyze(&self, word: &str) -> Result<JsValue, JsError> {
        to_js(&self.codec.describe(word))
    }

    pub fn encode(&self, word: &str) -> Result<JsValue, JsError> {
        let encoded = self
            .codec
            .encode(word, &self.options)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let reconstructed = self
            .codec
            .decode(&encoded.id, &self.options)
            .map_err(|e| JsError::new(&e.to_string()))?
            .word;

        to_js(&IdReport {
            round_trip: reconstructed == encoded.word,
            id: encoded.id,
            word: encoded.word,
            syllables: encoded.syllables,
            reconstructed,
        })
    }

    pub fn decode(&self, id: &str) -> Result<JsValue, JsError> {
        let decoded = self
            .codec
            .decode(id, &self.options)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&decoded)
    }

    /// Entry of the loaded lexicon, or `undefined`.
    pub fn lookup(&self, id: &str) -> Result<JsValue, JsError> {
        if self.lexicon.is_empty() {
            return Ok(JsValue::UNDEFINED);
        }
        let archived = load_lexicon(&self.lexicon).map_err(|e| JsError::new(&e.to_string()))?;
        match lookup(archived, id) {
            Some(entry) => {
                let entry: LexiconEntry = entry
                    .deserialize(&mut rkyv::Infallible)
                    .map_err(|_| JsError::new("unreadable lexicon entry"))?;
                to_js(&entry)
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn collision_probability(&self, word_count: u32) -> Result<JsValue, JsError> {
        let probability = collision_probability(u64::from(word_count));
        to_js(&CollisionReport {
            probability,
            risk: CollisionRisk::from_probability(probability).label(),
        })
    }
}
