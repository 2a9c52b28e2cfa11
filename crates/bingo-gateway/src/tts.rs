//! Text-to-speech for number announcements.
//!
//! The gateway only needs "text in, MP3 out". `GoogleTts` gets that from the
//! public Google Translate speech endpoint, which caps each request at
//! 100 characters, so longer text is fetched in chunks and the MP3 frames are
//! concatenated in order.

use async_trait::async_trait;
use axum::body::Bytes;
use bingo_core::{
    config::TtsConfig,
    error::{BingoError, Result},
};
use std::time::Duration;
use tracing::debug;

/// Longest text the upstream accepts per request.
pub const MAX_CHUNK_CHARS: usize = 100;

#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Speak `text` in `lang`, returning MPEG audio.
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Bytes>;
}

pub struct GoogleTts {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTts {
    pub fn new(cfg: &TtsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(concat!("bingo-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BingoError::UpstreamService(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint(),
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        lang: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes> {
        let idx_s = idx.to_string();
        let total_s = total.to_string();
        let textlen = chunk.chars().count().to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
                ("idx", idx_s.as_str()),
                ("total", total_s.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BingoError::UpstreamService(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BingoError::UpstreamService(format!(
                "{status} from TTS API for chunk {idx}"
            )));
        }

        resp.bytes()
            .await
            .map_err(|e| BingoError::UpstreamService(e.to_string()))
    }
}

#[async_trait]
impl TtsProvider for GoogleTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Bytes> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(BingoError::UpstreamService("no text to speak".to_string()));
        }

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, lang, idx, total).await?;
            debug!(idx, total, bytes = bytes.len(), "tts chunk fetched");
            audio.extend_from_slice(&bytes);
        }
        Ok(Bytes::from(audio))
    }
}

/// Pack whitespace-separated words into chunks of at most `max` characters.
/// A single word longer than `max` is cut at character boundaries.
pub fn split_text(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
