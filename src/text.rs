use crate::error::{Error, Result};
use log::{debug, trace};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{BufRead, Write};

/// Returns true if `b` is ASCII `[a-zA-Z0-9]`.
///
/// Every byte of a multi-byte UTF-8 sequence is >= 0x80, so classifying bytes
/// gives the same runs as classifying characters.
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Returns true if `s` is one or more ASCII alphanumeric characters.
pub fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_word_byte)
}

/// Returns the next byte without consuming it, or `None` at end of input.
fn peek<R: BufRead + ?Sized>(reader: &mut R) -> Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

/// Whole-word replacements. Keys and values are always `[a-zA-Z0-9]+`.
#[derive(Debug, Default, Clone)]
pub struct TranslationMap {
    entries: HashMap<String, String>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map by calling [`TranslationMap::add`] on every pair in order.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.add(key.as_ref(), value.as_ref())?;
        }
        Ok(map)
    }

    /// Inserts `key -> value`.
    ///
    /// Fails with [`Error::InvalidArgument`] naming the offending parameter
    /// when either side is empty or not strictly alphanumeric, and with
    /// [`Error::DuplicateKey`] when `key` is already present.
    pub fn add(&mut self, key: &str, value: &str) -> Result<()> {
        if !is_alphanumeric(key) {
            return Err(Error::invalid_argument("key", key));
        }
        if !is_alphanumeric(value) {
            return Err(Error::invalid_argument("value", value));
        }

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Err(Error::DuplicateKey {
                key: key.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(())
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Copies a stream, replacing every whole word found in its [`TranslationMap`].
///
/// Replacement values are written as-is and never scanned again.
#[derive(Debug, Default, Clone)]
pub struct Transformer {
    map: TranslationMap,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(map: TranslationMap) -> Self {
        Self { map }
    }

    pub fn add(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.add(key, value)
    }

    pub fn map(&self) -> &TranslationMap {
        &self.map
    }

    /// Reads `reader` to the end, writing the substituted copy to `writer`.
    ///
    /// Neither stream is flushed or closed. On an I/O error the bytes already
    /// written stay in `writer`.
    pub fn transform<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<()>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let mut words = 0usize;
        let mut replaced = 0usize;

        while let Some(next) = peek(reader)? {
            if is_word_byte(next) {
                words += 1;
                if self.process_word(reader, writer)? {
                    replaced += 1;
                }
            } else {
                self.process_non_word(reader, writer)?;
            }
        }

        debug!("words={words} replaced={replaced}");
        Ok(())
    }

    /// Like [`Transformer::transform`] for hosts holding optional handles.
    /// A missing stream fails with [`Error::NullArgument`] before anything is read.
    pub fn transform_checked<R, W>(
        &self,
        reader: Option<&mut R>,
        writer: Option<&mut W>,
    ) -> Result<()>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let reader = reader.ok_or(Error::NullArgument { param: "reader" })?;
        let writer = writer.ok_or(Error::NullArgument { param: "writer" })?;
        self.transform(reader, writer)
    }

    pub fn transform_str(&self, text: &str) -> Result<String> {
        let mut out = Vec::with_capacity(text.len());
        self.transform(&mut text.as_bytes(), &mut out)?;
        // Splits only happen at ASCII boundaries and values are ASCII.
        String::from_utf8(out)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Consumes one maximal word run and writes its replacement, or the word
    /// itself when it is not in the map. Returns whether it was replaced.
    fn process_word<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<bool>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let mut word = String::new();
        loop {
            let buf = reader.fill_buf()?;
            let run = buf.iter().take_while(|&&b| is_word_byte(b)).count();
            word.extend(buf[..run].iter().map(|&b| char::from(b)));
            // A short run or an empty buffer means the boundary was reached.
            let done = run < buf.len() || buf.is_empty();
            reader.consume(run);
            if done {
                break;
            }
        }

        match self.map.get(&word) {
            Some(value) => {
                trace!("replace {word} -> {value}");
                writer.write_all(value.as_bytes())?;
                Ok(true)
            }
            None => {
                writer.write_all(word.as_bytes())?;
                Ok(false)
            }
        }
    }

    /// Copies one maximal non-word run verbatim.
    fn process_non_word<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<()>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        loop {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(());
            }
            let run = buf.iter().take_while(|&&b| !is_word_byte(b)).count();
            writer.write_all(&buf[..run])?;
            let done = run < buf.len();
            reader.consume(run);
            if done {
                return Ok(());
            }
        }
    }
}
