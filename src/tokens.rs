//! Random token generation.
//!
//! The validator and generator never create identifiers themselves; they ask
//! a [`TokenSource`] so tests can substitute a deterministic one.

use crate::error::{EntityKitError, Result};

/// Alphabet of history version tokens.
pub const VERSION_ALPHABET: &str = "0123456789abcdef";
/// Length of history version tokens.
pub const VERSION_LENGTH: usize = 10;
/// Alphabet of record identifiers (URL-safe).
pub const IDENTIFIER_ALPHABET: &str =
    "useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";
/// Length of the random part of record identifiers.
pub const IDENTIFIER_LENGTH: usize = 7;

/// Capability producing fresh random tokens over a given alphabet.
pub trait TokenSource {
    fn token(&mut self, alphabet: &str, length: usize) -> Result<String>;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn token(&mut self, alphabet: &str, length: usize) -> Result<String> {
        (**self).token(alphabet, length)
    }
}

/// Tokens drawn from operating system entropy.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn token(&mut self, alphabet: &str, length: usize) -> Result<String> {
        let symbols = alphabet_symbols(alphabet)?;

        // Largest multiple of the alphabet size that fits in a byte; bytes at
        // or above it are rejected so every symbol is equally likely.
        let limit = 256 - (256 % symbols.len());
        let mut token = String::with_capacity(length);
        let mut produced = 0;
        let mut buf = [0u8; 32];

        while produced < length {
            getrandom::getrandom(&mut buf)
                .map_err(|err| EntityKitError::Entropy(format!("failed to read entropy: {err}")))?;
            for byte in buf.iter().map(|&b| usize::from(b)).filter(|&b| b < limit) {
                if produced == length {
                    break;
                }
                token.push(symbols[byte % symbols.len()]);
                produced += 1;
            }
        }

        Ok(token)
    }
}

/// Deterministic source that hands out a fixed list of tokens in order,
/// wrapping around when exhausted. Tokens are returned as given, whatever
/// alphabet or length the caller asks for.
#[derive(Debug, Clone)]
pub struct SequenceTokens {
    tokens: Vec<String>,
    next: usize,
}

impl SequenceTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    /// How many tokens have been handed out so far
    pub fn issued(&self) -> usize {
        self.next
    }
}

impl TokenSource for SequenceTokens {
    fn token(&mut self, alphabet: &str, _length: usize) -> Result<String> {
        if self.tokens.is_empty() {
            return Err(EntityKitError::InvalidAlphabet(format!(
                "no tokens configured for alphabet {alphabet:?}"
            )));
        }
        let token = self.tokens[self.next % self.tokens.len()].clone();
        self.next += 1;
        Ok(token)
    }
}

/// Fresh history version token: 10 lowercase hex characters.
pub fn version<T: TokenSource + ?Sized>(tokens: &mut T) -> Result<String> {
    tokens.token(VERSION_ALPHABET, VERSION_LENGTH)
}

/// Fresh record identifier, prefixed by the first letter of `kind`
/// (`entity` → `e1a2B3c4`).
pub fn identifier<T: TokenSource + ?Sized>(tokens: &mut T, kind: &str) -> Result<String> {
    let prefix: String = kind.chars().take(1).collect();
    let body = tokens.token(IDENTIFIER_ALPHABET, IDENTIFIER_LENGTH)?;
    Ok(format!("{prefix}{body}"))
}

fn alphabet_symbols(alphabet: &str) -> Result<Vec<char>> {
    let symbols: Vec<char> = alphabet.chars().collect();
    if symbols.is_empty() {
        return Err(EntityKitError::InvalidAlphabet("alphabet is empty".to_string()));
    }
    if symbols.len() > 256 {
        return Err(EntityKitError::InvalidAlphabet(format!(
            "alphabet has {} symbols, at most 256 are supported",
            symbols.len()
        )));
    }
    Ok(symbols)
}
