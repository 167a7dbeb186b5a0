//! Recovery-phrase dictionaries.
//!
//! Each supported language maps to a fixed, ordered list of 2048 words; a
//! word's position in the list is its 11-bit value. The lists are the
//! standard BIP-39 lists, borrowed from the `bip39` crate so we don't carry
//! 4096 string literals around. Only the lists are borrowed: BIP-39's own
//! mnemonic checksum and PBKDF2 seed stretching play no part here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::DICTIONARY_SIZE;
use crate::error::{AccountError, Result};

/// Languages a recovery phrase can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-Hant")]
    TraditionalChinese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::TraditionalChinese];

    /// Parse a language tag. Accepts the bare language (`en`), regional
    /// English (`en-US`, `en-GB`) and the usual spellings of Traditional
    /// Chinese (`zh-Hant`, `zh-TW`, `zh-HK`). Anything else is
    /// [`AccountError::LanguageNotSupported`].
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Language::English),
            "zh-hant" | "zh-tw" | "zh-hk" | "zh-hant-tw" => Ok(Language::TraditionalChinese),
            _ => Err(AccountError::LanguageNotSupported(tag.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::TraditionalChinese => "zh-Hant",
        }
    }

    pub fn dictionary(&self) -> WordDictionary {
        let words = match self {
            Language::English => bip39::Language::English.word_list(),
            Language::TraditionalChinese => bip39::Language::TraditionalChinese.word_list(),
        };
        WordDictionary { words }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_tag(s)
    }
}

/// An ordered 2048-word list. Pure lookup, no state.
#[derive(Clone, Copy)]
pub struct WordDictionary {
    words: &'static [&'static str; DICTIONARY_SIZE],
}

impl WordDictionary {
    /// The word for an 11-bit index. Indices come out of the bit packer,
    /// which never produces a value above 2047.
    pub fn word(&self, index: u16) -> &'static str {
        self.words[usize::from(index) & (DICTIONARY_SIZE - 1)]
    }

    /// The 11-bit index of a word, or `None` if it isn't in this list.
    /// Matching is exact; callers trim whitespace before lookup.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.words
            .iter()
            .position(|candidate| *candidate == word)
            .map(|i| i as u16)
    }

    /// Look up a word, mapping a miss to [`AccountError::InvalidWord`].
    pub fn lookup(&self, word: &str) -> Result<u16> {
        self.index_of(word)
            .ok_or_else(|| AccountError::InvalidWord(word.to_string()))
    }
}

impl fmt::Debug for WordDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordDictionary({}..{})", self.words[0], self.words[DICTIONARY_SIZE - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_boundaries() {
        let dict = Language::English.dictionary();
        assert_eq!(dict.word(0), "abandon");
        assert_eq!(dict.word(2047), "zoo");
        assert_eq!(dict.index_of("abandon"), Some(0));
        assert_eq!(dict.index_of("zoo"), Some(2047));
    }

    #[test]
    fn test_traditional_chinese_first_word() {
        let dict = Language::TraditionalChinese.dictionary();
        assert_eq!(dict.word(0), "的");
        assert_eq!(dict.index_of("的"), Some(0));
    }

    #[test]
    fn test_every_word_maps_back_to_its_index() {
        for lang in Language::ALL {
            let dict = lang.dictionary();
            for i in (0..DICTIONARY_SIZE as u16).step_by(97) {
                assert_eq!(dict.index_of(dict.word(i)), Some(i), "{lang} index {i}");
            }
        }
    }

    #[test]
    fn test_unknown_word() {
        let dict = Language::English.dictionary();
        assert_eq!(dict.index_of("bitmark"), None);
        assert_eq!(
            dict.lookup("bitmark"),
            Err(AccountError::InvalidWord("bitmark".into()))
        );
        // Lookups are per-language.
        assert_eq!(dict.index_of("的"), None);
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("en-US").unwrap(), Language::English);
        assert_eq!(Language::from_tag("zh_TW").unwrap(), Language::TraditionalChinese);
        assert_eq!("zh-Hant".parse::<Language>().unwrap(), Language::TraditionalChinese);
        assert_eq!(
            Language::from_tag("fr"),
            Err(AccountError::LanguageNotSupported("fr".into()))
        );
        assert_eq!(Language::TraditionalChinese.to_string(), "zh-Hant");
    }

    #[test]
    fn test_language_serde() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"zh-Hant\"").unwrap();
        assert_eq!(lang, Language::TraditionalChinese);
    }
}
