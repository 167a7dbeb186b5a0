//! # Recovery Phrases
//!
//! A recovery phrase is the seed core written as dictionary words, 11 bits
//! per word. Three shapes exist, and the word count alone says which one a
//! phrase is:
//!
//! | words | carries                                   | bits          |
//! |-------|-------------------------------------------|---------------|
//! | 24    | V1: network byte ∥ 32-byte core           | 264, exact    |
//! | 12    | V2: 17-byte core, reserved nibble dropped | 132 of 136    |
//! | 13    | V2: 17-byte core ∥ 7 SHA-256 check bits   | 143           |
//!
//! The 12-word form has no check bits of its own. A mistyped word still
//! usually fails, because the V2 network mode bits are unlikely to survive
//! it, but that is luck rather than a guarantee. Prefer 13 words.

use std::fmt;

use zeroize::Zeroize;

use super::bitpack::{pack, unpack, Remainder};
use super::dictionary::Language;
use super::seed::{SeedCore, SeedVersion};
use crate::config::{
    Network, PHRASE_V1_WORDS, PHRASE_V2_CHECKED_WORDS, PHRASE_V2_WORDS, SEED_CORE_V1_LENGTH,
    SEED_CORE_V2_LENGTH, SEED_PREFIX_LIVENET, SEED_PREFIX_TESTNET,
};
use crate::crypto::hash::sha256;
use crate::error::{AccountError, Result};

/// Bytes of the SHA-256 digest appended before a 13-word phrase is cut into
/// words. Only the top 7 bits of the first byte survive the cut.
const CHECK_BYTES: usize = 2;
/// Of those, the bits that are actually kept.
const CHECK_BITS_MASK: u8 = 0xFE;

/// The three phrase shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseFormat {
    /// 24 words, V1 seeds only.
    TwentyFour,
    /// 12 words, V2 seeds, no check bits.
    Twelve,
    /// 13 words, V2 seeds, with check bits.
    Thirteen,
}

impl PhraseFormat {
    pub fn word_count(&self) -> usize {
        match self {
            PhraseFormat::TwentyFour => PHRASE_V1_WORDS,
            PhraseFormat::Twelve => PHRASE_V2_WORDS,
            PhraseFormat::Thirteen => PHRASE_V2_CHECKED_WORDS,
        }
    }

    pub fn from_word_count(count: usize) -> Result<Self> {
        match count {
            PHRASE_V1_WORDS => Ok(PhraseFormat::TwentyFour),
            PHRASE_V2_WORDS => Ok(PhraseFormat::Twelve),
            PHRASE_V2_CHECKED_WORDS => Ok(PhraseFormat::Thirteen),
            n => Err(AccountError::InvalidRecoveryPhrase(format!(
                "expected 12, 13 or 24 words, got {n}"
            ))),
        }
    }

    /// The seed version this shape can carry.
    pub fn seed_version(&self) -> SeedVersion {
        match self {
            PhraseFormat::TwentyFour => SeedVersion::V1,
            PhraseFormat::Twelve | PhraseFormat::Thirteen => SeedVersion::V2,
        }
    }

    /// The shape used when the caller doesn't ask for one.
    pub fn default_for(version: SeedVersion) -> Self {
        match version {
            SeedVersion::V1 => PhraseFormat::TwentyFour,
            SeedVersion::V2 => PhraseFormat::Thirteen,
        }
    }
}

impl fmt::Display for PhraseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-word", self.word_count())
    }
}

/// Split phrase text on any whitespace.
pub fn split_phrase(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Write a seed core out as words.
///
/// Fails with [`AccountError::IncompatiblePhraseFormat`] if `format` can't
/// carry the core's version (24 words for V2, 12 or 13 for V1).
pub fn encode_phrase(
    core: &SeedCore,
    format: PhraseFormat,
    language: Language,
) -> Result<Vec<String>> {
    if format.seed_version() != core.version() {
        return Err(AccountError::IncompatiblePhraseFormat {
            words: format.word_count(),
            version: core.version().as_str(),
        });
    }

    let mut payload = Vec::with_capacity(SEED_CORE_V1_LENGTH + 1);
    match (core, format) {
        (SeedCore::V1 { network, entropy }, _) => {
            payload.push(match network {
                Network::Livenet => SEED_PREFIX_LIVENET,
                Network::Testnet => SEED_PREFIX_TESTNET,
            });
            payload.extend_from_slice(entropy);
        }
        (SeedCore::V2 { entropy, .. }, PhraseFormat::Thirteen) => {
            payload.extend_from_slice(entropy);
            payload.extend_from_slice(&sha256(entropy)[..CHECK_BYTES]);
        }
        (SeedCore::V2 { entropy, .. }, _) => payload.extend_from_slice(entropy),
    }

    let (mut indices, _) = unpack(&payload);
    payload.zeroize();
    indices.truncate(format.word_count());

    let dictionary = language.dictionary();
    let words = indices
        .iter()
        .map(|&index| dictionary.word(index).to_string())
        .collect();
    indices.zeroize();
    Ok(words)
}

/// Read a seed core back from words, rejecting it unless it belongs to
/// `expected`.
///
/// The word count picks the shape. Words are trimmed before lookup; every
/// word must be in `language`'s dictionary.
pub fn decode_phrase<S: AsRef<str>>(
    words: &[S],
    language: Language,
    expected: Network,
) -> Result<SeedCore> {
    let format = PhraseFormat::from_word_count(words.len())?;

    let dictionary = language.dictionary();
    let mut indices = words
        .iter()
        .map(|word| dictionary.lookup(word.as_ref().trim()))
        .collect::<Result<Vec<u16>>>()?;

    let (mut bytes, remainder) = pack(&indices);
    indices.zeroize();
    let core = match format {
        PhraseFormat::TwentyFour => core_from_v1_bytes(&bytes),
        PhraseFormat::Twelve => core_from_v2_twelve(&bytes, remainder),
        PhraseFormat::Thirteen => core_from_v2_thirteen(&bytes, remainder),
    };
    bytes.zeroize();

    let core = core?;
    core.ensure_network(expected)?;
    Ok(core)
}

// 33 bytes: network byte then core.
fn core_from_v1_bytes(bytes: &[u8]) -> Result<SeedCore> {
    let network = match bytes[0] {
        SEED_PREFIX_LIVENET => Network::Livenet,
        SEED_PREFIX_TESTNET => Network::Testnet,
        other => {
            return Err(AccountError::InvalidRecoveryPhrase(format!(
                "unknown network byte {other:#04x}"
            )))
        }
    };
    let mut entropy = [0u8; SEED_CORE_V1_LENGTH];
    entropy.copy_from_slice(&bytes[1..=SEED_CORE_V1_LENGTH]);
    let core = SeedCore::v1(network, entropy);
    entropy.zeroize();
    Ok(core)
}

// 16 bytes plus a 4-bit remainder that becomes the high nibble of byte 16.
fn core_from_v2_twelve(bytes: &[u8], remainder: Remainder) -> Result<SeedCore> {
    let mut entropy = [0u8; SEED_CORE_V2_LENGTH];
    entropy[..SEED_CORE_V2_LENGTH - 1].copy_from_slice(bytes);
    entropy[SEED_CORE_V2_LENGTH - 1] = (remainder.value << 4) as u8;
    let core = SeedCore::v2(entropy);
    entropy.zeroize();
    core
}

// 17 bytes of core plus 7 check bits.
fn core_from_v2_thirteen(bytes: &[u8], remainder: Remainder) -> Result<SeedCore> {
    let mut entropy = [0u8; SEED_CORE_V2_LENGTH];
    entropy.copy_from_slice(bytes);

    let check = (remainder.value << 1) as u8;
    if sha256(&entropy)[0] & CHECK_BITS_MASK != check {
        entropy.zeroize();
        return Err(AccountError::InvalidRecoveryPhrase(
            "check bits do not match".into(),
        ));
    }

    let core = SeedCore::v2(entropy);
    entropy.zeroize();
    core
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::seed::decode_seed;
    use rand::rngs::OsRng;

    const TESTNET_V2_SEED: &str = "9J87CAsHdFdoEu6N1unZk3sqhVBkVL8Z8";
    const TESTNET_V2_PHRASE: &str =
        "name gaze apart lamp lift zone believe steak session laptop crowd hill argue";
    const TESTNET_V2_PHRASE_ZH: &str = "箱 阻 起 歸 徹 矮 問 栽 瓜 鼓 支 樂";

    const LIVENET_V1_SEED: &str = "5XEECqWqA47qWg86DR5HJ29HhbVqwigHUAhgiBMqFSBycbiwnbY639s";
    const LIVENET_V1_PHRASE: &str = "ability panel leave spike mixture token voice certain \
        today market grief crater cruise smart camera palm wheat rib swamp labor bid rifle \
        piano glass";

    #[test]
    fn test_thirteen_words_known_seed() {
        let core = decode_seed(TESTNET_V2_SEED, Network::Testnet).unwrap();
        let words = encode_phrase(&core, PhraseFormat::Thirteen, Language::English).unwrap();
        assert_eq!(words.join(" "), TESTNET_V2_PHRASE);

        let decoded =
            decode_phrase(&split_phrase(TESTNET_V2_PHRASE), Language::English, Network::Testnet)
                .unwrap();
        assert_eq!(decoded, core);
    }

    #[test]
    fn test_twelve_words_is_thirteen_minus_last() {
        let core = decode_seed(TESTNET_V2_SEED, Network::Testnet).unwrap();
        let twelve = encode_phrase(&core, PhraseFormat::Twelve, Language::English).unwrap();
        let thirteen = encode_phrase(&core, PhraseFormat::Thirteen, Language::English).unwrap();
        assert_eq!(twelve[..], thirteen[..12]);

        let decoded = decode_phrase(&twelve, Language::English, Network::Testnet).unwrap();
        assert_eq!(decoded, core);
    }

    #[test]
    fn test_chinese_twelve_words() {
        let core = decode_seed(TESTNET_V2_SEED, Network::Testnet).unwrap();
        let words =
            encode_phrase(&core, PhraseFormat::Twelve, Language::TraditionalChinese).unwrap();
        assert_eq!(words.join(" "), TESTNET_V2_PHRASE_ZH);
    }

    #[test]
    fn test_twenty_four_words_known_seed() {
        let core = decode_seed(LIVENET_V1_SEED, Network::Livenet).unwrap();
        let words = encode_phrase(&core, PhraseFormat::TwentyFour, Language::English).unwrap();
        assert_eq!(words, split_phrase(LIVENET_V1_PHRASE));

        let decoded =
            decode_phrase(&split_phrase(LIVENET_V1_PHRASE), Language::English, Network::Livenet)
                .unwrap();
        assert_eq!(decoded, core);
    }

    #[test]
    fn test_format_must_match_version() {
        let v1 = decode_seed(LIVENET_V1_SEED, Network::Livenet).unwrap();
        assert_eq!(
            encode_phrase(&v1, PhraseFormat::Twelve, Language::English).unwrap_err(),
            AccountError::IncompatiblePhraseFormat {
                words: 12,
                version: "v1"
            }
        );
        let v2 = decode_seed(TESTNET_V2_SEED, Network::Testnet).unwrap();
        assert!(encode_phrase(&v2, PhraseFormat::TwentyFour, Language::English).is_err());
    }

    #[test]
    fn test_wrong_network() {
        let err = decode_phrase(
            &split_phrase(TESTNET_V2_PHRASE),
            Language::English,
            Network::Livenet,
        )
        .unwrap_err();
        assert!(err.is_wrong_network());
    }

    #[test]
    fn test_unsupported_lengths() {
        for n in [0usize, 11, 14, 23, 25] {
            let words = vec!["abandon"; n];
            assert!(matches!(
                decode_phrase(&words, Language::English, Network::Livenet),
                Err(AccountError::InvalidRecoveryPhrase(_))
            ));
        }
    }

    #[test]
    fn test_unknown_word() {
        let mut words = split_phrase(TESTNET_V2_PHRASE);
        words[3] = "bitmark";
        assert_eq!(
            decode_phrase(&words, Language::English, Network::Testnet).unwrap_err(),
            AccountError::InvalidWord("bitmark".into())
        );
    }

    #[test]
    fn test_wrong_language() {
        let words = split_phrase(TESTNET_V2_PHRASE_ZH);
        assert!(matches!(
            decode_phrase(&words, Language::English, Network::Testnet),
            Err(AccountError::InvalidWord(_))
        ));
    }

    #[test]
    fn test_thirteenth_word_is_checked() {
        let mut words = split_phrase(TESTNET_V2_PHRASE);
        let dictionary = Language::English.dictionary();
        let last = dictionary.lookup(words[12]).unwrap();
        // The last word is the core's reserved nibble followed by the 7
        // check bits; flip one of the check bits.
        words[12] = dictionary.word(last ^ 0x10);
        assert!(matches!(
            decode_phrase(&words, Language::English, Network::Testnet),
            Err(AccountError::InvalidRecoveryPhrase(_))
        ));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let padded: Vec<String> = split_phrase(TESTNET_V2_PHRASE)
            .into_iter()
            .map(|w| format!("  {w}\t"))
            .collect();
        assert!(decode_phrase(&padded, Language::English, Network::Testnet).is_ok());
    }

    #[test]
    fn test_generated_cores_roundtrip_every_format() {
        for network in [Network::Livenet, Network::Testnet] {
            let v2 = SeedCore::generate(network, &mut OsRng).unwrap();
            for format in [PhraseFormat::Twelve, PhraseFormat::Thirteen] {
                for language in Language::ALL {
                    let words = encode_phrase(&v2, format, language).unwrap();
                    assert_eq!(words.len(), format.word_count());
                    assert_eq!(decode_phrase(&words, language, network).unwrap(), v2);
                }
            }

            let v1 = SeedCore::v1(network, [0x5c; 32]);
            let words = encode_phrase(&v1, PhraseFormat::TwentyFour, Language::English).unwrap();
            assert_eq!(decode_phrase(&words, Language::English, network).unwrap(), v1);
        }
    }

    #[test]
    fn test_v1_bad_network_byte() {
        // Index 0x7ff in the first word puts 0xff in the network byte.
        let mut words = vec!["abandon"; 24];
        words[0] = "zoo";
        assert!(matches!(
            decode_phrase(&words, Language::English, Network::Livenet),
            Err(AccountError::InvalidRecoveryPhrase(_))
        ));
    }

    #[test]
    fn test_format_from_word_count() {
        assert_eq!(PhraseFormat::from_word_count(13).unwrap(), PhraseFormat::Thirteen);
        assert_eq!(PhraseFormat::default_for(SeedVersion::V2), PhraseFormat::Thirteen);
        assert_eq!(PhraseFormat::default_for(SeedVersion::V1), PhraseFormat::TwentyFour);
        assert_eq!(PhraseFormat::Twelve.to_string(), "12-word");
    }
}
