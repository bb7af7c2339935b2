//! Text helpers written against [`StringMap`], usable with either table.
//!
//! Both follow the "look up, recover from `KeyNotFound`" pattern: a miss is
//! the normal way to learn a key is new, so only other errors propagate.

use crate::error::{MapError, Result};
use crate::string_map::StringMap;

/// Lowercase, then keep ASCII letters and digits only.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Count each character of `normalize(text)` into `counts`.
pub fn char_tally(text: &str, counts: &mut impl StringMap<usize>) -> Result<()> {
    let mut buf = [0u8; 4];
    for c in normalize(text).chars() {
        let key = c.encode_utf8(&mut buf);
        let n = counts.try_get(key).copied().unwrap_or(0);
        counts.set(key, n + 1)?;
    }
    Ok(())
}

/// True when the letters of `text` can be rearranged into a palindrome:
/// at most one distinct character occurs an odd number of times.
///
/// `counts` is used as scratch space and is left empty.
pub fn is_palindrome_permutation(text: &str, mut counts: impl StringMap<usize>) -> Result<bool> {
    char_tally(text, &mut counts)?;

    let mut odd = 0;
    let mut buf = [0u8; 4];
    for c in normalize(text).chars() {
        // Removing as we go visits each distinct character once.
        match counts.remove(c.encode_utf8(&mut buf)) {
            Ok(n) if n % 2 == 1 => odd += 1,
            Ok(_) => {}
            Err(MapError::KeyNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(odd <= 1)
}

/// Characters of `word` in sorted order; anagrams share this key.
pub fn anagram_key(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Group `words` that are anagrams of one another.
///
/// Groups appear in the order their first word appears in `words`, and
/// each group keeps input order: `["the", "dog", "teh"]` yields
/// `[["the", "teh"], ["dog"]]`. `groups` is used as scratch space.
pub fn group_anagrams<W: AsRef<str>>(
    words: &[W],
    mut groups: impl StringMap<Vec<usize>>,
) -> Result<Vec<Vec<String>>> {
    for (i, word) in words.iter().enumerate() {
        let key = anagram_key(word.as_ref());
        match groups.get_mut(&key) {
            Ok(indices) => indices.push(i),
            Err(MapError::KeyNotFound { .. }) => {
                groups.set(&key, vec![i])?;
            }
            Err(e) => return Err(e),
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for word in words {
        // The first word of each group claims it; later members miss.
        match groups.remove(&anagram_key(word.as_ref())) {
            Ok(indices) => out.push(
                indices
                    .into_iter()
                    .map(|i| words[i].as_ref().to_owned())
                    .collect(),
            ),
            Err(MapError::KeyNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}
