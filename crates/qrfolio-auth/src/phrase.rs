//! Registration phrase generation.

use rand::Rng;

const ADJECTIVES: [&str; 20] = [
    "brave", "bright", "calm", "clever", "eager", "fancy", "gentle", "happy", "jolly", "kind",
    "lively", "nice", "proud", "silly", "witty", "zany", "swift", "bold", "cool", "wise",
];

const NOUNS: [&str; 20] = [
    "panda", "tiger", "eagle", "dolphin", "fox", "wolf", "bear", "lion", "hawk", "owl", "deer",
    "rabbit", "otter", "seal", "penguin", "koala", "elephant", "giraffe", "zebra", "cheetah",
];

/// Generate an `adjective-noun-NNNN` phrase with a four-digit number.
///
/// Phrases are easy to dictate, not secret-grade; uniqueness is enforced by
/// the database.
pub fn generate_phrase() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number: u16 = rng.random_range(1000..=9999);
    format!("{adjective}-{noun}-{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_format() {
        for _ in 0..200 {
            let phrase = generate_phrase();
            let parts: Vec<&str> = phrase.split('-').collect();
            assert_eq!(parts.len(), 3, "{phrase}");
            assert!(ADJECTIVES.contains(&parts[0]));
            assert!(NOUNS.contains(&parts[1]));
            assert_eq!(parts[2].len(), 4);
            let n: u16 = parts[2].parse().unwrap();
            assert!((1000..=9999).contains(&n));
        }
    }
}
