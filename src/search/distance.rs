// gm-locator/src/search/distance.rs

/// Classic Levenshtein distance over Unicode scalar values.
///
/// Fills the whole `(len(a)+1) x (len(b)+1)` table; inputs here are place
/// names and short queries, so there is no banding or early exit.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let cols = b.len() + 1;

    let mut table = vec![0usize; (a.len() + 1) * cols];
    for i in 0..=a.len() {
        table[i * cols] = i;
    }
    for j in 0..=b.len() {
        table[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let deletion = table[(i - 1) * cols + j] + 1;
            let insertion = table[i * cols + j - 1] + 1;
            let substitution = table[(i - 1) * cols + j - 1] + cost;
            table[i * cols + j] = deletion.min(insertion).min(substitution);
        }
    }

    table[a.len() * cols + b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn textbook_examples() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn empty_side_costs_full_length() {
        assert_eq!(levenshtein_distance("", "bolton"), 6);
        assert_eq!(levenshtein_distance("wigan", ""), 5);
    }

    #[test]
    fn symmetric() {
        let pairs = [("stockport", "stokport"), ("salford", "sale"), ("eccles", "leigh")];
        for (a, b) in pairs {
            assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
        }
    }

    #[test]
    fn triangle_inequality_holds() {
        let words = ["bury", "bolton", "oldham", "heywood", "middleton"];
        for a in words {
            for b in words {
                for c in words {
                    assert!(
                        levenshtein_distance(a, c)
                            <= levenshtein_distance(a, b) + levenshtein_distance(b, c)
                    );
                }
            }
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn agrees_with_strsim() {
        let names = [
            "manchester",
            "manchester airport",
            "ashton-under-lyne",
            "piccadilly gardens",
            "mediacity",
            "stokport",
        ];
        for a in names {
            for b in names {
                assert_eq!(levenshtein_distance(a, b), strsim::levenshtein(a, b), "{a} vs {b}");
            }
        }
    }
}
