//! Per-letter guess scoring.

use wordduel_protocol::{LetterFeedback, WORD_LENGTH};

/// Scores a guess against the secret, position by position.
///
/// For each position: green on an exact match, otherwise yellow if the
/// letter occurs anywhere in the secret, otherwise gray. Each position is
/// checked independently — there is no accounting of how many times a
/// letter occurs in the secret, so a repeated guess letter can be marked
/// yellow more often than the secret contains it. Deployed clients expect
/// exactly this scoring; changing it to two-pass Wordle rules would break
/// them.
///
/// Both words must be lowercase and [`WORD_LENGTH`] bytes; shorter or
/// longer input is a caller bug.
pub fn evaluate(guess: &str, secret: &str) -> [LetterFeedback; WORD_LENGTH] {
    let guess = guess.as_bytes();
    let secret = secret.as_bytes();
    debug_assert_eq!(guess.len(), WORD_LENGTH);
    debug_assert_eq!(secret.len(), WORD_LENGTH);

    let mut feedback = [LetterFeedback::Gray; WORD_LENGTH];
    for i in 0..WORD_LENGTH {
        if guess[i] == secret[i] {
            feedback[i] = LetterFeedback::Green;
        } else if secret.contains(&guess[i]) {
            feedback[i] = LetterFeedback::Yellow;
        }
    }
    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordduel_protocol::LetterFeedback::{Gray, Green, Yellow};

    #[test]
    fn test_exact_match_is_all_green() {
        assert_eq!(evaluate("apple", "apple"), [Green; WORD_LENGTH]);
    }

    #[test]
    fn test_disjoint_words_are_all_gray() {
        assert_eq!(evaluate("donut", "cribs"), [Gray; WORD_LENGTH]);
    }

    #[test]
    fn test_positional_match_is_green_even_with_other_occurrences() {
        // 'l' and 'e' match in place; 'a' leads both words.
        assert_eq!(
            evaluate("angle", "apple"),
            [Green, Gray, Gray, Green, Green]
        );
    }

    #[test]
    fn test_present_elsewhere_is_yellow() {
        // r, o, t all occur in "route" but only r/o line up.
        assert_eq!(
            evaluate("robot", "route"),
            [Green, Green, Gray, Yellow, Yellow]
        );
    }

    #[test]
    fn test_repeated_guess_letter_is_marked_for_each_occurrence() {
        // "apple" has a single 'l', yet both l's in "llama" score yellow.
        // Single-pass scoring marks every occurrence independently.
        assert_eq!(
            evaluate("llama", "apple"),
            [Yellow, Yellow, Yellow, Gray, Yellow]
        );
    }

    #[test]
    fn test_positions_are_independent() {
        // A green elsewhere does not consume the letter for other slots:
        // "table" has one 'e', matched green at the end, yet the leading
        // 'e' still scores yellow.
        assert_eq!(
            evaluate("eagle", "table"),
            [Yellow, Green, Gray, Green, Green]
        );
    }
}
