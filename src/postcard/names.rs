use crate::errors::NameError;

/// Guess how to greet the recipient of `address`.
///
/// Only the first line is looked at. With three or more words, a longer
/// second word is taken as the name, so a short title such as "Mr" or "Dr"
/// is skipped. Otherwise the first word is used.
pub fn first_name(address: &str) -> Result<&str, NameError> {
    let first_line = address.lines().next().ok_or(NameError::NoName)?;
    let tokens: Vec<&str> = first_line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(NameError::NoName),
        [title, name, _, ..] if name.chars().count() > title.chars().count() => Ok(*name),
        [first, ..] => Ok(*first),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_title_is_skipped() {
        assert_eq!(first_name("Mr Alexander Hamilton"), Ok("Alexander"));
        assert_eq!(
            first_name("Dr. Martin Luther King\n1 Sweet Auburn\nAtlanta"),
            Ok("Martin")
        );
    }

    #[test]
    fn test_two_words() {
        assert_eq!(first_name("Jane Smith\n12 Elm St"), Ok("Jane"));
        assert_eq!(first_name("Mr Smith"), Ok("Mr"));
    }

    #[test]
    fn test_short_second_word_keeps_first() {
        assert_eq!(first_name("Alexander J Hamilton"), Ok("Alexander"));
    }

    #[test]
    fn test_single_word_and_padding() {
        assert_eq!(first_name("  Cher  \nHollywood"), Ok("Cher"));
    }

    #[test]
    fn test_no_name() {
        assert_eq!(first_name(""), Err(NameError::NoName));
        assert_eq!(first_name("   \nJane Smith"), Err(NameError::NoName));
    }
}
