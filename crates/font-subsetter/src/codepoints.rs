use std::collections::BTreeSet;

use log::warn;

/// Parses decimal codepoint tokens, as received from a managed caller.
///
/// Tokens that are not unsigned decimal integers are skipped with a warning.
/// Duplicates collapse.
pub fn parse_codepoints<I>(tokens: I) -> BTreeSet<u32>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|token| {
            let token = token.as_ref().trim();
            match token.parse::<u32>() {
                Ok(cp) => Some(cp),
                Err(e) => {
                    warn!("Skipping codepoint token '{token}': {e}");
                    None
                }
            }
        })
        .collect()
}
