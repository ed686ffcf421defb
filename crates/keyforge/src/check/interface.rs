use alloc::string::String;

use crate::error::Result;

/// A strategy deriving a single verification character from an identifier.
///
/// Implementations must be deterministic: [`CheckDigit::verify`] re-derives
/// the digit from the identifier body and compares it with the last
/// character. Any `Fn(&str, u8) -> char` is a strategy too, which makes it
/// easy to plug a custom scheme into [`crate::ConfigBuilder::check_digit`].
///
/// # Example
///
/// ```
/// use keyforge::CheckDigit;
///
/// // Always appends `X`; useful only as an illustration.
/// let strategy = |_: &str, _: u8| 'X';
/// assert_eq!(strategy.append("ABC", 36).unwrap(), "ABCX");
/// assert!(strategy.verify("ABCX", 36));
/// ```
pub trait CheckDigit {
    /// Computes the check character for `id` in `radix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot render a digit for `radix`.
    fn compute(&self, id: &str, radix: u8) -> Result<char>;

    /// Returns `id` followed by its check character.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CheckDigit::compute`].
    fn append(&self, id: &str, radix: u8) -> Result<String> {
        let digit = self.compute(id, radix)?;
        let mut out = String::with_capacity(id.len() + digit.len_utf8());
        out.push_str(id);
        out.push(digit);
        Ok(out)
    }

    /// Returns `true` if the last character of `id_with_digit` is the check
    /// character of everything before it.
    ///
    /// A mismatch is an ordinary outcome (a mistyped code), so this never
    /// fails: empty input or an unusable radix simply verify as `false`.
    fn verify(&self, id_with_digit: &str, radix: u8) -> bool {
        let Some((split, expected)) = id_with_digit.char_indices().next_back() else {
            return false;
        };
        self.compute(&id_with_digit[..split], radix)
            .is_ok_and(|digit| digit == expected)
    }
}

impl<F> CheckDigit for F
where
    F: Fn(&str, u8) -> char,
{
    fn compute(&self, id: &str, radix: u8) -> Result<char> {
        Ok(self(id, radix))
    }
}
