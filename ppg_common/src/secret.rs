use std::fmt;

/// A wrapper that keeps credentials (API keys, HMAC secrets, admin tokens) out of logs. Both `Debug` and `Display`
/// print a fixed mask, so a `Secret` can only leak through an explicit [`Secret::reveal`] call.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Access the wrapped value. Call sites are easy to audit by grepping for `reveal`.
    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl Secret<String> {
    /// True when a non-empty credential has been supplied. Unset env vars load as empty strings, so the config
    /// `is_configured` checks all route through here.
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }
}

impl<T: Clone + Default> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone + Default> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
