/// Localized strings keyed by their English source text.
pub trait TranslatorPort: Send + Sync {
    /// Returns the translation of `key`, or `key` itself when none exists.
    fn translate(&self, key: &str) -> String;
}
