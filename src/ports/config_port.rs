//! Configuration access port trait.

/// Read access to `[section] key` settings. Numeric and boolean getters fall
/// back to `default` when the key is absent or unparseable.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
