use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating sort direction query parameters
    /// Lowercase only, whole-value match
    /// - Valid: "asc", "desc"
    /// - Invalid: "ASC", "ascending", "up", ""
    pub static ref SORT_DIR_REGEX: Regex = Regex::new(r"^(asc|desc)$").unwrap();
}
