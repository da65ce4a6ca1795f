//! Pre-flight checks for options values.
//!
//! The enumerated sets are fixed, case-sensitive and sorted so membership is a
//! binary search.

use crate::error::ValidationError;
use crate::options::{EverythingOptions, SourcesOptions, TopHeadlinesOptions};

pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_SOURCES: usize = 20;

pub const CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

pub const LANGUAGES: &[&str] = &[
    "ar", "de", "en", "es", "fr", "he", "it", "nl", "no", "pt", "ru", "se", "ud", "zh",
];

pub const COUNTRIES: &[&str] = &[
    "ae", "ar", "at", "au", "be", "bg", "br", "ca", "ch", "cn", "co", "cu", "cz", "de", "eg", "fr",
    "gb", "gr", "hk", "hu", "id", "ie", "il", "in", "it", "jp", "kr", "lt", "lv", "ma", "mx", "my",
    "ng", "nl", "no", "nz", "ph", "pl", "pt", "ro", "rs", "ru", "sa", "se", "sg", "si", "sk", "th",
    "tr", "tw", "ua", "us", "ve", "za",
];

pub const SORT_ORDERS: &[&str] = &["popularity", "publishedAt", "relevancy"];

fn is_one_of(value: &str, set: &[&str]) -> bool {
    set.binary_search(&value).is_ok()
}

fn check_member(
    value: &str,
    set: &[&str],
    err: fn(String) -> ValidationError,
) -> Result<(), ValidationError> {
    if value.is_empty() || is_one_of(value, set) {
        Ok(())
    } else {
        Err(err(value.to_string()))
    }
}

fn check_page_size(page_size: u32) -> Result<(), ValidationError> {
    if page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::PageSizeTooLarge(page_size));
    }
    Ok(())
}

pub fn validate_top_headlines(opts: &TopHeadlinesOptions) -> Result<(), ValidationError> {
    if opts.q.is_empty() && opts.category.is_empty() && opts.country.is_empty() && opts.sources.is_empty() {
        return Err(ValidationError::TopHeadlinesScopeMissing);
    }
    check_member(&opts.category, CATEGORIES, ValidationError::InvalidCategory)?;
    check_member(&opts.country, COUNTRIES, ValidationError::InvalidCountry)?;
    if !opts.sources.is_empty() && (!opts.category.is_empty() || !opts.country.is_empty()) {
        return Err(ValidationError::SourcesWithCategoryOrCountry);
    }
    check_page_size(opts.page_size)
}

pub fn validate_everything(opts: &EverythingOptions) -> Result<(), ValidationError> {
    if opts.q.is_empty() && opts.q_in_title.is_empty() && opts.sources.is_empty() && opts.domains.is_empty() {
        return Err(ValidationError::EverythingScopeMissing);
    }
    check_member(&opts.language, LANGUAGES, ValidationError::InvalidLanguage)?;
    check_member(&opts.sort_by, SORT_ORDERS, ValidationError::InvalidSortBy)?;
    if opts.sources.len() > MAX_SOURCES {
        return Err(ValidationError::TooManySources(opts.sources.len()));
    }
    check_page_size(opts.page_size)
}

pub fn validate_sources(opts: &SourcesOptions) -> Result<(), ValidationError> {
    check_member(&opts.category, CATEGORIES, ValidationError::InvalidCategory)?;
    check_member(&opts.country, COUNTRIES, ValidationError::InvalidCountry)?;
    check_member(&opts.language, LANGUAGES, ValidationError::InvalidLanguage)
}
