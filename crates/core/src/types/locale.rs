//! Static language and country tables for the locale pickers.

use serde::Serialize;

/// A selectable interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

/// A selectable shipping country and its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub name: &'static str,
    pub code: &'static str,
    pub currency: &'static str,
    pub flag: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { name: "English", code: "en" },
    Language { name: "Spanish", code: "es" },
    Language { name: "French", code: "fr" },
    Language { name: "German", code: "de" },
    Language { name: "Hindi", code: "hi" },
    Language { name: "Japanese", code: "ja" },
    Language { name: "Portuguese", code: "pt" },
    Language { name: "Russian", code: "ru" },
    Language { name: "Arabic", code: "ar" },
];

pub const COUNTRIES: &[Country] = &[
    Country { name: "United States", code: "US", currency: "USD", flag: "🇺🇸" },
    Country { name: "India", code: "IN", currency: "INR", flag: "🇮🇳" },
    Country { name: "United Kingdom", code: "GB", currency: "GBP", flag: "🇬🇧" },
    Country { name: "Canada", code: "CA", currency: "CAD", flag: "🇨🇦" },
    Country { name: "Australia", code: "AU", currency: "AUD", flag: "🇦🇺" },
    Country { name: "Germany", code: "DE", currency: "EUR", flag: "🇩🇪" },
    Country { name: "France", code: "FR", currency: "EUR", flag: "🇫🇷" },
    Country { name: "Japan", code: "JP", currency: "JPY", flag: "🇯🇵" },
    Country { name: "Brazil", code: "BR", currency: "BRL", flag: "🇧🇷" },
    Country { name: "South Africa", code: "ZA", currency: "ZAR", flag: "🇿🇦" },
    Country { name: "Anguilla", code: "AI", currency: "XCD", flag: "🇦🇮" },
    Country { name: "Antigua and Barbuda", code: "AG", currency: "XCD", flag: "🇦🇬" },
    Country { name: "Argentina", code: "AR", currency: "ARS", flag: "🇦🇷" },
    Country { name: "Armenia", code: "AM", currency: "AMD", flag: "🇦🇲" },
    Country { name: "Aruba", code: "AW", currency: "AWG", flag: "🇦🇼" },
];

/// Find a language by ISO 639-1 code (case-insensitive).
#[must_use]
pub fn language_by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Find a country by ISO 3166-1 alpha-2 code (case-insensitive).
#[must_use]
pub fn country_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}
