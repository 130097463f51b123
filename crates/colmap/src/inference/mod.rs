//! Value-pattern scoring and phone-column detection.

pub mod patterns;
mod phone;

pub use patterns::{currency_score, date_score, text_score, type_score, url_score};
pub use phone::{detect_phone_columns, PhoneColumnDetector, PhoneColumnSuggestion, PHONE_KEYWORDS};
