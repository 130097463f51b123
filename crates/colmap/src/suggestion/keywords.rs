//! Fixed keyword tables used by header and context scoring.

/// Known placeholder labels and the column-name keywords that fit them.
const HEADER_KEYWORDS: &[(&str, &[&str])] = &[
    ("customer name", &["name", "customer", "client", "user", "person", "caller"]),
    ("name", &["name", "customer", "client", "user", "person", "caller"]),
    ("first name", &["first", "fname", "given", "name"]),
    ("last name", &["last", "lname", "surname", "family"]),
    ("phone number", &["phone", "mobile", "contact", "tel", "cell", "whatsapp"]),
    ("email", &["email", "mail"]),
    ("amount", &["amount", "price", "total", "cost", "balance", "due", "fee"]),
    ("date", &["date", "day", "time", "due", "expiry", "schedule"]),
    ("order id", &["order", "id", "invoice", "reference", "ref", "booking"]),
    ("company name", &["company", "business", "organization", "org", "brand", "store"]),
    ("address", &["address", "street", "addr", "location"]),
    ("city", &["city", "town", "location"]),
    ("link", &["url", "link", "website", "site"]),
    ("url", &["url", "link", "website", "site"]),
    ("code", &["otp", "code", "pin", "coupon"]),
    ("product", &["product", "item", "sku", "plan"]),
];

/// Cue words in template context and the column keywords they point to.
const CONTEXT_CUES: &[(&[&str], &[&str])] = &[
    (
        &["hi", "hello", "dear", "hey", "namaste", "welcome"],
        &["name", "customer", "client", "first"],
    ),
    (
        &["amount", "pay", "paid", "payment", "due", "balance", "rs", "inr", "usd", "price", "total", "bill"],
        &["amount", "price", "total", "balance", "due", "cost", "fee"],
    ),
    (
        &["date", "by", "before", "until", "expires", "expiry", "scheduled", "appointment"],
        &["date", "day", "time", "due", "expiry", "schedule"],
    ),
    (
        &["link", "visit", "click", "url", "website", "track"],
        &["url", "link", "website", "site"],
    ),
    (
        &["order", "invoice", "booking", "reference", "ref", "ticket"],
        &["order", "invoice", "booking", "ref", "id"],
    ),
    (
        &["team", "regards", "thanks", "from"],
        &["company", "business", "brand", "store", "shop"],
    ),
];

/// Lowercase, turn `_`/`-` into spaces and collapse whitespace.
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Column keywords registered for a label, if the label is known.
pub(crate) fn header_keywords(label: &str) -> Option<&'static [&'static str]> {
    let label = normalize(label);
    HEADER_KEYWORDS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, keywords)| *keywords)
}

/// Column keywords implied by cue words found in the context.
pub(crate) fn context_keywords(context: &str) -> Vec<&'static str> {
    let lower = context.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut keywords = Vec::new();
    for (cues, targets) in CONTEXT_CUES {
        if cues.iter().any(|cue| words.contains(cue)) {
            for target in *targets {
                if !keywords.contains(target) {
                    keywords.push(*target);
                }
            }
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Customer_Name "), "customer name");
        assert_eq!(normalize("order-ID"), "order id");
    }

    #[test]
    fn test_header_keywords_lookup() {
        let keywords = header_keywords("Customer Name").unwrap();
        assert!(keywords.contains(&"client"));
        assert!(header_keywords("Favourite Colour").is_none());
    }

    #[test]
    fn test_context_keywords_whole_words() {
        let keywords = context_keywords("Hi {{1}}, your bill is ready");
        assert!(keywords.contains(&"name"));
        assert!(keywords.contains(&"amount"));

        // "this" must not trigger the "hi" greeting cue
        assert!(context_keywords("this is it").is_empty());
    }
}
