// Queue Naming Convention
//
// Queue names are `<country>_<mediaType>_<topic>`, divided by underscores.
// The topic is everything after the second separator and may contain
// underscores itself.

/// Segment separator used in queue names
pub const NAME_SEPARATOR: char = '_';

/// Minimum number of segments for a name to follow the convention
pub const MIN_NAME_SEGMENTS: usize = 3;

/// The parts of a queue name that follows the naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueNameParts {
    /// Country code (first segment, as written)
    pub country: String,
    /// Media type key (second segment, lowercased)
    pub media_type: String,
    /// Remaining segments, rejoined with the separator
    pub topic: String,
}

/// Parse a queue name according to the naming convention.
///
/// Returns `None` when the name has fewer than three underscore-delimited
/// segments. Empty segments count, so `"US__Billing"` parses with an empty
/// media type.
///
/// # Example
///
/// ```
/// use queue_toggle_core::domain::parse_queue_name;
///
/// let parts = parse_queue_name("US_Chat_Billing_Tier_2").unwrap();
/// assert_eq!(parts.media_type, "chat");
/// assert_eq!(parts.topic, "Billing_Tier_2");
/// assert!(parse_queue_name("US_Chat").is_none());
/// ```
pub fn parse_queue_name(name: &str) -> Option<QueueNameParts> {
    let mut segments = name.splitn(MIN_NAME_SEGMENTS, NAME_SEPARATOR);

    let country = segments.next()?;
    let media_type = segments.next()?;
    let topic = segments.next()?;

    Some(QueueNameParts {
        country: country.to_string(),
        media_type: media_type.to_lowercase(),
        topic: topic.to_string(),
    })
}

/// Media type key of a queue name, if the name follows the convention
pub fn media_type_of(name: &str) -> Option<String> {
    parse_queue_name(name).map(|parts| parts.media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rejects_short_names() {
        for name in ["", "US", "US_chat", "_", "nounderscore"] {
            assert!(parse_queue_name(name).is_none(), "{name:?} should not parse");
        }
    }

    #[test]
    fn test_parse_folds_media_type_case() {
        for name in ["US_Chat_Billing", "US_CHAT_Billing", "US_chat_Billing", "US_cHaT_Billing"] {
            let parts = parse_queue_name(name).unwrap();
            assert_eq!(parts.media_type, "chat");
            assert_eq!(parts.country, "US");
            assert_eq!(parts.topic, "Billing");
        }
    }

    #[test]
    fn test_parse_keeps_underscores_in_topic() {
        let parts = parse_queue_name("DE_voice_Sales_Inbound_VIP").unwrap();
        assert_eq!(
            parts,
            QueueNameParts {
                country: "DE".to_string(),
                media_type: "voice".to_string(),
                topic: "Sales_Inbound_VIP".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_counts_empty_segments() {
        let parts = parse_queue_name("US__").unwrap();
        assert_eq!(parts.country, "US");
        assert_eq!(parts.media_type, "");
        assert_eq!(parts.topic, "");

        let parts = parse_queue_name("__x").unwrap();
        assert_eq!(parts.country, "");
        assert_eq!(parts.topic, "x");
    }

    #[test]
    fn test_media_type_of() {
        assert_eq!(media_type_of("NL_Email_Support").as_deref(), Some("email"));
        assert_eq!(media_type_of("Support"), None);
    }
}
