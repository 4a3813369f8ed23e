// Media Type Filter
//
// Distills the agent's queue list into one row per supported media type.

use crate::domain::naming::media_type_of;
use crate::domain::{MediaTypeWhitelist, Queue, RelevantMediaTypeRow};

/// Derive one row per supported media type from the queue snapshot.
///
/// Queues are scanned in order. The first queue of each media type decides
/// that row's join status; later queues of the same media type are ignored
/// even when their joined flag differs. An agent joined to only some queues
/// of a media type therefore sees whatever the first of them reports (use
/// [`is_mixed`] to detect that case). Rows come out in first-seen order, not
/// whitelist order.
pub fn filter_relevant_media_types(
    queues: &[Queue],
    whitelist: &MediaTypeWhitelist,
) -> Vec<RelevantMediaTypeRow> {
    let mut rows: Vec<RelevantMediaTypeRow> = Vec::new();

    for queue in queues {
        let Some(media_type) = media_type_of(&queue.name) else {
            continue;
        };
        if !whitelist.contains(&media_type) {
            continue;
        }
        if rows.iter().any(|row| row.media_type == media_type) {
            continue;
        }
        rows.push(RelevantMediaTypeRow::new(media_type, queue.joined));
    }

    rows
}

/// True when the queues of `media_type` disagree on their joined flag.
///
/// Display hint only; it does not change the row computed above.
pub fn is_mixed(queues: &[Queue], media_type: &str) -> bool {
    let mut statuses = queues
        .iter()
        .filter(|q| media_type_of(&q.name).as_deref() == Some(media_type))
        .map(|q| q.joined);

    match statuses.next() {
        Some(first) => statuses.any(|joined| joined != first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_queues() -> Vec<Queue> {
        vec![
            Queue::new("q1", "US_chat_Billing", true),
            Queue::new("q2", "DE_chat_Support", false),
            Queue::new("q3", "US_voice_Sales", true),
        ]
    }

    #[test]
    fn test_first_seen_wins_and_order_preserved() {
        let rows = filter_relevant_media_types(&sample_queues(), &MediaTypeWhitelist::default());
        assert_eq!(
            rows,
            vec![
                RelevantMediaTypeRow::new("chat", true),
                RelevantMediaTypeRow::new("voice", true),
            ]
        );
    }

    #[test]
    fn test_excludes_unsupported_and_unparseable() {
        let queues = vec![
            Queue::new("q1", "US_sms_Alerts", true),
            Queue::new("q2", "Backoffice", true),
            Queue::new("q3", "US_Email", true),
        ];
        let rows = filter_relevant_media_types(&queues, &MediaTypeWhitelist::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_order_follows_queues_not_whitelist() {
        let queues = vec![
            Queue::new("q1", "US_Voice_Sales", false),
            Queue::new("q2", "US_EMAIL_Claims", true),
            Queue::new("q3", "US_Chat_Billing", true),
        ];
        let rows = filter_relevant_media_types(&queues, &MediaTypeWhitelist::default());
        let keys: Vec<&str> = rows.iter().map(|r| r.media_type.as_str()).collect();
        assert_eq!(keys, vec!["voice", "email", "chat"]);
        assert!(!rows[0].join_status);
    }

    #[test]
    fn test_extended_whitelist_is_honoured() {
        let whitelist = MediaTypeWhitelist::default()
            .with_entries([("sms", "SMS")])
            .unwrap();
        let queues = vec![Queue::new("q1", "US_sms_Alerts", true)];
        let rows = filter_relevant_media_types(&queues, &whitelist);
        assert_eq!(rows, vec![RelevantMediaTypeRow::new("sms", true)]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let queues = sample_queues();
        let whitelist = MediaTypeWhitelist::default();
        assert_eq!(
            filter_relevant_media_types(&queues, &whitelist),
            filter_relevant_media_types(&queues, &whitelist)
        );
    }

    #[test]
    fn test_is_mixed() {
        let queues = sample_queues();
        assert!(is_mixed(&queues, "chat"));
        assert!(!is_mixed(&queues, "voice"));
        assert!(!is_mixed(&queues, "email"));
    }
}
