use chrono::NaiveDate;

use crate::models::post::Metadata;

/// "Jul 12" style date used on every card.
pub fn short_date(date: &NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Jul 12 · 3 min read"
pub fn date_and_read_time(metadata: &Metadata) -> String {
    format!(
        "{} · {} min read",
        short_date(&metadata.date),
        metadata.read_time_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::PostAuthor;

    #[test]
    fn formats_card_metadata() {
        let metadata = Metadata {
            author: PostAuthor {
                name: "Ada".to_string(),
                url: None,
            },
            date: NaiveDate::from_ymd_opt(2019, 7, 2).unwrap(),
            read_time_minutes: 3,
        };
        assert_eq!(short_date(&metadata.date), "Jul 2");
        assert_eq!(date_and_read_time(&metadata), "Jul 2 · 3 min read");
    }
}
