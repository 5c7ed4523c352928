use chrono::NaiveDate;

use crate::model::{AnalyticsSnapshot, Rating, Status};

/// Headline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCards {
    /// Sum over every status.
    pub total: u64,
    /// Still processing.
    pub pending: u64,
    /// Processed successfully.
    pub completed: u64,
    /// Processing failed.
    pub failed: u64,
}

/// One bar of the rating distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBar {
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Submissions with that rating.
    pub count: u64,
    /// Rounded share of all rated submissions, 0 to 100.
    pub percent: u8,
}

/// One bar of the per-day series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBar {
    /// Calendar day.
    pub date: NaiveDate,
    /// Short label such as `May 1`.
    pub label: String,
    /// Submissions that day.
    pub count: u64,
}

/// Render-ready form of an [`AnalyticsSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsView {
    /// Counters.
    pub cards: StatusCards,
    /// Ratings 1 to 5 in order, zero-filled.
    pub ratings: Vec<RatingBar>,
    /// Days in ascending order.
    pub days: Vec<DayBar>,
    /// Largest daily count, used to scale the bars.
    pub max_daily: u64,
}

impl AnalyticsView {
    /// Bar height for `count` as a percentage of the busiest day.
    pub fn day_height_percent(&self, count: u64) -> u8 {
        percent_of(count, self.max_daily)
    }
}

impl From<&AnalyticsSnapshot> for AnalyticsView {
    fn from(snapshot: &AnalyticsSnapshot) -> Self {
        let status_count = |status: Status| {
            snapshot
                .counts_by_status
                .get(&status)
                .copied()
                .unwrap_or(0)
        };
        let cards = StatusCards {
            total: snapshot.counts_by_status.values().sum(),
            pending: status_count(Status::Pending),
            completed: status_count(Status::Completed),
            failed: status_count(Status::Failed),
        };

        let rated: u64 = (Rating::MIN..=Rating::MAX)
            .filter_map(|rating| snapshot.counts_by_rating.get(&rating))
            .sum();
        let ratings = (Rating::MIN..=Rating::MAX)
            .map(|rating| {
                let count = snapshot.counts_by_rating.get(&rating).copied().unwrap_or(0);
                RatingBar {
                    rating,
                    count,
                    percent: percent_of(count, rated),
                }
            })
            .collect();

        let mut days = snapshot
            .counts_by_day
            .iter()
            .map(|day| DayBar {
                date: day.date,
                label: day.date.format("%b %-d").to_string(),
                count: day.count,
            })
            .collect::<Vec<_>>();
        days.sort_by_key(|day| day.date);
        let max_daily = days.iter().map(|day| day.count).max().unwrap_or(0);

        Self {
            cards,
            ratings,
            days,
            max_daily,
        }
    }
}

fn percent_of(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let percent = (part as f64 / whole as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::DailyCount;

    fn day(raw: &str, count: u64) -> DailyCount {
        DailyCount {
            date: NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date"),
            count,
        }
    }

    #[test]
    fn empty_snapshot_renders_zeroes() {
        let view = AnalyticsView::from(&AnalyticsSnapshot::default());
        assert_eq!(view.cards, StatusCards::default());
        assert_eq!(view.ratings.len(), 5);
        assert!(view.ratings.iter().all(|bar| bar.count == 0 && bar.percent == 0));
        assert!(view.days.is_empty());
        assert_eq!(view.max_daily, 0);
        assert_eq!(view.day_height_percent(0), 0);
    }

    #[test]
    fn cards_sum_statuses() {
        let snapshot = AnalyticsSnapshot {
            counts_by_status: BTreeMap::from([
                (Status::Pending, 2),
                (Status::Completed, 7),
                (Status::Failed, 1),
            ]),
            ..AnalyticsSnapshot::default()
        };
        let view = AnalyticsView::from(&snapshot);
        assert_eq!(
            view.cards,
            StatusCards {
                total: 10,
                pending: 2,
                completed: 7,
                failed: 1,
            }
        );
    }

    #[test]
    fn missing_ratings_are_zero_filled() {
        let snapshot = AnalyticsSnapshot {
            counts_by_rating: BTreeMap::from([(1, 1), (5, 2)]),
            ..AnalyticsSnapshot::default()
        };
        let view = AnalyticsView::from(&snapshot);
        let counts = view.ratings.iter().map(|bar| (bar.rating, bar.count)).collect::<Vec<_>>();
        assert_eq!(counts, vec![(1, 1), (2, 0), (3, 0), (4, 0), (5, 2)]);
        assert_eq!(view.ratings[0].percent, 33);
        assert_eq!(view.ratings[4].percent, 67);
    }

    #[test]
    fn out_of_range_ratings_are_ignored() {
        let snapshot = AnalyticsSnapshot {
            counts_by_rating: BTreeMap::from([(0, 9), (3, 4)]),
            ..AnalyticsSnapshot::default()
        };
        let view = AnalyticsView::from(&snapshot);
        assert_eq!(view.ratings[2].percent, 100);
    }

    #[test]
    fn days_are_sorted_and_labelled() {
        let snapshot = AnalyticsSnapshot {
            counts_by_day: vec![day("2024-05-02", 4), day("2024-04-30", 1), day("2024-05-01", 8)],
            ..AnalyticsSnapshot::default()
        };
        let view = AnalyticsView::from(&snapshot);
        let labels = view.days.iter().map(|day| day.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Apr 30", "May 1", "May 2"]);
        assert_eq!(view.max_daily, 8);
        assert_eq!(view.day_height_percent(4), 50);
    }
}
