//! Dynamic filter/sort pipeline for the movie search endpoint
//!
//! Every optional parameter narrows the result with a conjunctive predicate;
//! unset or default-valued parameters are not applied. There is deliberately
//! no OR/grouping capability. Sorting only honors allow-listed field names;
//! anything else keeps natural order and emits a single warning for the
//! request instead of failing it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::page::PageQuery;
use crate::catalog::movie::Movie;

/// Field names the movie search endpoint accepts in `sort`
pub const SORTABLE_FIELDS: &[&str] = &["title", "premiere_date"];

/// Open set of optional predicates plus sort parameters
///
/// Carries its own page parameters so the search endpoint reads a single
/// query-string shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MovieFilter {
    /// Page number (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Substring match on the title, case-insensitive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Movies carrying this genre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<i32>,

    /// Only movies currently showcasing
    #[serde(default)]
    pub showcasing: bool,

    /// Only movies premiering after today
    #[serde(default)]
    pub upcoming: bool,

    /// Field to sort by; must be one of [`SORTABLE_FIELDS`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[serde(default)]
    pub descending: bool,
}

impl MovieFilter {
    /// The pagination part of the filter
    #[must_use]
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }

    fn has_title(&self) -> bool {
        self.title.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Narrow and order a freshly loaded collection
    ///
    /// The result is unpaginated; the caller slices it afterwards. `today`
    /// anchors the `upcoming` comparison so tests can pin the clock.
    #[must_use]
    pub fn apply(&self, mut movies: Vec<Movie>, today: NaiveDate) -> Vec<Movie> {
        let mut predicates: Vec<Box<dyn Fn(&Movie) -> bool>> = Vec::new();

        if self.has_title() {
            let needle = self
                .title
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            predicates.push(Box::new(move |m| m.title.to_lowercase().contains(&needle)));
        }
        if let Some(genre_id) = self.genre_id {
            predicates.push(Box::new(move |m| m.genre_ids.contains(&genre_id)));
        }
        if self.showcasing {
            predicates.push(Box::new(|m| m.showcasing));
        }
        if self.upcoming {
            predicates.push(Box::new(move |m| m.premiere_date > today));
        }

        movies.retain(|movie| predicates.iter().all(|p| p(movie)));

        self.apply_sort(&mut movies);
        movies
    }

    fn apply_sort(&self, movies: &mut [Movie]) {
        let Some(field) = self.sort.as_deref().filter(|s| !s.is_empty()) else {
            return;
        };

        match field {
            "title" => movies.sort_by(|a, b| a.title.cmp(&b.title)),
            "premiere_date" => movies.sort_by(|a, b| a.premiere_date.cmp(&b.premiere_date)),
            other => {
                // Degrade to natural order; one log entry per request.
                tracing::warn!(
                    field = %other,
                    allowed = ?SORTABLE_FIELDS,
                    "ignoring unrecognized sort field"
                );
                return;
            }
        }

        if self.descending {
            movies.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, showcasing: bool, premiere: NaiveDate, genre_ids: Vec<i32>) -> Movie {
        Movie {
            id: 0,
            title: title.to_string(),
            showcasing,
            premiere_date: premiere,
            genre_ids,
            cast: Vec::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> (Vec<Movie>, NaiveDate) {
        let today = day(2024, 6, 15);
        let movies = vec![
            movie("Movie 1", false, day(2024, 1, 1), vec![1]),
            movie("Movie 2 release tomorrow", false, day(2024, 6, 16), vec![2]),
            movie("Movie 3 on cinema", true, day(2024, 5, 1), vec![1, 2]),
        ];
        (movies, today)
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let (movies, today) = sample();
        let result = MovieFilter::default().apply(movies, today);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn title_filter_is_substring_and_case_insensitive() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            title: Some("movie 1".to_string()),
            ..Default::default()
        };
        let result = filter.apply(movies, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Movie 1");
    }

    #[test]
    fn empty_title_is_not_applied() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.apply(movies, today).len(), 3);
    }

    #[test]
    fn showcasing_flag_matches_exactly() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            showcasing: true,
            ..Default::default()
        };
        let result = filter.apply(movies, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Movie 3 on cinema");
    }

    #[test]
    fn upcoming_means_premiere_strictly_after_today() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            upcoming: true,
            ..Default::default()
        };
        let result = filter.apply(movies, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Movie 2 release tomorrow");
    }

    #[test]
    fn genre_filter_tests_membership() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            genre_id: Some(2),
            ..Default::default()
        };
        let titles: Vec<_> = filter
            .apply(movies, today)
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Movie 2 release tomorrow", "Movie 3 on cinema"]);
    }

    #[test]
    fn filters_compose_with_and() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            genre_id: Some(2),
            showcasing: true,
            ..Default::default()
        };
        let result = filter.apply(movies, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Movie 3 on cinema");
    }

    #[test]
    fn sort_by_title_descending() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            sort: Some("title".to_string()),
            descending: true,
            ..Default::default()
        };
        let titles: Vec<_> = filter
            .apply(movies, today)
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Movie 3 on cinema", "Movie 2 release tomorrow", "Movie 1"]
        );
    }

    #[test]
    fn sort_by_premiere_date() {
        let (movies, today) = sample();
        let filter = MovieFilter {
            sort: Some("premiere_date".to_string()),
            ..Default::default()
        };
        let titles: Vec<_> = filter
            .apply(movies, today)
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Movie 1", "Movie 3 on cinema", "Movie 2 release tomorrow"]
        );
    }

    #[test]
    fn unknown_sort_field_degrades_to_natural_order() {
        let (movies, today) = sample();
        let unsorted = MovieFilter::default().apply(movies.clone(), today);

        let filter = MovieFilter {
            sort: Some("poster; drop table movies".to_string()),
            ..Default::default()
        };
        let degraded = filter.apply(movies, today);
        assert_eq!(degraded, unsorted);
    }

    #[test]
    fn page_query_carries_pagination_fields() {
        let filter = MovieFilter {
            page: Some(3),
            per_page: Some(7),
            ..Default::default()
        };
        let page = filter.page_query();
        assert_eq!(page.page_number(), 3);
        assert_eq!(page.items_per_page(), 7);
    }
}
