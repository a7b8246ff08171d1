use crate::domain::catalog::Catalog;
use crate::domain::model::Activity;
use crate::domain::query::Query;

/// Filters the catalog for a query, keeping catalog order.
///
/// A featured id short-circuits everything else. Malformed numbers match
/// nothing, and categories without a tag mapping do not filter.
pub fn find_activities(catalog: &Catalog, query: &Query) -> Vec<Activity> {
    if let Some(featured_id) = &query.featured_id {
        return catalog.get(featured_id).cloned().into_iter().collect();
    }

    let (Some(age), Some(minutes)) = (query.age.value(), query.available_minutes.value()) else {
        tracing::debug!(
            "Malformed age/time in query (age={}, time={}), nothing matches",
            query.age,
            query.available_minutes
        );
        return Vec::new();
    };

    let category_tags = query.category.as_ref().and_then(|category| category.tags());

    catalog
        .activities()
        .iter()
        .filter(|activity| activity.suits_age(age) && activity.fits_in(minutes))
        .filter(|activity| category_tags.map_or(true, |tags| activity.has_any_tag(tags)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, InputNumber};
    use crate::domain::video::VideoRef;

    fn activity(id: &str, min_age: i64, max_age: i64, minutes: i64, tags: &[&str]) -> Activity {
        Activity {
            id: id.to_string(),
            title: format!("Game {}", id),
            description: String::new(),
            min_age,
            max_age,
            time_required_minutes: minutes,
            video: VideoRef::new(format!("vid{}", id)),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn ids(activities: &[Activity]) -> Vec<&str> {
        activities.iter().map(|a| a.id.as_str()).collect()
    }

    fn scenario_catalog() -> Catalog {
        Catalog::new(vec![
            activity("a", 2, 5, 5, &["indoor"]),
            activity("b", 4, 8, 10, &["outdoor"]),
            activity("c", 6, 12, 15, &["creative"]),
            activity("d", 3, 9, 20, &["group"]),
            activity("e", 7, 12, 5, &["art"]),
        ])
    }

    #[test]
    fn test_age_and_time_scenario() {
        let result = find_activities(&scenario_catalog(), &Query::new(6, 15));
        assert_eq!(ids(&result), vec!["b", "c"]);
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let catalog = scenario_catalog();
        assert_eq!(ids(&find_activities(&catalog, &Query::new(2, 60))), vec!["a"]);
        assert_eq!(
            ids(&find_activities(&catalog, &Query::new(12, 60))),
            vec!["c", "e"]
        );
        assert!(find_activities(&catalog, &Query::new(1, 60)).is_empty());
        assert!(find_activities(&catalog, &Query::new(13, 60)).is_empty());
    }

    #[test]
    fn test_out_of_range_entries_excluded_for_every_age_and_time() {
        let catalog = Catalog::builtin();
        for age in 0..=14 {
            for minutes in [0, 5, 10, 15, 20, 60] {
                let result = find_activities(&catalog, &Query::new(age, minutes));
                for activity in catalog.activities() {
                    let expected = activity.min_age <= age
                        && age <= activity.max_age
                        && activity.time_required_minutes <= minutes;
                    assert_eq!(
                        result.iter().any(|a| a.id == activity.id),
                        expected,
                        "{} at age {} / {} min",
                        activity.title,
                        age,
                        minutes
                    );
                }
            }
        }
    }

    #[test]
    fn test_featured_ignores_other_fields() {
        let catalog = Catalog::builtin();
        let mut query = Query::featured("11");
        query.age = InputNumber::Value(12);
        query.available_minutes = InputNumber::Malformed;
        query.category = Some(Category::Group);

        let result = find_activities(&catalog, &query);
        assert_eq!(ids(&result), vec!["11"]);
    }

    #[test]
    fn test_featured_unknown_id_is_empty() {
        let result = find_activities(&Catalog::builtin(), &Query::featured("404"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_filtering() {
        let catalog = scenario_catalog();
        let creative = Query::new(8, 60).with_category(Some(Category::Creative));
        assert_eq!(ids(&find_activities(&catalog, &creative)), vec!["c", "e"]);

        let group = Query::new(8, 60).with_category(Some(Category::Group));
        assert_eq!(ids(&find_activities(&catalog, &group)), vec!["d"]);
    }

    #[test]
    fn test_all_and_unmapped_categories_do_not_filter() {
        let catalog = scenario_catalog();
        let unfiltered = find_activities(&catalog, &Query::new(8, 60));

        let all = Query::new(8, 60).with_category(Some(Category::All));
        assert_eq!(find_activities(&catalog, &all), unfiltered);

        let unmapped = Query::new(8, 60).with_category(Category::parse("group-play"));
        assert_eq!(find_activities(&catalog, &unmapped), unfiltered);
    }

    #[test]
    fn test_malformed_numbers_match_nothing() {
        let catalog = Catalog::builtin();
        let mut query = Query::new(6, 15);
        query.age = InputNumber::Malformed;
        assert!(find_activities(&catalog, &query).is_empty());

        let mut query = Query::new(6, 15);
        query.available_minutes = InputNumber::Malformed;
        assert!(find_activities(&catalog, &query).is_empty());
    }

    #[test]
    fn test_builtin_catalog_creative_for_six_year_old() {
        let query = Query::new(6, 20).with_category(Some(Category::Creative));
        let result = find_activities(&Catalog::builtin(), &query);
        assert_eq!(ids(&result), vec!["9"]);
    }

    #[test]
    fn test_fractional_age_matches_nothing() {
        let query = Query::from_query_string("age=6.5&time=15");
        assert_eq!(query.age, InputNumber::Malformed);
        assert!(find_activities(&Catalog::builtin(), &query).is_empty());
    }

    #[test]
    fn test_capitalized_category_does_not_filter() {
        let catalog = Catalog::builtin();
        let capitalized = Query::from_query_string("age=6&time=20&category=Creative");
        let unfiltered = Query::new(6, 20);
        assert_eq!(
            find_activities(&catalog, &capitalized),
            find_activities(&catalog, &unfiltered)
        );
    }

    #[test]
    fn test_output_keeps_catalog_order() {
        let result = find_activities(&Catalog::builtin(), &Query::new(5, 60));
        let positions: Vec<usize> = result
            .iter()
            .map(|a| a.id.parse::<usize>().unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
