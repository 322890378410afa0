use chrono::NaiveDateTime;

use crate::models::venue_models::{Venue, VenueArea, VenueSummary};

/// Groups venues into (city, state) areas. Callers must pass rows already
/// ordered by location so equal keys are adjacent; one ordered query
/// replaces the legacy scan over every (location, venue) pair.
pub fn group_venues_by_location(rows: Vec<Venue>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    for venue in rows {
        if let Some(area) = areas.last_mut() {
            if area.city == venue.city && area.state == venue.state {
                area.venues.push(VenueSummary {
                    id: venue.id,
                    name: venue.name,
                });
                continue;
            }
        }
        areas.push(VenueArea {
            city: venue.city,
            state: venue.state,
            venues: vec![VenueSummary {
                id: venue.id,
                name: venue.name,
            }],
        });
    }
    areas
}

/// Splits items into (past, upcoming) by strict comparison against a single
/// reference instant. An item whose start time equals `now` lands in
/// neither bucket.
pub fn partition_by_time<T, F>(items: Vec<T>, now: NaiveDateTime, start_time: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> NaiveDateTime,
{
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for item in items {
        let t = start_time(&item);
        if t < now {
            past.push(item);
        } else if t > now {
            upcoming.push(item);
        }
    }
    (past, upcoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn venue(id: i32, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "123 Main St".to_string(),
            phone: None,
            genres: "{Rock}".to_string(),
            facebook_link: "https://facebook.com/v".to_string(),
            image_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn groups_adjacent_venues_by_city_and_state() {
        let rows = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
        ];
        let areas = group_venues_by_location(rows);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].state, "CA");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[1].venues[0].id, 2);
    }

    #[test]
    fn same_city_name_in_different_states_stays_separate() {
        let rows = vec![
            venue(1, "Pavilion East", "Springfield", "IL"),
            venue(2, "Pavilion West", "Springfield", "MO"),
        ];
        let areas = group_venues_by_location(rows);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn flattening_areas_yields_every_venue_exactly_once() {
        let rows = vec![
            venue(1, "A", "San Francisco", "CA"),
            venue(2, "B", "San Francisco", "CA"),
            venue(3, "C", "New York", "NY"),
            venue(4, "D", "Seattle", "WA"),
        ];
        let areas = group_venues_by_location(rows);

        let mut flattened: Vec<i32> = areas
            .iter()
            .flat_map(|a| a.venues.iter().map(|v| v.id))
            .collect();
        flattened.sort_unstable();
        assert_eq!(flattened, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_input_yields_no_areas() {
        assert!(group_venues_by_location(Vec::new()).is_empty());
    }

    #[test]
    fn partitions_by_strict_comparison() {
        let now = ts(2030, 6, 15, 12);
        let items = vec![ts(2030, 6, 14, 12), ts(2030, 6, 16, 12), ts(2020, 1, 1, 0)];
        let (past, upcoming) = partition_by_time(items, now, |t| *t);

        assert_eq!(past, vec![ts(2030, 6, 14, 12), ts(2020, 1, 1, 0)]);
        assert_eq!(upcoming, vec![ts(2030, 6, 16, 12)]);
    }

    #[test]
    fn start_time_equal_to_now_lands_in_neither_bucket() {
        let now = ts(2030, 6, 15, 12);
        let (past, upcoming) = partition_by_time(vec![now], now, |t| *t);
        assert!(past.is_empty());
        assert!(upcoming.is_empty());
    }
}
