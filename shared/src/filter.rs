use crate::monastery::Monastery;

/// Checkbox state of the map filter panel. Every checked box is an
/// independent predicate; a marker is shown only if it passes all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapFilters {
    pub century_17th: bool,
    pub century_18th: bool,
    pub virtual_tour: bool,
}

impl MapFilters {
    pub fn is_empty(&self) -> bool {
        !self.century_17th && !self.century_18th && !self.virtual_tour
    }

    pub fn matches(&self, monastery: &Monastery) -> bool {
        if self.century_17th && monastery.century != "17th" {
            return false;
        }
        if self.century_18th && monastery.century != "18th" {
            return false;
        }
        if self.virtual_tour && !monastery.virtual_tour {
            return false;
        }
        true
    }

    /// Human-readable list of the checked boxes, in panel order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.century_17th {
            labels.push("17th Century");
        }
        if self.century_18th {
            labels.push("18th Century");
        }
        if self.virtual_tour {
            labels.push("Virtual Tour Available");
        }
        labels
    }
}

/// Case-insensitive substring match across name, description, century and
/// event names. A blank query matches everything.
pub fn matches_search(monastery: &Monastery, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    monastery.name.to_lowercase().contains(&needle)
        || monastery.description.to_lowercase().contains(&needle)
        || monastery.century.to_lowercase().contains(&needle)
        || monastery
            .events
            .iter()
            .any(|event| event.to_lowercase().contains(&needle))
}

/// Ids of markers that should stay visible for the given filters and query.
pub fn visible_ids(monasteries: &[Monastery], filters: &MapFilters, query: &str) -> Vec<u32> {
    monasteries
        .iter()
        .filter(|m| filters.matches(m) && matches_search(m, query))
        .map(|m| m.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monastery::sample_monasteries;

    fn visible_names(filters: MapFilters, query: &str) -> Vec<String> {
        let monasteries = sample_monasteries().expect("bundled dataset parses");
        let ids = visible_ids(&monasteries, &filters, query);
        monasteries
            .into_iter()
            .filter(|m| ids.contains(&m.id))
            .map(|m| m.name.trim_end_matches(" Monastery").to_string())
            .collect()
    }

    #[test]
    fn no_filters_and_blank_query_show_everything() {
        assert_eq!(visible_names(MapFilters::default(), "   ").len(), 6);
    }

    #[test]
    fn seventeenth_century_leaves_pemayangtse_and_tashiding() {
        let filters = MapFilters {
            century_17th: true,
            ..MapFilters::default()
        };
        assert_eq!(visible_names(filters, ""), vec!["Pemayangtse", "Tashiding"]);
    }

    #[test]
    fn eighteenth_century_leaves_phodong_and_ralang() {
        let filters = MapFilters {
            century_18th: true,
            ..MapFilters::default()
        };
        assert_eq!(visible_names(filters, ""), vec!["Phodong", "Ralang"]);
    }

    #[test]
    fn both_centuries_are_conjunctive_and_hide_everything() {
        let filters = MapFilters {
            century_17th: true,
            century_18th: true,
            ..MapFilters::default()
        };
        assert!(visible_names(filters, "").is_empty());
    }

    #[test]
    fn virtual_tour_filter() {
        let filters = MapFilters {
            virtual_tour: true,
            ..MapFilters::default()
        };
        assert_eq!(
            visible_names(filters, ""),
            vec!["Rumtek", "Pemayangtse", "Enchey", "Ralang"]
        );
    }

    #[test]
    fn seventeenth_century_with_virtual_tour() {
        let filters = MapFilters {
            century_17th: true,
            virtual_tour: true,
            ..MapFilters::default()
        };
        assert_eq!(visible_names(filters, ""), vec!["Pemayangtse"]);
    }

    // Rumtek's bundled record lists "Golden Stupa Prayers" on top of its two
    // historical events so that an event-only term has a match.
    #[test]
    fn search_matches_event_names_case_insensitively() {
        assert_eq!(visible_names(MapFilters::default(), "STUPA"), vec!["Rumtek"]);
    }

    #[test]
    fn search_matches_century_and_description() {
        assert_eq!(
            visible_names(MapFilters::default(), "19th"),
            vec!["Enchey"]
        );
        assert_eq!(
            visible_names(MapFilters::default(), "murals"),
            vec!["Phodong"]
        );
    }

    #[test]
    fn search_is_combined_with_filters() {
        let filters = MapFilters {
            century_18th: true,
            ..MapFilters::default()
        };
        assert_eq!(visible_names(filters, "festival"), vec!["Phodong", "Ralang"]);
        assert!(visible_names(filters, "rumtek").is_empty());
    }

    #[test]
    fn labels_follow_panel_order() {
        let filters = MapFilters {
            century_17th: true,
            virtual_tour: true,
            ..MapFilters::default()
        };
        assert_eq!(filters.labels(), vec!["17th Century", "Virtual Tour Available"]);
        assert!(MapFilters::default().is_empty());
    }
}
