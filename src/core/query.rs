use crate::core::catalog::Catalog;
use crate::core::registry::CaptureRegistry;
use crate::core::{Creature, CreaturePage, DecoratedCreature, Result};
use crate::utils::error::PokedexError;
use crate::utils::validation::{non_blank, parse_field_name, parse_positive_int};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_SORT_FIELD: &str = "number";
const FALLBACK_SORT_FIELD: &str = "name";
const ALL_TYPES: &str = "all";

/// Raw listing parameters as they arrive on the query string.
///
/// Kept as strings so malformed numbers become `InvalidParameter`
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_order: Option<String>,
    pub sort_by: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PokedexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PokedexError::invalid_parameter(
                "sort_order",
                s,
                "expected 'asc' or 'desc'",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    /// Lowercased type name.
    Only(String),
}

impl TypeFilter {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() || lowered == ALL_TYPES {
            Self::All
        } else {
            Self::Only(lowered)
        }
    }

    fn accepts(&self, creature: &Creature) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => creature.has_type(wanted),
        }
    }
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub page_size: usize,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub type_filter: TypeFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::Asc,
            type_filter: TypeFilter::All,
        }
    }
}

impl ListQuery {
    pub fn from_params(params: &ListParams, default_page_size: usize) -> Result<Self> {
        let page = params
            .page
            .as_deref()
            .map(|raw| parse_positive_int("page", raw))
            .transpose()?
            .unwrap_or(DEFAULT_PAGE);

        let page_size = params
            .page_size
            .as_deref()
            .map(|raw| parse_positive_int("page_size", raw))
            .transpose()?
            .unwrap_or(default_page_size);

        let sort_order = params
            .sort_order
            .as_deref()
            .map(SortOrder::from_str)
            .transpose()?
            .unwrap_or_default();

        let sort_by = non_blank(params.sort_by.as_deref())
            .map(|raw| parse_field_name("sort_by", raw))
            .transpose()?
            .unwrap_or(DEFAULT_SORT_FIELD)
            .to_string();

        let type_filter = non_blank(params.type_filter.as_deref())
            .map(TypeFilter::parse)
            .unwrap_or_default();

        Ok(Self {
            page,
            page_size,
            sort_by,
            sort_order,
            type_filter,
        })
    }
}

/// Filter, sort, paginate and decorate the catalog for one response.
pub fn list_creatures(
    catalog: &Catalog,
    registry: &CaptureRegistry,
    query: &ListQuery,
) -> CreaturePage {
    let mut selected: Vec<&Creature> = catalog
        .creatures()
        .iter()
        .filter(|c| query.type_filter.accepts(c))
        .collect();

    sort_creatures(&mut selected, &query.sort_by, query.sort_order);

    let total_items = selected.len();
    let total_pages = total_items.div_ceil(query.page_size);

    let pokemon: Vec<DecoratedCreature> = page_bounds(total_items, query.page, query.page_size)
        .map(|(start, end)| {
            selected[start..end]
                .iter()
                .map(|c| DecoratedCreature::new((*c).clone(), registry.is_captured(&c.name)))
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(
        page = query.page,
        page_size = query.page_size,
        sort_by = %query.sort_by,
        filter = ?query.type_filter,
        total_items,
        returned = pokemon.len(),
        "Listed creatures"
    );

    CreaturePage {
        pokemon,
        total_items,
        total_pages,
        current_page: query.page,
        page_size: query.page_size,
    }
}

/// Half-open slice bounds of `page`, or `None` when the page lies past the end.
fn page_bounds(total: usize, page: usize, page_size: usize) -> Option<(usize, usize)> {
    let start = page.checked_sub(1)?.checked_mul(page_size)?;
    if start >= total {
        return None;
    }
    Some((start, start.saturating_add(page_size).min(total)))
}

fn sort_creatures(creatures: &mut Vec<&Creature>, sort_by: &str, order: SortOrder) {
    let field = if creatures.iter().any(|c| c.field(sort_by).is_some()) {
        sort_by
    } else {
        if !creatures.is_empty() {
            tracing::debug!("Sort field '{}' not present, sorting by name", sort_by);
        }
        FALLBACK_SORT_FIELD
    };

    let mut keyed: Vec<(Option<Cow<'_, Value>>, &Creature)> =
        creatures.iter().map(|&c| (c.field(field), c)).collect();

    // 缺少欄位的紀錄不論方向一律排在最後
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    *creatures = keyed.into_iter().map(|(_, c)| c).collect();
}

/// Natural ordering within a JSON kind; across kinds, a fixed kind rank.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn fixture() -> (Arc<Catalog>, CaptureRegistry) {
        let catalog = Arc::new(
            Catalog::new(vec![
                Creature::new(4, "Charmander", "Fire").with_attribute("speed", 65),
                Creature::new(1, "Bulbasaur", "Grass")
                    .with_type_two("Poison")
                    .with_attribute("speed", 45),
                Creature::new(7, "Squirtle", "Water").with_attribute("speed", 43),
                Creature::new(6, "Charizard", "Fire")
                    .with_type_two("Flying")
                    .with_attribute("speed", 100),
                Creature::new(12, "Butterfree", "Bug").with_type_two("Flying"),
            ])
            .unwrap(),
        );
        let registry = CaptureRegistry::new(Arc::clone(&catalog));
        (catalog, registry)
    }

    fn numbers(page: &CreaturePage) -> Vec<i64> {
        page.pokemon.iter().map(|d| d.creature.number).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => params.page = value,
                "page_size" => params.page_size = value,
                "sort_order" => params.sort_order = value,
                "sort_by" => params.sort_by = value,
                "type" => params.type_filter = value,
                other => panic!("unknown parameter {}", other),
            }
        }
        params
    }

    #[test]
    fn test_defaults() {
        let query = ListQuery::from_params(&ListParams::default(), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn test_malformed_parameters_are_invalid() {
        for pairs in [
            [("page", "two")],
            [("page", "0")],
            [("page_size", "-5")],
            [("page_size", "1e3")],
            [("sort_order", "sideways")],
        ] {
            let result = ListQuery::from_params(&params(&pairs), DEFAULT_PAGE_SIZE);
            assert!(
                matches!(result, Err(PokedexError::InvalidParameter { .. })),
                "{:?} should be rejected",
                pairs
            );
        }
    }

    #[test]
    fn test_sort_order_is_case_insensitive() {
        let query =
            ListQuery::from_params(&params(&[("sort_order", "DESC")]), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_sort_by_number_ascending_and_descending() {
        let (catalog, registry) = fixture();

        let asc = list_creatures(&catalog, &registry, &ListQuery::default());
        assert_eq!(numbers(&asc), vec![1, 4, 6, 7, 12]);

        let desc = list_creatures(
            &catalog,
            &registry,
            &ListQuery {
                sort_order: SortOrder::Desc,
                ..ListQuery::default()
            },
        );
        assert_eq!(numbers(&desc), vec![12, 7, 6, 4, 1]);
    }

    #[test]
    fn test_type_filter_matches_either_slot() {
        let (catalog, registry) = fixture();

        let query = ListQuery::from_params(&params(&[("type", "FLYING")]), 20).unwrap();
        let page = list_creatures(&catalog, &registry, &query);

        assert_eq!(numbers(&page), vec![6, 12]);
        assert_eq!(page.total_items, 2);
        assert!(page.pokemon.iter().all(|d| d.creature.has_type("flying")));
    }

    #[test]
    fn test_blank_and_all_filters_return_everything() {
        let (catalog, registry) = fixture();

        for raw in ["all", "ALL", "", "  "] {
            let query = ListQuery::from_params(&params(&[("type", raw)]), 20).unwrap();
            assert_eq!(list_creatures(&catalog, &registry, &query).total_items, 5);
        }
    }

    #[test]
    fn test_sort_by_string_field() {
        let (catalog, registry) = fixture();
        let query = ListQuery {
            sort_by: "name".to_string(),
            ..ListQuery::default()
        };

        let page = list_creatures(&catalog, &registry, &query);
        let names: Vec<&str> = page.pokemon.iter().map(|d| d.creature.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["Bulbasaur", "Butterfree", "Charizard", "Charmander", "Squirtle"]
        );
    }

    #[test]
    fn test_records_missing_sort_field_go_last() {
        let (catalog, registry) = fixture();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let query = ListQuery {
                sort_by: "speed".to_string(),
                sort_order: order,
                ..ListQuery::default()
            };
            let page = list_creatures(&catalog, &registry, &query);
            assert_eq!(numbers(&page).last(), Some(&12));
        }

        let desc = list_creatures(
            &catalog,
            &registry,
            &ListQuery {
                sort_by: "speed".to_string(),
                sort_order: SortOrder::Desc,
                ..ListQuery::default()
            },
        );
        assert_eq!(numbers(&desc), vec![6, 4, 1, 7, 12]);
    }

    #[test]
    fn test_equal_keys_keep_catalog_order_in_both_directions() {
        let (catalog, registry) = fixture();

        let asc = list_creatures(
            &catalog,
            &registry,
            &ListQuery {
                sort_by: "type_one".to_string(),
                ..ListQuery::default()
            },
        );
        // Charmander (4) precedes Charizard (6) in the catalog.
        assert_eq!(numbers(&asc), vec![12, 4, 6, 1, 7]);

        let desc = list_creatures(
            &catalog,
            &registry,
            &ListQuery {
                sort_by: "type_one".to_string(),
                sort_order: SortOrder::Desc,
                ..ListQuery::default()
            },
        );
        assert_eq!(numbers(&desc), vec![7, 1, 4, 6, 12]);
    }

    #[test]
    fn test_control_characters_in_sort_field_are_invalid() {
        let result = ListQuery::from_params(&params(&[("sort_by", "speed\u{0}")]), 20);
        assert!(matches!(
            result,
            Err(PokedexError::InvalidParameter { field, .. }) if field == "sort_by"
        ));
    }

    #[test]
    fn test_unknown_sort_field_falls_back_to_name() {
        let (catalog, registry) = fixture();
        let query = ListQuery {
            sort_by: "weight".to_string(),
            sort_order: SortOrder::Desc,
            ..ListQuery::default()
        };

        let page = list_creatures(&catalog, &registry, &query);

        assert_eq!(page.pokemon[0].creature.name, "Squirtle");
        assert_eq!(page.pokemon[4].creature.name, "Bulbasaur");
    }

    #[test]
    fn test_pages_cover_all_items_exactly_once() {
        let (catalog, registry) = fixture();

        for page_size in 1..=6 {
            let first = list_creatures(
                &catalog,
                &registry,
                &ListQuery {
                    page_size,
                    ..ListQuery::default()
                },
            );
            let mut seen = Vec::new();
            for page in 1..=first.total_pages + 1 {
                let result = list_creatures(
                    &catalog,
                    &registry,
                    &ListQuery {
                        page,
                        page_size,
                        ..ListQuery::default()
                    },
                );
                assert!(result.pokemon.len() <= page_size);
                seen.extend(numbers(&result));
            }
            assert_eq!(seen.len(), first.total_items);
            assert_eq!(seen, vec![1, 4, 6, 7, 12]);
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let (catalog, registry) = fixture();
        let query = ListQuery {
            page: 100,
            page_size: 2,
            ..ListQuery::default()
        };

        let page = list_creatures(&catalog, &registry, &query);

        assert!(page.pokemon.is_empty());
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 100);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let (catalog, registry) = fixture();
        let query = ListQuery {
            page: usize::MAX,
            page_size: usize::MAX,
            ..ListQuery::default()
        };

        assert!(list_creatures(&catalog, &registry, &query).pokemon.is_empty());
    }

    #[test]
    fn test_decoration_reflects_registry_and_uuids_are_unique() {
        let (catalog, registry) = fixture();
        registry.capture("Squirtle").unwrap();

        let page = list_creatures(&catalog, &registry, &ListQuery::default());

        for item in &page.pokemon {
            assert_eq!(item.is_captured, item.creature.name == "Squirtle");
        }
        let uuids: HashSet<_> = page.pokemon.iter().map(|d| d.uuid).collect();
        assert_eq!(uuids.len(), page.pokemon.len());

        let again = list_creatures(&catalog, &registry, &ListQuery::default());
        assert!(again.pokemon.iter().all(|d| !uuids.contains(&d.uuid)));
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!(false), &json!(true)), Ordering::Less);
        assert_eq!(compare_values(&json!(1), &json!("1")), Ordering::Less);
    }
}
