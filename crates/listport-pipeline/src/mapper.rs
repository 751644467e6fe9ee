//! Dimension-to-option alignment.

use listport_core::{
    DestinationOption, DimensionMap, DimensionTarget, MappingGap, PartialMapping,
    VariationDimension,
};

/// Maps each dimension's `source_name` to the destination option whose
/// name equals the dimension's `display_name` exactly.
///
/// Matching is case-sensitive with no whitespace normalization. A
/// dimension without a match is left out of the map and recorded as
/// [`MappingGap::UnmatchedDimension`]. When several options share a name
/// the one with the smallest id wins, so the result does not depend on
/// list order.
///
/// Dimensions sharing a display name would all land on one option, so only
/// the one with the smallest `source_name` is mapped; the rest stay out of
/// the map and their attributes surface as unmapped on each variant.
#[must_use]
pub fn build_dimension_map(
    dimensions: &[VariationDimension],
    options: &[DestinationOption],
) -> PartialMapping<DimensionMap> {
    let mut mapping = PartialMapping::complete(DimensionMap::new());

    for dimension in dimensions {
        if let Some(owner) = shadowing_dimension(dimension, dimensions) {
            tracing::debug!(
                dimension = %dimension.source_name,
                owner = %owner.source_name,
                "dimension shares its display name; left unmapped"
            );
            continue;
        }

        let matched = options
            .iter()
            .filter(|o| o.name == dimension.display_name)
            .min_by(|a, b| a.id.cmp(&b.id));

        match matched {
            Some(option) => {
                tracing::debug!(
                    dimension = %dimension.source_name,
                    option_id = %option.id,
                    "mapped dimension"
                );
                mapping.value.insert(
                    dimension.source_name.clone(),
                    DimensionTarget {
                        destination_option_id: option.id.clone(),
                        destination_option_name: option.name.clone(),
                    },
                );
            }
            None => mapping.record(MappingGap::UnmatchedDimension {
                source_name: dimension.source_name.clone(),
                display_name: dimension.display_name.clone(),
            }),
        }
    }

    mapping
}

/// The dimension that owns `dimension`'s display name, when that is not
/// `dimension` itself. Among dimensions with equal display names the
/// smallest `source_name` wins.
pub(crate) fn shadowing_dimension<'a>(
    dimension: &VariationDimension,
    dimensions: &'a [VariationDimension],
) -> Option<&'a VariationDimension> {
    dimensions
        .iter()
        .filter(|other| other.display_name == dimension.display_name)
        .min_by(|a, b| a.source_name.cmp(&b.source_name))
        .filter(|owner| owner.source_name != dimension.source_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(source: &str, display: &str) -> VariationDimension {
        VariationDimension {
            source_name: source.to_owned(),
            display_name: display.to_owned(),
            allowed_values: vec![],
        }
    }

    fn option(id: &str, name: &str) -> DestinationOption {
        DestinationOption {
            id: id.to_owned(),
            name: name.to_owned(),
            values: vec![],
        }
    }

    #[test]
    fn unmatched_dimension_is_omitted_and_recorded() {
        let dims = [dimension("size_name", "Size"), dimension("color_name", "Color")];
        let opts = [option("opt-size", "Size")];

        let (map, gaps) = build_dimension_map(&dims, &opts).into_parts();

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("size_name").map(|t| t.destination_option_id.as_str()),
            Some("opt-size")
        );
        assert!(!map.contains("color_name"));
        assert_eq!(
            gaps,
            vec![MappingGap::UnmatchedDimension {
                source_name: "color_name".to_owned(),
                display_name: "Color".to_owned(),
            }]
        );
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let dims = [dimension("size_name", "Size"), dimension("color_name", "Color ")];
        let opts = [option("opt-1", "size"), option("opt-2", "Color")];

        let mapping = build_dimension_map(&dims, &opts);
        assert!(mapping.value.is_empty());
        assert_eq!(mapping.gaps.len(), 2);
    }

    #[test]
    fn mapping_is_idempotent_and_order_independent() {
        let dims = vec![
            dimension("size_name", "Size"),
            dimension("color_name", "Color"),
            dimension("style_name", "Style"),
        ];
        let opts = vec![
            option("opt-color", "Color"),
            option("opt-size-b", "Size"),
            option("opt-size-a", "Size"),
        ];

        let first = build_dimension_map(&dims, &opts).value;
        let again = build_dimension_map(&dims, &opts).value;

        let mut dims_rev = dims.clone();
        dims_rev.reverse();
        let mut opts_rev = opts.clone();
        opts_rev.reverse();
        let reversed = build_dimension_map(&dims_rev, &opts_rev).value;

        assert_eq!(first, again);
        assert_eq!(first, reversed);
        assert_eq!(
            first.get("size_name").map(|t| t.destination_option_id.as_str()),
            Some("opt-size-a")
        );
    }

    #[test]
    fn dimensions_sharing_a_display_name_map_once() {
        let dims = [dimension("size_name", "Size"), dimension("apparel_size", "Size")];
        let opts = [option("opt-size", "Size")];

        let mapping = build_dimension_map(&dims, &opts);
        assert_eq!(mapping.value.len(), 1);
        assert!(mapping.value.contains("apparel_size"));
        assert!(!mapping.value.contains("size_name"));
        assert!(mapping.is_complete());

        let mut reversed = dims.clone();
        reversed.reverse();
        assert_eq!(build_dimension_map(&reversed, &opts).value, mapping.value);
    }

    #[test]
    fn no_dimensions_yield_empty_complete_map() {
        let mapping = build_dimension_map(&[], &[option("opt-1", "Title")]);
        assert!(mapping.value.is_empty());
        assert!(mapping.is_complete());
    }
}
