//! Dimension-to-option mapping results and the partial-coverage policy.
//!
//! Mapping never fails. Anything that cannot be matched is recorded as a
//! [`MappingGap`] next to the (possibly incomplete) result, so callers see
//! exactly what was dropped instead of a silently smaller payload.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a marketplace dimension lands on the destination side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTarget {
    pub destination_option_id: String,
    pub destination_option_name: String,
}

/// `dimension source name -> destination option`, built once per product.
///
/// Coverage is not total: an unmatched dimension is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionMap(BTreeMap<String, DimensionTarget>);

impl DimensionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_name: impl Into<String>, target: DimensionTarget) {
        self.0.insert(source_name.into(), target);
    }

    #[must_use]
    pub fn get(&self, source_name: &str) -> Option<&DimensionTarget> {
        self.0.get(source_name)
    }

    #[must_use]
    pub fn contains(&self, source_name: &str) -> bool {
        self.0.contains_key(source_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A non-fatal hole in the marketplace-to-destination translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingGap {
    /// No destination option is named after this dimension's display name.
    UnmatchedDimension {
        source_name: String,
        display_name: String,
    },
    /// A variant attribute references a dimension that is not in the map;
    /// the attribute was dropped from that variant.
    UnmappedAttribute {
        variant: String,
        dimension_source_name: String,
        value: String,
    },
    /// The value name is not among the option's created values. The entry
    /// is still submitted; the platform decides.
    UnknownOptionValue {
        variant: String,
        option_name: String,
        value: String,
    },
    /// The variant lost `missing` attributes and the active policy drops
    /// incomplete variants.
    VariantExcluded { variant: String, missing: usize },
    /// Another dimension with the same display name owns the option; this
    /// one gets no option of its own.
    DuplicateDimension {
        source_name: String,
        display_name: String,
        kept: String,
    },
    /// The marketplace reported more child listings than were fetched.
    VariationsTruncated {
        variation_count: u32,
        fetched: usize,
        skipped_pages: u32,
    },
}

impl fmt::Display for MappingGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingGap::UnmatchedDimension {
                source_name,
                display_name,
            } => write!(
                f,
                "no destination option named \"{display_name}\" (dimension {source_name})"
            ),
            MappingGap::UnmappedAttribute {
                variant,
                dimension_source_name,
                value,
            } => write!(
                f,
                "variant {variant}: attribute {dimension_source_name}=\"{value}\" has no destination option"
            ),
            MappingGap::UnknownOptionValue {
                variant,
                option_name,
                value,
            } => write!(
                f,
                "variant {variant}: option \"{option_name}\" has no value \"{value}\""
            ),
            MappingGap::VariantExcluded { variant, missing } => write!(
                f,
                "variant {variant} excluded: {missing} unresolved attribute(s)"
            ),
            MappingGap::DuplicateDimension {
                source_name,
                display_name,
                kept,
            } => write!(
                f,
                "dimension {source_name} shares display name \"{display_name}\" with {kept}; left out"
            ),
            MappingGap::VariationsTruncated {
                variation_count,
                fetched,
                skipped_pages,
            } => write!(
                f,
                "fetched {fetched} of {variation_count} variations; {skipped_pages} page(s) past the cap were skipped"
            ),
        }
    }
}

/// A mapping result together with every gap recorded while producing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialMapping<T> {
    pub value: T,
    pub gaps: Vec<MappingGap>,
}

impl<T> PartialMapping<T> {
    #[must_use]
    pub fn complete(value: T) -> Self {
        Self {
            value,
            gaps: Vec::new(),
        }
    }

    /// `true` when nothing was dropped or flagged.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Records a gap and logs it at `warn`.
    pub fn record(&mut self, gap: MappingGap) {
        tracing::warn!(gap = %gap, "mapping gap");
        self.gaps.push(gap);
    }

    pub fn into_parts(self) -> (T, Vec<MappingGap>) {
        (self.value, self.gaps)
    }
}

/// What to do with a variant that lost one or more option values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialVariantPolicy {
    /// Submit the variant with fewer option values.
    #[default]
    Keep,
    /// Leave the variant out of the bulk request.
    Exclude,
}

impl FromStr for PartialVariantPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!("expected \"keep\" or \"exclude\", got \"{other}\"")),
        }
    }
}
