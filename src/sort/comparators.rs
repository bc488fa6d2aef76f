use crate::imports::*;

use super::names::{ColumnOrRowComparatorNames, ColumnOrRowComparatorNamesList};
use std::cmp::Ordering;

/*
    Types:
    * ColumnOrRowComparators - A column or row with its resolved comparator chain
    * ColumnOrRowComparatorsList - Resolved groups composed into one ordering over SortRecords

    Groups are consulted in order and within a group comparators are consulted in order, the first
    result that is not Equal decides.
*/
#[derive(Debug, Clone)]
pub struct ColumnOrRowComparators {
    column_or_row: ColumnOrRowReference,
    comparators: Vec<SharedComparator>,
}

impl ColumnOrRowComparators {
    pub fn with(column_or_row: ColumnOrRowReference, comparators: Vec<SharedComparator>) -> Result<Self> {
        if comparators.is_empty() {
            return Err(PluginError::invalid_argument("Empty comparators").into());
        }
        Ok(ColumnOrRowComparators {
            column_or_row,
            comparators,
        })
    }

    pub fn column_or_row(&self) -> &ColumnOrRowReference {
        &self.column_or_row
    }

    pub fn comparators(&self) -> &[SharedComparator] {
        &self.comparators
    }

    pub fn compare<R: SortRecord + ?Sized>(
        &self,
        left: &R,
        right: &R,
        converter: &dyn ValueConverter,
    ) -> Ordering {
        let left = left.value(&self.column_or_row);
        let right = right.value(&self.column_or_row);
        self.comparators
            .iter()
            .map(|comparator| compare_values(comparator.as_ref(), left, right, converter))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl std::fmt::Display for ColumnOrRowComparators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .comparators
            .iter()
            .map(|comparator| comparator.name().to_string())
            .collect();
        write!(f, "{}={}", self.column_or_row, names.join(","))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnOrRowComparatorsList {
    groups: Vec<ColumnOrRowComparators>,
}

impl ColumnOrRowComparatorsList {
    pub fn with(groups: Vec<ColumnOrRowComparators>) -> Self {
        ColumnOrRowComparatorsList { groups }
    }

    pub fn groups(&self) -> &[ColumnOrRowComparators] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn compare<R: SortRecord + ?Sized>(
        &self,
        left: &R,
        right: &R,
        converter: &dyn ValueConverter,
    ) -> Ordering {
        self.groups
            .iter()
            .map(|group| group.compare(left, right, converter))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable, records that tie on every key keep their input order.
    #[tracing::instrument(level = "debug", skip_all, fields(records = records.len(), groups = self.groups.len()))]
    pub fn sort<R: SortRecord>(&self, records: &mut [R], converter: &dyn ValueConverter) {
        records.sort_by(|left, right| self.compare(left, right, converter));
        tracing::debug!("Sorted records");
    }
}

impl std::fmt::Display for ColumnOrRowComparatorsList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let groups: Vec<String> = self.groups.iter().map(|g| g.to_string()).collect();
        write!(f, "{}", groups.join(";"))
    }
}

impl ColumnOrRowComparatorNames {
    /// Each name is resolved without values, a DOWN key reverses the resolved comparator.
    pub fn resolve<P>(&self, provider: &P, context: &ProviderContext) -> Result<ColumnOrRowComparators>
    where
        P: PluginProvider<ComparatorKind> + ?Sized,
    {
        let comparators = self
            .names()
            .iter()
            .map(|key| {
                let comparator = provider.resolve(key.name(), &[], context)?;
                if key.direction().is_down() {
                    ComparatorKind::reverse(comparator)
                } else {
                    Ok(comparator)
                }
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Resolving sort keys {}", self))?;
        ColumnOrRowComparators::with(*self.column_or_row(), comparators)
    }
}

impl ColumnOrRowComparatorNamesList {
    #[tracing::instrument(level = "debug", skip_all, fields(groups = self.len()))]
    pub fn resolve<P>(&self, provider: &P, context: &ProviderContext) -> Result<ColumnOrRowComparatorsList>
    where
        P: PluginProvider<ComparatorKind> + ?Sized,
    {
        let groups = self
            .iter()
            .map(|names| names.resolve(provider, context))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            comparator_count = groups.iter().map(|g| g.comparators().len()).sum::<usize>(),
            "Resolved sort groups"
        );
        Ok(ColumnOrRowComparatorsList::with(groups))
    }
}
