// Multi-region pairing: which regions get compared, and how

use std::collections::HashSet;

use crate::grid::Grid;

/// One named region present in both sources.
pub struct RegionPair<'g> {
    pub name: String,
    pub left: &'g dyn Grid,
    pub right: &'g dyn Grid,
}

impl<'g> RegionPair<'g> {
    pub fn new(name: impl Into<String>, left: &'g dyn Grid, right: &'g dyn Grid) -> Self {
        Self {
            name: name.into(),
            left,
            right,
        }
    }
}

impl std::fmt::Debug for RegionPair<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionPair").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Region names present in both sources, in the left source's order,
/// without duplicates.
///
/// Regions that exist on one side only are left out entirely; they are not
/// reported as differences.
pub fn common_region_names<L, R>(left: &[L], right: &[R]) -> Vec<String>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let right: HashSet<&str> = right.iter().map(AsRef::as_ref).collect();
    let mut seen = HashSet::new();
    left.iter()
        .map(AsRef::as_ref)
        .filter(|name| right.contains(name) && seen.insert(*name))
        .map(str::to_string)
        .collect()
}
