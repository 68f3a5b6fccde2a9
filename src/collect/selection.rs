//! Optional module selection (`--include` / `--exclude`)

use anyhow::Result;
use std::collections::BTreeSet;

use crate::error::AmalgamateError;

/// Which optional modules take part in the merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every available module
    #[default]
    All,
    /// Only the named modules
    Include(BTreeSet<String>),
    /// Every module except the named ones
    Exclude(BTreeSet<String>),
}

impl Selection {
    /// Build a selection from the raw flag values.
    ///
    /// Each value is a comma separated list of module names. Giving both is a
    /// usage error.
    pub fn from_flags(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        match (include, exclude) {
            (Some(_), Some(_)) => Err(AmalgamateError::Usage(
                "cannot include and exclude modules at the same time".to_string(),
            )
            .into()),
            (Some(list), None) => Ok(Self::Include(parse_list(list))),
            (None, Some(list)) => Ok(Self::Exclude(parse_list(list))),
            (None, None) => Ok(Self::All),
        }
    }

    /// Whether the module with this name should be merged
    pub fn admits(&self, module: &str) -> bool {
        match self {
            Self::All => true,
            Self::Include(names) => names.contains(module),
            Self::Exclude(names) => !names.contains(module),
        }
    }

    /// Names given on the command line, if any
    pub fn named(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::All => None,
            Self::Include(names) | Self::Exclude(names) => Some(names),
        }
    }
}

fn parse_list(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
