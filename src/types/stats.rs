use serde::{Deserialize, Serialize};
use std::fmt;

/// The remote collections whose sizes make up [`Stats`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// `GET /api/salespersons`
    Salespersons,
    /// `GET /api/dealers`
    Dealers,
    /// `GET /api/meetings`
    Meetings,
    /// `GET /api/leads`
    Leads,
}

impl Collection {
    /// All collections in display order.
    pub const ALL: [Collection; 4] = [
        Collection::Salespersons,
        Collection::Dealers,
        Collection::Meetings,
        Collection::Leads,
    ];

    /// Path segment under `/api/`.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Salespersons => "salespersons",
            Collection::Dealers => "dealers",
            Collection::Meetings => "meetings",
            Collection::Leads => "leads",
        }
    }

    /// Label shown in the stats panel.
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Salespersons => "Salespersons",
            Collection::Dealers => "Dealers",
            Collection::Meetings => "Meetings",
            Collection::Leads => "Leads",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Aggregate counts shown in the stats panel.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of salespersons.
    pub salespersons: usize,
    /// Number of dealers.
    pub dealers: usize,
    /// Number of meetings.
    pub meetings: usize,
    /// Number of leads.
    pub leads: usize,
}

impl Stats {
    /// Returns the count for one collection.
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Salespersons => self.salespersons,
            Collection::Dealers => self.dealers,
            Collection::Meetings => self.meetings,
            Collection::Leads => self.leads,
        }
    }

    /// Iterates `(collection, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Collection, usize)> + '_ {
        Collection::ALL
            .into_iter()
            .map(move |collection| (collection, self.count(collection)))
    }
}
