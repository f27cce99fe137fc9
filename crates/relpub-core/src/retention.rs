use crate::version::VersionGroup;

/// Number of most recent daily and pre-release builds kept in the bucket.
pub const BUILDS_TO_RETAIN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Retain,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionDecision {
    pub group: VersionGroup,
    pub disposition: Disposition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    pub decisions: Vec<RetentionDecision>,
}

impl RetentionPlan {
    /// Mark every group at position `keep` or later for deletion.
    ///
    /// `groups` must be sorted newest first, as produced by
    /// [`VersionGroup::from_keys`].
    #[must_use]
    pub fn new(groups: Vec<VersionGroup>, keep: usize) -> Self {
        debug_assert!(groups.windows(2).all(|w| w[0].version > w[1].version));

        let decisions = groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| RetentionDecision {
                group,
                disposition: if i >= keep {
                    Disposition::Delete
                } else {
                    Disposition::Retain
                },
            })
            .collect();
        Self { decisions }
    }

    pub fn retained(&self) -> impl Iterator<Item = &VersionGroup> {
        self.with_disposition(Disposition::Retain)
    }

    pub fn to_delete(&self) -> impl Iterator<Item = &VersionGroup> {
        self.with_disposition(Disposition::Delete)
    }

    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.to_delete().map(|g| g.files.len()).sum()
    }

    fn with_disposition(&self, disposition: Disposition) -> impl Iterator<Item = &VersionGroup> {
        self.decisions
            .iter()
            .filter(move |d| d.disposition == disposition)
            .map(|d| &d.group)
    }
}
