use std::{
    cmp::Ordering,
    fmt,
    ops::{
        Deref,
        DerefMut,
    },
};
use crate::status::{
    Status,
    Statuses,
};

impl Status {
    /// Catalog ordering: by `sort_order` with unordered entries last,
    /// then by id.
    pub fn catalog_cmp(&self, other: &Self) -> Ordering {
        let key = |status: &Self| (status.sort_order.is_none(), status.sort_order, status.id);
        key(self).cmp(&key(other))
    }
}

impl Statuses {
    /// Appends the status unless one with the same id is already
    /// present; returns whether it was appended.
    pub fn push_unique(&mut self, status: Status) -> bool {
        if self.0.iter().any(|s| s.id == status.id) {
            false
        } else {
            self.0.push(status);
            true
        }
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.iter()
            .map(|status| status.id)
            .collect()
    }

    pub fn sort_by_catalog(&mut self) {
        self.0.sort_by(Status::catalog_cmp);
    }
}

impl From<Vec<Status>> for Statuses {
    fn from(args: Vec<Status>) -> Self {
        Self(args)
    }
}

impl<const N: usize> From<[Status; N]> for Statuses {
    fn from(args: [Status; N]) -> Self {
        Self(args.into())
    }
}

impl Deref for Statuses {
    type Target = Vec<Status>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Statuses {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for Statuses {
    type Item = Status;
    type IntoIter = std::vec::IntoIter<Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn status(id: i64, sort_order: Option<i64>) -> Status {
        Status {
            id,
            project_id: 1,
            name: format!("status{id}"),
            sort_order,
            is_final: false,
        }
    }

    #[test]
    fn push_unique() {
        let mut statuses = Statuses::default();
        assert!(statuses.push_unique(status(1, None)));
        assert!(statuses.push_unique(status(2, None)));
        assert!(!statuses.push_unique(status(1, Some(5))));
        assert_eq!(statuses.ids(), [1, 2]);
    }

    #[test]
    fn catalog_ordering() {
        let mut statuses = Statuses::from([
            status(1, None),
            status(2, Some(20)),
            status(3, Some(10)),
            status(4, None),
            status(5, Some(10)),
        ]);
        statuses.sort_by_catalog();
        assert_eq!(statuses.ids(), [3, 5, 2, 1, 4]);
    }
}
