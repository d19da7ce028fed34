use std::{
    collections::BTreeSet,
    fmt,
    ops::Deref,
};
use crate::role::{
    Role,
    Roles,
};

impl Roles {
    pub fn ids(&self) -> Vec<i64> {
        self.0.iter()
            .map(|role| role.id)
            .collect()
    }

    /// Whether any role held by the acting user (identified by the
    /// provided role ids) is a member of this set.
    pub fn permits(&self, user_role_ids: &[i64]) -> bool {
        self.0.iter()
            .any(|role| user_role_ids.contains(&role.id))
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }
}

impl From<Vec<Role>> for Roles {
    fn from(args: Vec<Role>) -> Self {
        Self(args.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for Roles {
    fn from(args: [Role; N]) -> Self {
        Self(args.into())
    }
}

impl From<&[Role]> for Roles {
    fn from(args: &[Role]) -> Self {
        Self(args.iter().cloned().collect())
    }
}

impl FromIterator<Role> for Roles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for Roles {
    type Target = BTreeSet<Role>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Roles {
    type Item = Role;
    type IntoIter = std::collections::btree_set::IntoIter<Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Roles {
    type Item = &'a Role;
    type IntoIter = std::collections::btree_set::Iter<'a, Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = self.0.iter()
            .map(|role| role.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{names}]")
    }
}
