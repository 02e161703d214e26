use crate::model::{AuthorIdentity, CommitRecord};
use std::collections::HashMap;

/// Groups commits whose authors share a name or an email, transitively.
///
/// Groups are ordered by their earliest record, and the displayed name and
/// email of a group are those of that record.
pub struct IdentityGroups {
    /// Group index for every input record.
    pub membership: Vec<usize>,
    pub identities: Vec<AuthorIdentity>,
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    // The smaller index always becomes the root, so a root is its group's earliest record.
    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[high] = low;
        }
    }
}

pub fn merge_identities(records: &[CommitRecord]) -> IdentityGroups {
    let mut set = DisjointSet::new(records.len());
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    let mut by_email: HashMap<&str, usize> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        let first_with_name = *by_name.entry(record.author_name.as_str()).or_insert(idx);
        let first_with_email = *by_email.entry(record.author_email.as_str()).or_insert(idx);
        set.union(idx, first_with_name);
        set.union(idx, first_with_email);
    }

    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    let mut identities: Vec<AuthorIdentity> = Vec::new();
    let mut membership = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let root = set.find(idx);
        let group = *group_of_root.entry(root).or_insert_with(|| {
            identities.push(AuthorIdentity {
                names: Vec::new(),
                emails: Vec::new(),
            });
            identities.len() - 1
        });
        identities[group].absorb(&record.author_name, &record.author_email);
        membership.push(group);
    }

    IdentityGroups {
        membership,
        identities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::commit;
    use pretty_assertions::assert_eq;

    #[test]
    fn shared_email_links_names() {
        let records = vec![commit("A", "e1", 0), commit("B", "e1", 0), commit("B", "e2", 0)];
        let groups = merge_identities(&records);
        assert_eq!(groups.identities.len(), 1);
        assert_eq!(groups.identities[0].names, vec!["A", "B"]);
        assert_eq!(groups.identities[0].emails, vec!["e1", "e2"]);
        assert_eq!(groups.membership, vec![0, 0, 0]);
    }

    #[test]
    fn bridging_record_joins_earlier_groups() {
        let records = vec![
            commit("A", "a@x", 0),
            commit("B", "b@x", 0),
            commit("A", "b@x", 0),
        ];
        let groups = merge_identities(&records);
        assert_eq!(groups.identities.len(), 1);
        assert_eq!(groups.identities[0].label(), "A <a@x>");
    }

    #[test]
    fn unrelated_authors_stay_apart_in_first_seen_order() {
        let records = vec![commit("B", "b@x", 0), commit("A", "a@x", 0), commit("B", "b@x", 0)];
        let groups = merge_identities(&records);
        assert_eq!(groups.membership, vec![0, 1, 0]);
        assert_eq!(groups.identities[0].name(), "B");
        assert_eq!(groups.identities[1].name(), "A");
    }
}
