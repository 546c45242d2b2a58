use crate::dsu::DisjointSets;
use crate::error::GroupError;

/// Record ids sharing one root, in increasing id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<usize>,
}

impl Group {
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Final partition: groups largest-first plus the multi-member count.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    groups: Vec<Group>,
    multi_member: usize,
    records: usize,
}

impl Grouping {
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn total_groups(&self) -> usize {
        self.groups.len()
    }

    /// Groups with more than one record. They form a prefix of `groups()`.
    pub fn multi_member_count(&self) -> usize {
        self.multi_member
    }

    pub fn record_count(&self) -> usize {
        self.records
    }
}

/// Materialize the forest's partition.
///
/// Roots are discovered in increasing id order; equal-sized groups keep that
/// order because the size sort is stable.
pub fn extract_groups(dsu: &mut DisjointSets) -> Result<Grouping, GroupError> {
    let n = dsu.len();
    // root id -> position in `groups`
    let mut slot: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Group> = Vec::with_capacity(dsu.set_count());

    for id in 0..n {
        let root = dsu.find(id)?;
        let pos = match slot[root] {
            Some(pos) => pos,
            None => {
                groups.push(Group { members: Vec::new() });
                slot[root] = Some(groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[pos].members.push(id);
    }

    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    let multi_member = groups.partition_point(|g| g.len() > 1);

    Ok(Grouping {
        groups,
        multi_member,
        records: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest(n: usize, unions: &[(usize, usize)]) -> DisjointSets {
        let mut dsu = DisjointSets::new();
        for _ in 0..n {
            dsu.add_record();
        }
        for &(a, b) in unions {
            dsu.union(a, b).unwrap();
        }
        dsu
    }

    fn members(grouping: &Grouping) -> Vec<Vec<usize>> {
        grouping.groups().iter().map(|g| g.members().to_vec()).collect()
    }

    #[test]
    fn empty_forest() {
        let grouping = extract_groups(&mut DisjointSets::new()).unwrap();
        assert_eq!(grouping.total_groups(), 0);
        assert_eq!(grouping.multi_member_count(), 0);
        assert_eq!(grouping.record_count(), 0);
    }

    #[test]
    fn all_singletons_keep_id_order() {
        let grouping = extract_groups(&mut forest(3, &[])).unwrap();
        assert_eq!(members(&grouping), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(grouping.multi_member_count(), 0);
    }

    #[test]
    fn sorted_largest_first() {
        let mut dsu = forest(7, &[(1, 2), (3, 4), (4, 5), (5, 6)]);
        let grouping = extract_groups(&mut dsu).unwrap();
        assert_eq!(
            members(&grouping),
            vec![vec![3, 4, 5, 6], vec![1, 2], vec![0]]
        );
        assert_eq!(grouping.total_groups(), 3);
        assert_eq!(grouping.multi_member_count(), 2);
        assert_eq!(grouping.record_count(), 7);
    }

    #[test]
    fn equal_sizes_keep_discovery_order() {
        // Roots discovered via ids 0, 1, 3; groups {0,4}, {1,2}, {3,5}
        let mut dsu = forest(6, &[(3, 5), (1, 2), (4, 0)]);
        let grouping = extract_groups(&mut dsu).unwrap();
        assert_eq!(
            members(&grouping),
            vec![vec![0, 4], vec![1, 2], vec![3, 5]]
        );
        assert_eq!(grouping.multi_member_count(), 3);
    }

    #[test]
    fn members_listed_in_id_order() {
        let mut dsu = forest(4, &[(3, 0), (2, 3), (1, 2)]);
        let grouping = extract_groups(&mut dsu).unwrap();
        assert_eq!(members(&grouping), vec![vec![0, 1, 2, 3]]);
        assert_eq!(grouping.multi_member_count(), 1);
    }
}
