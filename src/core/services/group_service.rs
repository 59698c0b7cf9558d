use std::collections::{HashMap, HashSet, VecDeque};

use uuid::Uuid;

use crate::ledger::validation::{ValidationCode, ValidationErrors};
use crate::ledger::{Account, Group, GroupTarget, Ledger, Posting};

use super::{ServiceError, ServiceResult};

pub struct GroupService;

impl GroupService {
    pub fn add(ledger: &mut Ledger, group: Group) -> ServiceResult<Uuid> {
        if let Some(parent_id) = group.parent_id {
            if ledger.group(parent_id).is_none() {
                return Err(ServiceError::NotFound(format!("group {parent_id}")));
            }
        }
        let errors = match group.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        Ok(ledger.add_group(group))
    }

    /// Creates a child node inheriting the parent's target.
    pub fn add_child(
        ledger: &mut Ledger,
        parent_id: Uuid,
        name: impl Into<String>,
    ) -> ServiceResult<Uuid> {
        let parent = ledger
            .group(parent_id)
            .ok_or_else(|| ServiceError::NotFound(format!("group {parent_id}")))?;
        let child = Group::new(name, parent.target).with_parent(parent_id);
        Self::add(ledger, child)
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Group) -> ServiceResult<()> {
        if ledger.group(id).is_none() {
            return Err(ServiceError::NotFound(format!("group {id}")));
        }
        let mut errors = match changes.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(parent_id) = changes.parent_id {
            if ledger.group(parent_id).is_none() {
                return Err(ServiceError::NotFound(format!("group {parent_id}")));
            }
            // Re-parenting under the node's own subtree would break the tree.
            if Self::subtree_ids(ledger, id).contains(&parent_id) {
                errors.add(Some("parent"), ValidationCode::CyclicParent);
            }
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let group = ledger
            .group_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("group {id}")))?;
        group.name = changes.name;
        group.target = changes.target;
        group.is_result = changes.is_result;
        group.parent_id = changes.parent_id;
        ledger.touch();
        Ok(())
    }

    /// Refuses to delete a node that still has directly assigned accounts;
    /// the refusal is a plain result and leaves the ledger untouched. On
    /// success, surviving children re-point to the removed node's parent.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<()> {
        let parent_id = ledger
            .group(id)
            .ok_or_else(|| ServiceError::NotFound(format!("group {id}")))?
            .parent_id;
        if ledger
            .accounts
            .iter()
            .any(|account| account.group_id == Some(id))
        {
            return Err(ServiceError::Constraint(
                "Group has directly assigned accounts".into(),
            ));
        }
        ledger.groups.retain(|group| group.id != id);
        for group in ledger
            .groups
            .iter_mut()
            .filter(|group| group.parent_id == Some(id))
        {
            group.parent_id = parent_id;
        }
        ledger.touch();
        Ok(())
    }

    pub fn list<'a>(ledger: &'a Ledger) -> Vec<&'a Group> {
        ledger.groups.iter().collect()
    }

    /// Direct children of the node, in creation order.
    pub fn children<'a>(ledger: &'a Ledger, id: Uuid) -> Vec<&'a Group> {
        ledger
            .groups
            .iter()
            .filter(|group| group.parent_id == Some(id))
            .collect()
    }

    /// Accounts directly assigned to the node or to any descendant node.
    pub fn accounts_of_subtree<'a>(ledger: &'a Ledger, id: Uuid) -> Vec<&'a Account> {
        let ids = Self::subtree_ids(ledger, id);
        ledger
            .accounts
            .iter()
            .filter(|account| account.group_id.is_some_and(|group| ids.contains(&group)))
            .collect()
    }

    /// Postings economically belonging to the node, in document order
    /// (journal creation order, then intra-journal order).
    ///
    /// A normal node aggregates the postings of every subtree account. A
    /// result node surfaces the counter-postings of all journals touching
    /// profit-and-loss accounts, materializing the balance-sheet result line
    /// from nominal-account activity.
    pub fn postings<'a>(ledger: &'a Ledger, id: Uuid) -> ServiceResult<Vec<&'a Posting>> {
        let group = ledger
            .group(id)
            .ok_or_else(|| ServiceError::NotFound(format!("group {id}")))?;
        if group.is_result {
            return Ok(Self::result_postings(ledger));
        }
        let account_ids: HashSet<Uuid> = Self::accounts_of_subtree(ledger, id)
            .iter()
            .map(|account| account.id)
            .collect();
        Ok(ledger
            .postings()
            .filter(|posting| account_ids.contains(&posting.account_id))
            .collect())
    }

    fn result_postings<'a>(ledger: &'a Ledger) -> Vec<&'a Posting> {
        let nominal = Self::profit_and_loss_account_ids(ledger);
        let mut postings = Vec::new();
        for journal in &ledger.journals {
            let touches_nominal = journal
                .postings
                .iter()
                .any(|posting| nominal.contains(&posting.account_id));
            if touches_nominal {
                postings.extend(
                    journal
                        .postings
                        .iter()
                        .filter(|posting| !nominal.contains(&posting.account_id)),
                );
            }
        }
        postings
    }

    /// Accounts whose direct group targets profit and loss.
    fn profit_and_loss_account_ids(ledger: &Ledger) -> HashSet<Uuid> {
        let nominal_groups: HashSet<Uuid> = ledger
            .groups
            .iter()
            .filter(|group| group.target == GroupTarget::ProfitAndLoss)
            .map(|group| group.id)
            .collect();
        ledger
            .accounts
            .iter()
            .filter(|account| {
                account
                    .group_id
                    .is_some_and(|group| nominal_groups.contains(&group))
            })
            .map(|account| account.id)
            .collect()
    }

    /// Ids of the subtree rooted at `id`, including `id` itself.
    fn subtree_ids(ledger: &Ledger, id: Uuid) -> HashSet<Uuid> {
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for group in &ledger.groups {
            if let Some(parent_id) = group.parent_id {
                children.entry(parent_id).or_default().push(group.id);
            }
        }
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if seen.insert(current) {
                if let Some(kids) = children.get(&current) {
                    queue.extend(kids.iter().copied());
                }
            }
        }
        seen
    }
}
