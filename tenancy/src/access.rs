//! Organization access predicates.
//!
//! These are evaluated in-process against membership rows read from the
//! store. The store is not trusted to have filtered the rows by caller, so
//! every predicate matches on both the user and the organization.

use crate::dto::MembershipDto;
use crate::role::Role;

fn matching<'a>(
    memberships: &'a [MembershipDto],
    user_id: &'a str,
    org_id: &'a str,
) -> impl Iterator<Item = &'a MembershipDto> {
    memberships
        .iter()
        .filter(move |m| m.user_id == user_id && m.organization_id == org_id)
}

pub fn is_member(memberships: &[MembershipDto], user_id: &str, org_id: &str) -> bool {
    matching(memberships, user_id, org_id).next().is_some()
}

/// Role of the user in the organization, if any.
///
/// A (user, organization) pair should have at most one membership. If more
/// than one row matches, the least privileged role is returned.
pub fn role_of(memberships: &[MembershipDto], user_id: &str, org_id: &str) -> Option<Role> {
    matching(memberships, user_id, org_id).map(|m| m.role).min()
}

pub fn has_role_or_higher(
    memberships: &[MembershipDto],
    user_id: &str,
    org_id: &str,
    min_role: Role,
) -> bool {
    match role_of(memberships, user_id, org_id) {
        Some(role) => role.is_at_least(min_role),
        None => false,
    }
}
