use crate::CollectionState;
use peakrando_game::{PlayerId, Requirement};

pub fn is_requirement_satisfied(
    req: &Requirement,
    state: &impl CollectionState,
    player: PlayerId,
) -> bool {
    match req {
        Requirement::Free => true,
        Requirement::Never => false,
        Requirement::Item(name) => state.has(name, player),
        Requirement::And(reqs) => reqs
            .iter()
            .all(|r| is_requirement_satisfied(r, state, player)),
        Requirement::Or(reqs) => reqs
            .iter()
            .any(|r| is_requirement_satisfied(r, state, player)),
    }
}

/// An unset rule means the location is always accessible.
pub fn is_rule_satisfied(
    rule: Option<&Requirement>,
    state: &impl CollectionState,
    player: PlayerId,
) -> bool {
    rule.map_or(true, |r| is_requirement_satisfied(r, state, player))
}
