//! Promotion ceiling check.

use crate::server::model::{rank::RankTable, ranking::PromotionCheck};

/// Decides whether a holder of `executor_rank` may move someone into `target_prefix`.
///
/// The target must sit strictly below the executor. When the executor's rank has a
/// ceiling, the target may be no higher than the ceiling rank. Demotions call this with
/// the rank the member is demoted into.
///
/// # Arguments
/// - `ranks` - Configured rank hierarchy
/// - `executor_rank` - Prefix of the executor's highest rank, if any
/// - `target_prefix` - Rank the member would end up in
///
/// # Returns
/// - `PromotionCheck::allowed()` - Executor may perform the change
/// - Denied check with a reason, and `max_rank` set when the ceiling was the cause
pub fn can_promote_to_rank(
    ranks: &RankTable,
    executor_rank: Option<&str>,
    target_prefix: &str,
) -> PromotionCheck {
    let Some((executor_index, executor)) = executor_rank
        .and_then(|prefix| Some((ranks.index_of(prefix)?, ranks.get(prefix)?)))
    else {
        return PromotionCheck::denied("You do not hold a recognised rank");
    };

    let Some(target_index) = ranks.index_of(target_prefix) else {
        return PromotionCheck::denied(format!("Invalid target rank: {}", target_prefix));
    };

    if target_index <= executor_index {
        return PromotionCheck::denied("You cannot promote to a rank equal to or higher than your own");
    }

    if let Some(ceiling) = executor.max_promote_to.as_deref() {
        if let (Some(ceiling_index), Some(ceiling_rank)) =
            (ranks.index_of(ceiling), ranks.get(ceiling))
        {
            if target_index < ceiling_index {
                return PromotionCheck {
                    can_promote: false,
                    reason: Some(format!(
                        "Your rank can only promote up to {}",
                        ceiling_rank.name
                    )),
                    max_rank: Some(ceiling_rank.name.clone()),
                };
            }
        }
    }

    PromotionCheck::allowed()
}
