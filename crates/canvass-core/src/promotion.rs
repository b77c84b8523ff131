//! Automatic role promotion triggered by business events.
//!
//! Publishing a survey makes its owner a surveyor; completing a payment
//! makes the payer a pro-user. Admin accounts are exempt: no automatic
//! event may change an admin's role. Explicit operator overrides set the
//! role directly through [`UserRepository::set_role_by_id`] and bypass
//! this module entirely.

use crate::error::CanvassResult;
use crate::models::user::Role;
use crate::repository::{UpdateOutcome, UserRepository};

/// Business event that can trigger a role promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionEvent {
    SurveySubmitted,
    PaymentCompleted,
}

/// Role a user is promoted to after `event`, if any.
pub fn promoted_role(current: Role, event: PromotionEvent) -> Option<Role> {
    if current == Role::Admin {
        return None;
    }
    match event {
        PromotionEvent::SurveySubmitted => Some(Role::Surveyor),
        PromotionEvent::PaymentCompleted => Some(Role::ProUser),
    }
}

/// Apply the promotion rule for `email` after `event`.
///
/// A missing user record is a no-op (`Ok(None)`), not an error: surveys
/// and payments may be recorded for identities that have no user
/// document yet, and the triggering write must not be aborted. When a
/// promotion applies, the role is written with a single atomic update
/// and its outcome is returned.
pub async fn apply_promotion<U: UserRepository>(
    users: &U,
    email: &str,
    event: PromotionEvent,
) -> CanvassResult<Option<UpdateOutcome>> {
    let Some(user) = users.find_by_email(email).await? else {
        return Ok(None);
    };
    let Some(target) = promoted_role(user.role, event) else {
        return Ok(None);
    };
    let outcome = users.set_role_by_email(email, target).await?;
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_never_promoted() {
        assert_eq!(promoted_role(Role::Admin, PromotionEvent::SurveySubmitted), None);
        assert_eq!(promoted_role(Role::Admin, PromotionEvent::PaymentCompleted), None);
    }

    #[test]
    fn survey_submission_promotes_to_surveyor() {
        assert_eq!(
            promoted_role(Role::User, PromotionEvent::SurveySubmitted),
            Some(Role::Surveyor)
        );
        assert_eq!(
            promoted_role(Role::ProUser, PromotionEvent::SurveySubmitted),
            Some(Role::Surveyor)
        );
        // Re-submission keeps the role stable.
        assert_eq!(
            promoted_role(Role::Surveyor, PromotionEvent::SurveySubmitted),
            Some(Role::Surveyor)
        );
    }

    #[test]
    fn payment_promotes_to_pro_user() {
        assert_eq!(
            promoted_role(Role::User, PromotionEvent::PaymentCompleted),
            Some(Role::ProUser)
        );
        assert_eq!(
            promoted_role(Role::Surveyor, PromotionEvent::PaymentCompleted),
            Some(Role::ProUser)
        );
    }
}
