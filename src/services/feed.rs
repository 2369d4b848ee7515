use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{OwnerDetails, Project, SwipeAction};
use crate::repositories::{ProfileRepository, ProjectRepository, SwipeRepository};
use crate::state::AppState;

/// A feed candidate with the owner-profile subset attached
#[derive(Debug)]
pub struct FeedProject {
    pub project: Project,
    pub owner_details: Option<OwnerDetails>,
}

/// Outcome of assembling a feed. The two empty variants are distinct
/// no-content results, not errors.
#[derive(Debug)]
pub enum FeedOutcome {
    /// No candidate projects exist at all
    NoCandidates,
    /// Candidates exist but none overlap the user's skills
    NoSkillMatch,
    Matches(Vec<FeedProject>),
}

pub struct FeedService;

impl FeedService {
    /// Assemble the swipe feed for a user: exclude own and disliked
    /// projects, attach owner details, keep skill-overlapping candidates.
    pub async fn assemble(state: &AppState, user_id: Uuid) -> AppResult<FeedOutcome> {
        let profile = state
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let disliked: Vec<Uuid> = state
            .swipes
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter(|s| s.action == SwipeAction::Dislike)
            .map(|s| s.project_id)
            .collect();

        let candidates = state.projects.list_candidates(user_id, &disliked).await?;
        if candidates.is_empty() {
            return Ok(FeedOutcome::NoCandidates);
        }

        let mut matches = Vec::new();
        for project in candidates {
            if !skills_overlap(&project.skills_needed, &profile.skills) {
                continue;
            }

            let owner_details = state
                .profiles
                .find_by_user(project.owner_id)
                .await?
                .map(OwnerDetails::from);

            matches.push(FeedProject {
                project,
                owner_details,
            });
        }

        if matches.is_empty() {
            return Ok(FeedOutcome::NoSkillMatch);
        }

        Ok(FeedOutcome::Matches(matches))
    }
}

/// True when at least one needed skill appears in the user's skill set
fn skills_overlap(needed: &[String], skills: &[String]) -> bool {
    needed.iter().any(|n| skills.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn overlap_on_single_shared_skill() {
        assert!(skills_overlap(
            &skills(&["Go", "React"]),
            &skills(&["React"])
        ));
    }

    #[test]
    fn no_overlap_on_disjoint_skills() {
        assert!(!skills_overlap(
            &skills(&["Go", "React"]),
            &skills(&["Rust"])
        ));
    }

    #[test]
    fn no_overlap_when_nothing_needed() {
        assert!(!skills_overlap(&[], &skills(&["Rust"])));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!skills_overlap(&skills(&["react"]), &skills(&["React"])));
    }
}
