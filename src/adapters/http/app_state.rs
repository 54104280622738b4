use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        comment::CommentUseCases, meetup::MeetupUseCases, question::QuestionUseCases,
        rsvp::RsvpUseCases, user::AuthUseCases, vote::VoteUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub meetup_use_cases: Arc<MeetupUseCases>,
    pub question_use_cases: Arc<QuestionUseCases>,
    pub vote_use_cases: Arc<VoteUseCases>,
    pub rsvp_use_cases: Arc<RsvpUseCases>,
    pub comment_use_cases: Arc<CommentUseCases>,
}
