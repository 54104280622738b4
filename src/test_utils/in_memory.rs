//! In-memory implementation of every repository trait for testing.
//!
//! All tables live behind one mutex so multi-table operations (vote casting,
//! cascading meetup deletes) are atomic in the same way a database
//! transaction would make them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    app_error::{AppError, AppResult},
    application::password,
    domain::entities::{
        rsvp_response::RsvpResponse,
        vote::{VoteDirection, VoteState},
    },
    use_cases::{
        comment::{Comment, CommentRepo},
        meetup::{Meetup, MeetupRepo, NewMeetup},
        question::{NewQuestion, Question, QuestionRepo},
        rsvp::{Rsvp, RsvpRepo},
        user::{NewUser, UserProfile, UserRepo, UserWithPassword},
        vote::{CastVote, VoteRepo},
    },
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: Vec<UserWithPassword>,
    meetups: Vec<Meetup>,
    questions: Vec<Question>,
    comments: Vec<Comment>,
    rsvps: HashMap<(i32, i32), (RsvpResponse, DateTime<Utc>)>,
    votes: HashMap<(i32, i32), VoteDirection>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user whose password is unusable for login.
    pub fn insert_user(&self, user: UserProfile) -> UserProfile {
        self.insert_user_record(user, String::new())
    }

    /// Seed a user that can log in with `raw_password`.
    pub fn insert_user_with_password(&self, user: UserProfile, raw_password: &str) -> UserProfile {
        let hash = password::hash_password(raw_password).unwrap();
        self.insert_user_record(user, hash)
    }

    fn insert_user_record(&self, mut profile: UserProfile, password: String) -> UserProfile {
        let mut tables = self.tables.lock().unwrap();
        profile.id = tables.next_id();
        tables.users.push(UserWithPassword {
            profile: profile.clone(),
            password,
        });
        profile
    }

    pub fn insert_meetup(&self, mut meetup: Meetup) -> Meetup {
        let mut tables = self.tables.lock().unwrap();
        meetup.id = tables.next_id();
        tables.meetups.push(meetup.clone());
        meetup
    }

    pub fn insert_question(&self, mut question: Question) -> Question {
        let mut tables = self.tables.lock().unwrap();
        question.id = tables.next_id();
        tables.questions.push(question.clone());
        question
    }

    pub fn rsvp_count(&self) -> usize {
        self.tables.lock().unwrap().rsvps.len()
    }

    pub fn question_count(&self) -> usize {
        self.tables.lock().unwrap().questions.len()
    }
}

#[async_trait]
impl UserRepo for InMemoryDatabase {
    async fn create(&self, user: NewUser) -> AppResult<UserProfile> {
        let mut tables = self.tables.lock().unwrap();

        if tables.users.iter().any(|u| u.profile.email == user.email) {
            return Err(AppError::BadRequest(
                "A record with this value already exists".into(),
            ));
        }

        let profile = UserProfile {
            id: tables.next_id(),
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            phone_number: user.phone_number,
            username: user.username,
            registered_on: Utc::now(),
            is_admin: false,
        };
        tables.users.push(UserWithPassword {
            profile: profile.clone(),
            password: user.password_hash,
        });
        Ok(profile)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<UserWithPassword>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.profile.email == email)
            .cloned())
    }
}

#[async_trait]
impl MeetupRepo for InMemoryDatabase {
    async fn create(&self, meetup: NewMeetup) -> AppResult<Meetup> {
        let mut tables = self.tables.lock().unwrap();
        let meetup = Meetup {
            id: tables.next_id(),
            created_on: Utc::now(),
            location: meetup.location,
            topic: meetup.topic,
            description: meetup.description,
            happening_on: meetup.happening_on,
            images: meetup.images,
            tags: meetup.tags,
        };
        tables.meetups.push(meetup.clone());
        Ok(meetup)
    }

    async fn get_by_id(&self, meetup_id: i32) -> AppResult<Option<Meetup>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .meetups
            .iter()
            .find(|m| m.id == meetup_id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Meetup>> {
        Ok(self.tables.lock().unwrap().meetups.clone())
    }

    async fn list_upcoming(&self, now: DateTime<Utc>) -> AppResult<Vec<Meetup>> {
        let mut upcoming: Vec<Meetup> = self
            .tables
            .lock()
            .unwrap()
            .meetups
            .iter()
            .filter(|m| m.happening_on > now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|m| m.happening_on);
        Ok(upcoming)
    }

    async fn delete(&self, meetup_id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.meetups.len();
        tables.meetups.retain(|m| m.id != meetup_id);
        if tables.meetups.len() == before {
            return Ok(false);
        }

        // Mirror the ON DELETE CASCADE chain of the relational schema.
        let doomed: Vec<i32> = tables
            .questions
            .iter()
            .filter(|q| q.meetup_id == meetup_id)
            .map(|q| q.id)
            .collect();
        tables.questions.retain(|q| q.meetup_id != meetup_id);
        tables.comments.retain(|c| !doomed.contains(&c.question_id));
        tables.votes.retain(|(_, question_id), _| !doomed.contains(question_id));
        tables.rsvps.retain(|(_, m), _| *m != meetup_id);
        Ok(true)
    }
}

#[async_trait]
impl QuestionRepo for InMemoryDatabase {
    async fn create(&self, question: NewQuestion) -> AppResult<Question> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.meetups.iter().any(|m| m.id == question.meetup_id) {
            return Err(AppError::BadRequest("Referenced record not found".into()));
        }
        let question = Question {
            id: tables.next_id(),
            created_on: Utc::now(),
            user_id: question.user_id,
            meetup_id: question.meetup_id,
            title: question.title,
            body: question.body,
            votes: 0,
        };
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn get_by_id(&self, question_id: i32) -> AppResult<Option<Question>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Question>> {
        let mut questions = self.tables.lock().unwrap().questions.clone();
        questions.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));
        Ok(questions)
    }

    async fn list_by_meetup(&self, meetup_id: i32) -> AppResult<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .tables
            .lock()
            .unwrap()
            .questions
            .iter()
            .filter(|q| q.meetup_id == meetup_id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));
        Ok(questions)
    }
}

#[async_trait]
impl VoteRepo for InMemoryDatabase {
    async fn cast_vote(
        &self,
        user_id: i32,
        question_id: i32,
        direction: VoteDirection,
    ) -> AppResult<Option<CastVote>> {
        let mut tables = self.tables.lock().unwrap();
        let key = (user_id, question_id);

        let current = VoteState::from(tables.votes.get(&key).copied());
        let Some(question) = tables.questions.iter_mut().find(|q| q.id == question_id) else {
            return Ok(None);
        };

        let transition = current.cast(direction);
        question.votes += transition.delta;
        let question = question.clone();

        if !transition.is_noop() {
            tables.votes.insert(key, direction);
        }

        Ok(Some(CastVote {
            question,
            transition,
        }))
    }
}

#[async_trait]
impl RsvpRepo for InMemoryDatabase {
    async fn upsert(
        &self,
        user_id: i32,
        meetup_id: i32,
        response: RsvpResponse,
    ) -> AppResult<Rsvp> {
        let mut tables = self.tables.lock().unwrap();
        let topic = tables
            .meetups
            .iter()
            .find(|m| m.id == meetup_id)
            .map(|m| m.topic.clone())
            .ok_or_else(|| AppError::BadRequest("Referenced record not found".into()))?;

        let responded_on = Utc::now();
        tables
            .rsvps
            .insert((user_id, meetup_id), (response, responded_on));

        Ok(Rsvp {
            user_id,
            meetup_id,
            topic,
            response,
            responded_on,
        })
    }
}

#[async_trait]
impl CommentRepo for InMemoryDatabase {
    async fn create(&self, user_id: i32, question_id: i32, comment: &str) -> AppResult<Comment> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::BadRequest("Referenced record not found".into()));
        }
        let comment = Comment {
            id: tables.next_id(),
            created_on: Utc::now(),
            user_id,
            question_id,
            comment: comment.to_string(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_by_question(&self, question_id: i32) -> AppResult<Vec<Comment>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }
}
