pub mod comment;
pub mod meetup;
pub mod question;
pub mod rsvp;
pub mod user;
pub mod vote;
