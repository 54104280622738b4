pub mod rsvp_response;
pub mod vote;
