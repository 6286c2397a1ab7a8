// Policy documents: privacy policy and terms of use.

pub mod documents;
pub mod handlers;
