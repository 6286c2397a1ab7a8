// Academy content: blogs, audiobooks and e-books persisted to the local store,
// plus the upload boundary that turns files into data URIs.

pub mod collections;
pub mod handlers;
pub mod models;
pub mod upload;
