// Library root for the INSPIRØØ domain: analysis types, the view state
// machine, the community feed, identity, configuration, and persistence.

pub mod analysis;
pub mod catalog;
pub mod checklist;
pub mod community;
pub mod config;
pub mod db;
pub mod identity;
pub mod presence;
pub mod protocol;
pub mod view;
