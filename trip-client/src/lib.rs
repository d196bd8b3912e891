//! Interactive trip-planning client.
//!
//! Orchestrates a multimodal comparison UI against a routing backend:
//! pick two points on a map, compare driving, cycling, walking and
//! transit for the trip, page through transit alternatives, browse the
//! transit network, and ask a discrete-choice model which mode a given
//! rider would pick.

pub mod backend;
pub mod comparison;
pub mod detail;
pub mod domain;
pub mod metadata;
pub mod pager;
pub mod predictor;
pub mod selector;
pub mod session;
